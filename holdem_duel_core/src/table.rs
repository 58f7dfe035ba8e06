use crate::error::GameError;
use crate::logic::{apply_action, legal_actions, new_hand_with_rng};
use crate::state::{Action, ActionType, Hand, HandOutcome, Seat, StateSnapshot};
use crate::showdown::Winner;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 牌桌配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// 两个座位的初始筹码
    pub starting_stacks: (u64, u64),
    /// 界面上 "下注" 不带金额时使用的默认下注额
    pub default_bet: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig { starting_stacks: (1000, 1000), default_bet: 20 }
    }
}

/// 一张两人牌桌
///
/// 筹码在多局之间保留，每局都用一副新洗好的牌。
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    // 当前这一局开始前的筹码
    stacks: [u64; 2],
    hand: Option<Hand>,
    hands_played: u32,
    wins: [u32; 2],
}

impl Table {
    pub fn new(config: TableConfig) -> Table {
        let stacks = [config.starting_stacks.0, config.starting_stacks.1];
        Table { config, stacks, hand: None, hands_played: 0, wins: [0, 0] }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn stacks(&self) -> [u64; 2] {
        self.stacks
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn wins(&self, seat: Seat) -> u32 {
        self.wins[seat.index()]
    }

    pub fn current_hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    /// 开始新的一局
    ///
    /// 上一局如果还没打完就直接作废，双方投入的筹码退回。
    /// 有座位已经输光筹码时不能开局。
    pub fn start_hand(&mut self) -> Result<&Hand, GameError> {
        self.start_hand_with_rng(&mut rand::rng())
    }

    pub fn start_hand_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Hand, GameError> {
        if let Some(seat) = Seat::ALL.into_iter().find(|seat| self.stacks[seat.index()] == 0) {
            return Err(GameError::InsufficientFunds { seat, needed: 1, available: 0 });
        }
        let hand = new_hand_with_rng((self.stacks[0], self.stacks[1]), rng)?;
        Ok(&*self.hand.insert(hand))
    }

    pub fn legal_actions(&self) -> Vec<ActionType> {
        self.hand.as_ref().map(legal_actions).unwrap_or_default()
    }

    /// 当前行动者执行一个动作；牌局因此结束时记录结果
    pub fn act(&mut self, action: Action) -> Result<StateSnapshot, GameError> {
        let hand = self.hand.as_mut().ok_or(GameError::NoHandInProgress)?;
        let snapshot = apply_action(hand, action)?;

        if let Some(outcome) = &snapshot.outcome {
            self.stacks = snapshot.stacks;
            self.hands_played += 1;
            match outcome {
                HandOutcome::Folded { winner, .. } => self.wins[winner.index()] += 1,
                HandOutcome::Showdown(result) => match result.winner {
                    Winner::Seat(winner) => self.wins[winner.index()] += 1,
                    Winner::Split => {}
                },
            }
        }
        Ok(snapshot)
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new(TableConfig::default())
    }
}

// --- 单元测试 ---
