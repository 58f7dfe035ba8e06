use crate::card::{Card, Deck};
use crate::error::GameError;
use crate::showdown::ShowdownResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type HandId = Uuid;

/// 座位，一桌只有两个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::First, Seat::Second];

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// 对手的座位
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// 下注轮 (Street)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// 该阶段应当翻开的公共牌数量
    pub fn community_len(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    pub fn next(self) -> Street {
        match self {
            Street::PreFlop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }
}

/// 玩家动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Bet(u64), // 下注，只能在本轮还没有人下注时使用
    Call,     // 跟注，同时结束本轮下注
    Raise,    // 加注，固定为当前下注额的两倍
    Fold,     // 弃牌
}

/// 告知调用方当前合法的动作及其金额，简化界面逻辑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Fold,
    Bet(u64),   // 最多可以下注的金额
    Call(u64),  // 需要跟注的金额
    Raise(u64), // 加注需要投入的金额
}

/// 一局的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// 有人弃牌，另一方拿走全部奖池
    Folded { folded: Seat, winner: Seat, amount: u64 },
    /// 河牌跟注后摊牌比大小
    Showdown(ShowdownResult),
}

/// 牌局当前所处的状态
///
/// 行动权、当前下注额和弃牌状态都在这一个枚举里，不存在互相矛盾的组合。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// 等待 `seat` 行动；`current_bet` 为本轮尚未被跟注的下注额，0 表示还没人下注
    Acting { seat: Seat, current_bet: u64 },
    /// 牌局已结束，奖池已结算
    Over(HandOutcome),
}

/// 一局牌的全部状态
///
/// 只能通过 [`crate::new_hand`] 系列函数创建，通过 [`crate::apply_action`] 推进。
#[derive(Debug, Clone)]
pub struct Hand {
    pub(crate) id: HandId,
    // 尚未发出的牌，不会出现在快照里
    pub(crate) deck: Deck,
    pub(crate) hole_cards: [[Card; 2]; 2],
    pub(crate) community_cards: Vec<Card>,
    pub(crate) stacks: [u64; 2],
    // 本局每个座位投入奖池的筹码
    pub(crate) committed: [u64; 2],
    pub(crate) pot: u64,
    pub(crate) street: Street,
    pub(crate) phase: Phase,
}

/// 某一时刻的牌局快照，可以直接序列化给界面层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub hand_id: HandId,
    pub street: Street,
    pub pot: u64,
    pub current_bet: u64,
    pub to_act: Option<Seat>,
    pub stacks: [u64; 2],
    pub committed: [u64; 2],
    pub folded: [bool; 2],
    pub community_cards: Vec<Card>,
    pub outcome: Option<HandOutcome>,
}

// --- Hand 的实现方法 ---

impl Hand {
    pub fn id(&self) -> HandId {
        self.id
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn stacks(&self) -> [u64; 2] {
        self.stacks
    }

    pub fn stack(&self, seat: Seat) -> u64 {
        self.stacks[seat.index()]
    }

    pub fn committed(&self, seat: Seat) -> u64 {
        self.committed[seat.index()]
    }

    pub fn hole_cards(&self, seat: Seat) -> [Card; 2] {
        self.hole_cards[seat.index()]
    }

    /// 已翻开的公共牌，数量由当前阶段决定
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    /// 牌堆中还没发出的牌
    pub fn undealt_cards(&self) -> &[Card] {
        self.deck.cards()
    }

    /// 当前应该行动的座位，牌局结束后为 None
    pub fn to_act(&self) -> Option<Seat> {
        match self.phase {
            Phase::Acting { seat, .. } => Some(seat),
            Phase::Over(_) => None,
        }
    }

    pub fn current_bet(&self) -> u64 {
        match self.phase {
            Phase::Acting { current_bet, .. } => current_bet,
            Phase::Over(_) => 0,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn is_folded(&self, seat: Seat) -> bool {
        matches!(self.phase, Phase::Over(HandOutcome::Folded { folded, .. }) if folded == seat)
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        match &self.phase {
            Phase::Over(outcome) => Some(outcome),
            Phase::Acting { .. } => None,
        }
    }

    /// 摊牌结果，只有真正摊牌之后才有
    pub fn showdown_result(&self) -> Result<&ShowdownResult, GameError> {
        match &self.phase {
            Phase::Over(HandOutcome::Showdown(result)) => Ok(result),
            _ => Err(GameError::ShowdownNotReached),
        }
    }

    /// 两个座位的筹码加上奖池，一局之内保持不变
    pub fn chips_in_play(&self) -> u64 {
        self.stacks.iter().sum::<u64>() + self.pot
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            hand_id: self.id,
            street: self.street,
            pot: self.pot,
            current_bet: self.current_bet(),
            to_act: self.to_act(),
            stacks: self.stacks,
            committed: self.committed,
            folded: Seat::ALL.map(|seat| self.is_folded(seat)),
            community_cards: self.community_cards.clone(),
            outcome: self.outcome().cloned(),
        }
    }
}
