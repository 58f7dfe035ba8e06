use crate::card::Card;
use crate::error::GameError;
use crate::hand::{EvaluatedHand, HandCategory, evaluate};
use crate::state::Seat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 摊牌的赢家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Seat(Seat),
    Split, // 平局，平分奖池
}

/// 摊牌结果：每个座位的最佳牌型和分到的筹码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub winner: Winner,
    pub hands: [EvaluatedHand; 2],
    pub payouts: [u64; 2],
}

impl ShowdownResult {
    pub fn category(&self, seat: Seat) -> HandCategory {
        self.hands[seat.index()].category
    }

    pub fn best_five(&self, seat: Seat) -> [Card; 5] {
        self.hands[seat.index()].best_five
    }

    pub fn payout(&self, seat: Seat) -> u64 {
        self.payouts[seat.index()]
    }
}

/// 处理摊牌逻辑
///
/// 每个座位用 2 张底牌加 5 张公共牌评估最佳手牌，比较后分配奖池。
/// 这里只计算结果，不修改任何状态。
pub fn resolve(
    hole_cards: &[[Card; 2]; 2],
    community_cards: &[Card],
    pot: u64,
) -> Result<ShowdownResult, GameError> {
    if community_cards.len() != 5 {
        return Err(GameError::InsufficientCards { needed: 5, available: community_cards.len() });
    }

    let mut hands = Vec::with_capacity(2);
    for hole in hole_cards {
        let mut all_cards = community_cards.to_vec();
        all_cards.extend_from_slice(hole);
        hands.push(evaluate(&all_cards)?);
    }
    let hands = [hands[0], hands[1]];

    let winner = match hands[0].cmp(&hands[1]) {
        Ordering::Greater => Winner::Seat(Seat::First),
        Ordering::Less => Winner::Seat(Seat::Second),
        Ordering::Equal => Winner::Split,
    };

    Ok(ShowdownResult { winner, hands, payouts: split_pot(pot, winner) })
}

/// 将奖池分配给赢家
///
/// 平分时整除，多出的一个筹码给 `Seat::First`。
pub fn split_pot(pot: u64, winner: Winner) -> [u64; 2] {
    match winner {
        Winner::Seat(Seat::First) => [pot, 0],
        Winner::Seat(Seat::Second) => [0, pot],
        Winner::Split => {
            let share = pot / 2;
            [share + pot % 2, share]
        }
    }
}

// --- 单元测试 ---
