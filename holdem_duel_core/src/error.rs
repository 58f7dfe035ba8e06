use crate::card::Card;
use crate::state::{Action, Seat, Street};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 牌局核心的所有错误
///
/// - `InsufficientCards` 对当前这一局是致命的，需要重新开局
/// - `LegalActionViolation` 与 `InsufficientFunds` 可以恢复，调用方重新提示玩家即可
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("牌不够: 需要 {needed} 张, 只有 {available} 张")]
    InsufficientCards { needed: usize, available: usize },

    #[error("重复的牌 {0}")]
    DuplicateCard(Card),

    #[error("{street:?} 阶段不能执行 {action:?}")]
    LegalActionViolation { action: Action, street: Street },

    #[error("{seat:?} 筹码不足: 需要 {needed}, 只有 {available}")]
    InsufficientFunds { seat: Seat, needed: u64, available: u64 },

    #[error("尚未到摊牌阶段")]
    ShowdownNotReached,

    #[error("当前没有进行中的牌局")]
    NoHandInProgress,
}

/// 解析牌面文本 (例如 "S10") 时的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("空字符串")]
    Empty,
    #[error("未知花色 {0:?}")]
    UnknownSuit(String),
    #[error("未知点数 {0:?}")]
    UnknownRank(String),
}
