//! # 两人德州扑克核心逻辑库
//!
//! 这个 `core` crate 包含了两人对局的全部核心逻辑：
//! 扑克牌与牌堆、牌力评估、下注轮状态机以及摊牌结算。
//! 它不做任何 I/O，也不输出日志，可以被任何界面层（终端、图形界面）复用。

mod card;
mod error;
mod hand;
mod logic;
mod showdown;
mod state;
mod table;

pub use card::*;

pub use error::*;

pub use hand::*;

pub use logic::*;

pub use showdown::*;

pub use state::*;

pub use table::*;
