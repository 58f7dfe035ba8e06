use holdem_duel_core::Action;
use std::fmt;

/// 终端里可以输入的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewHand,
    Act(Action),
    Actions,
    State,
    Help,
    Exit,
}

/// 命令解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 下注金额不是正整数
    InvalidAmount(String),
    /// 无法识别的命令
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(value) => write!(f, "无效的金额 '{}'，必须是正整数 (例如 'bet 20')", value),
            Self::UnrecognizedCommand(cmd) => write!(f, "未知命令 '{}'，输入 help 查看可用命令", cmd),
        }
    }
}

impl std::error::Error for ParseError {}

/// 解析一行输入；空行返回 `Ok(None)`
///
/// `bet` 不带金额时使用 `default_bet`。
pub fn parse_command(input: &str, default_bet: u64) -> Result<Option<Command>, ParseError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(&first) = parts.first() else {
        return Ok(None);
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "new" | "start" => Command::NewHand,
        "bet" => {
            let amount = match parts.get(1) {
                Some(text) => match text.parse::<u64>() {
                    Ok(amount) if amount > 0 => amount,
                    _ => return Err(ParseError::InvalidAmount(text.to_string())),
                },
                None => default_bet,
            };
            Command::Act(Action::Bet(amount))
        }
        "call" => Command::Act(Action::Call),
        "raise" => Command::Act(Action::Raise),
        "fold" => Command::Act(Action::Fold),
        "actions" => Command::Actions,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => return Err(ParseError::UnrecognizedCommand(input.trim().to_string())),
    };
    Ok(Some(command))
}
