mod commands;
mod view;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, parse_command};
use holdem_duel_core::{Hand, HandOutcome, StateSnapshot, Table, TableConfig};

/// 两人德州扑克，两个座位在同一个终端里轮流操作
#[derive(Parser, Debug)]
#[command(name = "holdem-duel", version)]
struct Cli {
    /// JSON 格式的牌桌配置文件
    #[arg(long)]
    config: Option<PathBuf>,
    /// 双方的初始筹码，覆盖配置文件
    #[arg(long)]
    stack: Option<u64>,
    /// `bet` 不带金额时的默认下注额，覆盖配置文件
    #[arg(long)]
    bet: Option<u64>,
    /// 以 JSON 输出牌局快照
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 日志写到 stderr，不和牌局输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(?config, "牌桌已创建");

    let mut table = Table::new(config);
    print_help();

    // 主任务处理用户输入
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };

        let command = match parse_command(&line, table.config().default_bet) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Exit => {
                println!("再见!");
                break;
            }
            Command::Help => print_help(),
            Command::NewHand => match table.start_hand() {
                Ok(hand) => {
                    info!(hand_id = %hand.id(), stacks = ?hand.stacks(), "新的一局开始");
                    print_hand(hand, &hand.snapshot(), cli.json)?;
                }
                Err(e) => {
                    warn!(error = %e, "无法开局");
                    println!("无法开局: {}", e);
                }
            },
            Command::Actions => println!("{}", view::render_legal_actions(&table.legal_actions())),
            Command::State => match table.current_hand() {
                Some(hand) => print_hand(hand, &hand.snapshot(), cli.json)?,
                None => println!("还没有开始牌局，输入 new 开始"),
            },
            Command::Act(action) => {
                let seat = table.current_hand().and_then(Hand::to_act);
                match table.act(action) {
                    Ok(snapshot) => {
                        debug!(?seat, ?action, pot = snapshot.pot, street = ?snapshot.street, "动作已执行");
                        if let Some(hand) = table.current_hand() {
                            print_hand(hand, &snapshot, cli.json)?;
                        }
                        if let Some(outcome) = &snapshot.outcome {
                            log_outcome(outcome, &table);
                        }
                    }
                    Err(e) => {
                        warn!(?seat, ?action, error = %e, "动作被拒绝");
                        println!("非法动作: {}", e);
                    }
                }
            }
        }
    }

    Ok(())
}

/// 读取配置文件（如果有），再用命令行参数覆盖
fn load_config(cli: &Cli) -> Result<TableConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
            parse_config(&text).with_context(|| format!("配置文件格式错误 {}", path.display()))?
        }
        None => TableConfig::default(),
    };
    if let Some(stack) = cli.stack {
        config.starting_stacks = (stack, stack);
    }
    if let Some(bet) = cli.bet {
        config.default_bet = bet;
    }
    Ok(config)
}

fn parse_config(text: &str) -> Result<TableConfig> {
    Ok(serde_json::from_str(text)?)
}

fn print_hand(hand: &Hand, snapshot: &StateSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", view::render_snapshot(snapshot));
        if let Some(hole) = view::render_hole_cards(hand) {
            println!("{}", hole);
        }
    }
    if let Some(outcome) = &snapshot.outcome {
        println!("{}", view::render_outcome(outcome, hand));
    } else if !json {
        println!("{}", view::render_legal_actions(&holdem_duel_core::legal_actions(hand)));
    }
    Ok(())
}

fn log_outcome(outcome: &HandOutcome, table: &Table) {
    match outcome {
        HandOutcome::Folded { winner, amount, .. } => {
            info!(winner = view::seat_name(*winner), amount, stacks = ?table.stacks(), "本局结束: 弃牌");
        }
        HandOutcome::Showdown(result) => {
            info!(winner = ?result.winner, payouts = ?result.payouts, stacks = ?table.stacks(), "本局结束: 摊牌");
        }
    }
}

fn print_help() {
    println!("--- 两人德州扑克 ---");
    println!("可用命令:");
    println!("  new                       - 开始新的一局");
    println!("  bet [金额]                - 下注 (不填金额时使用默认下注额)");
    println!("  call                      - 跟注，并进入下一轮");
    println!("  raise                     - 加注到当前下注额的两倍");
    println!("  fold                      - 弃牌");
    println!("  actions                   - 查看当前可选动作");
    println!("  state                     - 查看牌局状态");
    println!("  exit                      - 退出");
}
