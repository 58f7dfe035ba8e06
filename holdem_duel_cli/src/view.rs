use holdem_duel_core::{ActionType, Card, Hand, HandOutcome, Seat, StateSnapshot, Street, Winner};

pub fn seat_name(seat: Seat) -> &'static str {
    match seat {
        Seat::First => "玩家1",
        Seat::Second => "玩家2",
    }
}

fn street_name(street: Street) -> &'static str {
    match street {
        Street::PreFlop => "翻牌前",
        Street::Flop => "翻牌",
        Street::Turn => "转牌",
        Street::River => "河牌",
        Street::Showdown => "摊牌",
    }
}

fn card_list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(无)".to_string();
    }
    cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

/// 一行牌局概况
pub fn render_snapshot(snapshot: &StateSnapshot) -> String {
    let mut line = format!(
        "[{}] 奖池: {} | 当前下注: {} | 公共牌: {} | {}筹码: {} | {}筹码: {}",
        street_name(snapshot.street),
        snapshot.pot,
        snapshot.current_bet,
        card_list(&snapshot.community_cards),
        seat_name(Seat::First),
        snapshot.stacks[0],
        seat_name(Seat::Second),
        snapshot.stacks[1],
    );
    if let Some(seat) = snapshot.to_act {
        line.push_str(&format!(" | 轮到{}", seat_name(seat)));
    }
    line
}

/// 当前行动者的底牌，同一终端轮流操作时只显示行动的一方
pub fn render_hole_cards(hand: &Hand) -> Option<String> {
    let seat = hand.to_act()?;
    Some(format!("{}的手牌: {}", seat_name(seat), card_list(&hand.hole_cards(seat))))
}

pub fn render_legal_actions(actions: &[ActionType]) -> String {
    if actions.is_empty() {
        return "当前没有可选动作，输入 new 开始新的一局".to_string();
    }
    let items: Vec<String> = actions
        .iter()
        .map(|action| match action {
            ActionType::Bet(max) => format!("bet [1..={}]", max),
            ActionType::Call(amount) => format!("call ({})", amount),
            ActionType::Raise(amount) => format!("raise ({})", amount),
            ActionType::Fold => "fold".to_string(),
        })
        .collect();
    format!("可选动作: {}", items.join(", "))
}

/// 本局结束后的详细结果
pub fn render_outcome(outcome: &HandOutcome, hand: &Hand) -> String {
    match outcome {
        HandOutcome::Folded { folded, winner, amount } => {
            format!("{}弃牌，{}赢得奖池 {}", seat_name(*folded), seat_name(*winner), amount)
        }
        HandOutcome::Showdown(result) => {
            let pot: u64 = result.payouts.iter().sum();
            let mut text = format!(
                "游戏结束！\n奖池: {}\n公共牌: {}\n",
                pot,
                card_list(hand.community_cards())
            );
            for seat in Seat::ALL {
                text.push_str(&format!(
                    "{}:\n    手牌: {}\n    牌型: {}\n    最佳组合: {}\n    赢得: {}\n",
                    seat_name(seat),
                    card_list(&hand.hole_cards(seat)),
                    result.category(seat),
                    card_list(&result.best_five(seat)),
                    result.payout(seat),
                ));
            }
            match result.winner {
                Winner::Seat(seat) => text.push_str(&format!("{}获胜！", seat_name(seat))),
                Winner::Split => text.push_str("平局！平分奖池"),
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_duel_core::{Action, Deck, apply_action, new_hand_with_deck};

    fn stacked_hand(order: &str) -> Hand {
        let cards = order.split_whitespace().map(|s| s.parse().unwrap()).collect();
        new_hand_with_deck((1000, 1000), Deck::from_cards(cards).unwrap()).unwrap()
    }

    #[test]
    fn test_render_snapshot_line() {
        let mut hand = stacked_hand("SJ S10 CA DA SA SK SQ H2 H3");
        apply_action(&mut hand, Action::Bet(20)).unwrap();
        let snapshot = apply_action(&mut hand, Action::Call).unwrap();
        assert_eq!(
            render_snapshot(&snapshot),
            "[翻牌] 奖池: 40 | 当前下注: 0 | 公共牌: SA, SK, SQ | 玩家1筹码: 980 | 玩家2筹码: 980 | 轮到玩家1"
        );
        assert_eq!(render_hole_cards(&hand).as_deref(), Some("玩家1的手牌: SJ, S10"));
    }

    #[test]
    fn test_render_legal_actions() {
        let actions = [ActionType::Call(20), ActionType::Raise(40), ActionType::Fold];
        assert_eq!(render_legal_actions(&actions), "可选动作: call (20), raise (40), fold");
        assert!(render_legal_actions(&[]).contains("new"));
    }

    #[test]
    fn test_render_showdown_outcome() {
        let mut hand = stacked_hand("SJ S10 CA DA SA SK SQ H2 H3");
        while !hand.is_over() {
            apply_action(&mut hand, Action::Bet(20)).unwrap();
            apply_action(&mut hand, Action::Call).unwrap();
        }
        let text = render_outcome(hand.outcome().unwrap(), &hand);
        assert!(text.contains("奖池: 160"));
        assert!(text.contains("牌型: 同花顺"));
        assert!(text.contains("最佳组合: SA, SK, SQ, SJ, S10"));
        assert!(text.ends_with("玩家1获胜！"));
        assert_eq!(render_hole_cards(&hand), None);
    }

    #[test]
    fn test_render_fold_outcome() {
        let mut hand = stacked_hand("SJ S10 CA DA");
        apply_action(&mut hand, Action::Bet(20)).unwrap();
        apply_action(&mut hand, Action::Fold).unwrap();
        assert_eq!(render_outcome(hand.outcome().unwrap(), &hand), "玩家2弃牌，玩家1赢得奖池 20");
    }
}
