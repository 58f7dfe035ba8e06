use crate::card::Deck;
use crate::error::GameError;
use crate::showdown::resolve;
use crate::state::*;
use rand::Rng;
use uuid::Uuid;

// --- 核心游戏流程函数 ---

/// 开始新的一局游戏
///
/// 用一副新洗好的牌发牌，筹码沿用传入的 `stacks`。
pub fn new_hand(stacks: (u64, u64)) -> Result<Hand, GameError> {
    new_hand_with_rng(stacks, &mut rand::rng())
}

/// 同 [`new_hand`]，由调用方提供随机数发生器
pub fn new_hand_with_rng<R: Rng + ?Sized>(stacks: (u64, u64), rng: &mut R) -> Result<Hand, GameError> {
    new_hand_with_deck(stacks, Deck::shuffled(rng))
}

/// 用给定的牌堆开局，不洗牌
///
/// - 每个座位依次从堆顶拿两张底牌（先 `Seat::First` 再 `Seat::Second`）。
/// - 奖池清零，阶段设为 PreFlop，由 `Seat::First` 先行动。
/// - 公共牌留在牌堆里，每轮下注结束时才发出。
pub fn new_hand_with_deck(stacks: (u64, u64), mut deck: Deck) -> Result<Hand, GameError> {
    if deck.remaining() < 4 {
        return Err(GameError::InsufficientCards { needed: 4, available: deck.remaining() });
    }
    let first = deck.draw(2)?;
    let second = deck.draw(2)?;

    Ok(Hand {
        id: Uuid::new_v4(),
        deck,
        hole_cards: [[first[0], first[1]], [second[0], second[1]]],
        community_cards: Vec::with_capacity(5),
        stacks: [stacks.0, stacks.1],
        committed: [0, 0],
        pot: 0,
        street: Street::PreFlop,
        phase: Phase::Acting { seat: Seat::First, current_bet: 0 },
    })
}

/// 当前行动者可以执行的动作
///
/// 只列出筹码足够支付的动作；弃牌总是可以的。牌局结束后返回空列表。
pub fn legal_actions(hand: &Hand) -> Vec<ActionType> {
    let Phase::Acting { seat, current_bet } = hand.phase else {
        return Vec::new();
    };
    let stack = hand.stack(seat);

    let mut actions = Vec::with_capacity(3);
    if current_bet == 0 {
        if stack > 0 {
            actions.push(ActionType::Bet(stack));
        }
    } else {
        if stack >= current_bet {
            actions.push(ActionType::Call(current_bet));
        }
        if let Some(raise) = current_bet.checked_mul(2) {
            if stack >= raise {
                actions.push(ActionType::Raise(raise));
            }
        }
    }
    actions.push(ActionType::Fold);
    actions
}

/// 处理当前行动者的动作
///
/// 先完整校验，再修改状态：返回错误时牌局没有任何变化。
/// - Bet：本轮还没人下注时才合法，金额必须大于 0。
/// - Call：跟上当前下注额，本轮下注结束，发下一轮公共牌；河牌时直接摊牌。
/// - Raise：投入当前下注额的两倍，并把它作为新的下注额，阶段不变。
/// - Fold：立即结束本局，对手拿走整个奖池。
pub fn apply_action(hand: &mut Hand, action: Action) -> Result<StateSnapshot, GameError> {
    let Phase::Acting { seat, current_bet } = hand.phase else {
        return Err(violation(hand, action));
    };

    match action {
        Action::Fold => {
            let winner = seat.other();
            let amount = hand.pot;
            hand.stacks[winner.index()] += amount;
            hand.pot = 0;
            hand.phase = Phase::Over(HandOutcome::Folded { folded: seat, winner, amount });
        }
        Action::Bet(amount) => {
            if current_bet != 0 || amount == 0 {
                return Err(violation(hand, action));
            }
            ensure_funds(hand, seat, amount)?;
            commit(hand, seat, amount);
            hand.phase = Phase::Acting { seat: seat.other(), current_bet: amount };
        }
        Action::Raise => {
            if current_bet == 0 {
                return Err(violation(hand, action));
            }
            let raise = current_bet.checked_mul(2).ok_or(GameError::InsufficientFunds {
                seat,
                needed: u64::MAX,
                available: hand.stack(seat),
            })?;
            ensure_funds(hand, seat, raise)?;
            commit(hand, seat, raise);
            hand.phase = Phase::Acting { seat: seat.other(), current_bet: raise };
        }
        Action::Call => {
            if current_bet == 0 {
                return Err(violation(hand, action));
            }
            ensure_funds(hand, seat, current_bet)?;
            if hand.street == Street::River {
                handle_showdown(hand, seat, current_bet)?;
            } else {
                advance_to_next_street(hand, seat, current_bet)?;
            }
        }
    }

    Ok(hand.snapshot())
}

// --- 辅助逻辑函数 ---

fn violation(hand: &Hand, action: Action) -> GameError {
    GameError::LegalActionViolation { action, street: hand.street }
}

fn ensure_funds(hand: &Hand, seat: Seat, needed: u64) -> Result<(), GameError> {
    let available = hand.stack(seat);
    if needed > available {
        return Err(GameError::InsufficientFunds { seat, needed, available });
    }
    Ok(())
}

/// 把筹码从座位移进奖池；调用前必须已经校验过余额
fn commit(hand: &mut Hand, seat: Seat, amount: u64) {
    hand.stacks[seat.index()] -= amount;
    hand.committed[seat.index()] += amount;
    hand.pot += amount;
}

/// 跟注结束本轮下注，推进到下一个阶段
///
/// - 先从牌堆取出这一轮的公共牌（Flop 3 张，Turn、River 各 1 张），牌不够时什么都不改。
/// - 重置当前下注额，行动权照常交给对手。
fn advance_to_next_street(hand: &mut Hand, seat: Seat, call: u64) -> Result<(), GameError> {
    let next = hand.street.next();
    let cards = hand.deck.draw(next.community_len() - hand.community_cards.len())?;

    commit(hand, seat, call);
    hand.community_cards.extend(cards);
    hand.street = next;
    hand.phase = Phase::Acting { seat: seat.other(), current_bet: 0 };
    Ok(())
}

/// 河牌跟注后摊牌
///
/// 先在不修改状态的前提下算出结果，再一次性结算：奖池清零，筹码发给赢家。
fn handle_showdown(hand: &mut Hand, seat: Seat, call: u64) -> Result<(), GameError> {
    let result = resolve(&hand.hole_cards, &hand.community_cards, hand.pot + call)?;

    commit(hand, seat, call);
    for winner in Seat::ALL {
        hand.stacks[winner.index()] += result.payout(winner);
    }
    hand.pot = 0;
    hand.street = Street::Showdown;
    hand.phase = Phase::Over(HandOutcome::Showdown(result));
    Ok(())
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::hand::HandCategory;
    use crate::showdown::Winner;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cards(text: &str) -> Vec<Card> {
        text.split_whitespace().map(|s| s.parse().unwrap()).collect()
    }

    // 辅助函数：用排好顺序的牌开局
    // 顺序：First 底牌 2 张, Second 底牌 2 张, Flop 3 张, Turn, River
    fn stacked_hand(stacks: (u64, u64), order: &str) -> Hand {
        new_hand_with_deck(stacks, Deck::from_cards(cards(order)).unwrap()).unwrap()
    }

    // 双方在每一轮都 bet 再 call，一直打到摊牌
    fn play_to_showdown(hand: &mut Hand, bet: u64) {
        while !hand.is_over() {
            apply_action(hand, Action::Bet(bet)).unwrap();
            apply_action(hand, Action::Call).unwrap();
        }
    }

    #[test]
    fn test_new_hand_deals_hole_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        let hand = new_hand_with_rng((1000, 1000), &mut rng).unwrap();

        assert_eq!(hand.street(), Street::PreFlop);
        assert_eq!(hand.pot(), 0);
        assert_eq!(hand.to_act(), Some(Seat::First));
        assert_eq!(hand.current_bet(), 0);
        assert!(hand.community_cards().is_empty());
        assert_eq!(hand.undealt_cards().len(), 48);
        assert_ne!(hand.hole_cards(Seat::First), hand.hole_cards(Seat::Second));
    }

    #[test]
    fn test_bet_then_call_advances_to_flop() {
        let mut hand = new_hand((1000, 1000)).unwrap();

        let snapshot = apply_action(&mut hand, Action::Bet(20)).unwrap();
        assert_eq!(snapshot.to_act, Some(Seat::Second));
        assert_eq!(snapshot.current_bet, 20);
        assert_eq!(snapshot.street, Street::PreFlop);

        let snapshot = apply_action(&mut hand, Action::Call).unwrap();
        assert_eq!(snapshot.pot, 40);
        assert_eq!(snapshot.stacks, [980, 980]);
        assert_eq!(snapshot.street, Street::Flop);
        assert_eq!(snapshot.community_cards.len(), 3);
        assert_eq!(snapshot.current_bet, 0);
        assert_eq!(snapshot.to_act, Some(Seat::First));
    }

    #[test]
    fn test_raise_doubles_current_bet_without_advancing() {
        let mut hand = new_hand((1000, 1000)).unwrap();
        apply_action(&mut hand, Action::Bet(20)).unwrap();

        let snapshot = apply_action(&mut hand, Action::Raise).unwrap();
        assert_eq!(snapshot.current_bet, 40);
        assert_eq!(snapshot.stacks, [980, 960]);
        assert_eq!(snapshot.pot, 60);
        assert_eq!(snapshot.street, Street::PreFlop);
        assert_eq!(snapshot.to_act, Some(Seat::First));

        let snapshot = apply_action(&mut hand, Action::Call).unwrap();
        assert_eq!(snapshot.stacks, [940, 960]);
        assert_eq!(snapshot.pot, 100);
        assert_eq!(snapshot.committed, [60, 40]);
        assert_eq!(snapshot.street, Street::Flop);
    }

    #[test]
    fn test_illegal_transitions_leave_state_untouched() {
        let mut hand = new_hand((1000, 1000)).unwrap();
        let before = hand.snapshot();

        for action in [Action::Call, Action::Raise, Action::Bet(0)] {
            let err = apply_action(&mut hand, action).unwrap_err();
            assert_eq!(err, GameError::LegalActionViolation { action, street: Street::PreFlop });
            assert_eq!(hand.snapshot(), before);
        }

        apply_action(&mut hand, Action::Bet(20)).unwrap();
        let before = hand.snapshot();
        assert!(matches!(
            apply_action(&mut hand, Action::Bet(20)),
            Err(GameError::LegalActionViolation { .. })
        ));
        assert_eq!(hand.snapshot(), before);
    }

    #[test]
    fn test_insufficient_funds_rejected() {
        let mut hand = new_hand((100, 30)).unwrap();
        let err = apply_action(&mut hand, Action::Bet(150)).unwrap_err();
        assert_eq!(err, GameError::InsufficientFunds { seat: Seat::First, needed: 150, available: 100 });

        apply_action(&mut hand, Action::Bet(20)).unwrap();
        let before = hand.snapshot();
        // Second 只有 30，加注需要 40
        let err = apply_action(&mut hand, Action::Raise).unwrap_err();
        assert_eq!(err, GameError::InsufficientFunds { seat: Seat::Second, needed: 40, available: 30 });
        assert_eq!(hand.snapshot(), before);
        assert_eq!(legal_actions(&hand), vec![ActionType::Call(20), ActionType::Fold]);
    }

    #[test]
    fn test_legal_actions_by_state() {
        let mut hand = new_hand((1000, 1000)).unwrap();
        assert_eq!(legal_actions(&hand), vec![ActionType::Bet(1000), ActionType::Fold]);

        apply_action(&mut hand, Action::Bet(20)).unwrap();
        assert_eq!(
            legal_actions(&hand),
            vec![ActionType::Call(20), ActionType::Raise(40), ActionType::Fold]
        );

        apply_action(&mut hand, Action::Fold).unwrap();
        assert!(legal_actions(&hand).is_empty());
    }

    #[test]
    fn test_fold_awards_pot_to_other_seat() {
        let mut hand = new_hand((1000, 1000)).unwrap();
        apply_action(&mut hand, Action::Bet(20)).unwrap();
        apply_action(&mut hand, Action::Call).unwrap(); // Flop
        apply_action(&mut hand, Action::Bet(50)).unwrap(); // First 下注

        let snapshot = apply_action(&mut hand, Action::Fold).unwrap(); // Second 弃牌
        assert_eq!(snapshot.street, Street::Flop);
        assert_eq!(snapshot.folded, [false, true]);
        assert_eq!(snapshot.pot, 0);
        assert_eq!(snapshot.stacks, [1020, 980]);
        assert_eq!(snapshot.to_act, None);
        assert_eq!(
            snapshot.outcome,
            Some(HandOutcome::Folded { folded: Seat::Second, winner: Seat::First, amount: 90 })
        );
        assert_eq!(hand.showdown_result(), Err(GameError::ShowdownNotReached));
    }

    #[test]
    fn test_actions_after_hand_over_rejected() {
        let mut hand = new_hand((1000, 1000)).unwrap();
        apply_action(&mut hand, Action::Fold).unwrap();
        let before = hand.snapshot();
        assert!(matches!(
            apply_action(&mut hand, Action::Fold),
            Err(GameError::LegalActionViolation { action: Action::Fold, .. })
        ));
        assert_eq!(hand.snapshot(), before);
        assert_eq!(hand.stacks(), [1000, 1000]);
    }

    #[test]
    fn test_full_hand_reaches_showdown() {
        // First: 黑桃同花顺; Second: 三条A
        let mut hand = stacked_hand((1000, 1000), "SJ S10 CA DA SA SK SQ H2 H3");
        play_to_showdown(&mut hand, 20);

        assert_eq!(hand.street(), Street::Showdown);
        assert_eq!(hand.community_cards().len(), 5);
        let result = hand.showdown_result().unwrap();
        assert_eq!(result.winner, Winner::Seat(Seat::First));
        assert_eq!(result.category(Seat::First), HandCategory::StraightFlush);
        assert_eq!(result.category(Seat::Second), HandCategory::ThreeOfAKind);
        assert_eq!(result.payouts, [160, 0]);
        assert_eq!(hand.pot(), 0);
        assert_eq!(hand.stacks(), [1080, 920]);
    }

    #[test]
    fn test_showdown_split_pot() {
        // 公共牌是顺子，双方都打公共牌
        let mut hand = stacked_hand((1000, 1000), "H2 D3 C4 S5 S10 HJ DQ CK SA");
        play_to_showdown(&mut hand, 25);

        let result = hand.showdown_result().unwrap();
        assert_eq!(result.winner, Winner::Split);
        assert_eq!(result.payouts, [100, 100]);
        assert_eq!(hand.stacks(), [1000, 1000]);
    }

    #[test]
    fn test_stacked_deck_running_out_is_atomic() {
        // 只够发底牌和 Flop，Turn 发不出来
        let mut hand = stacked_hand((1000, 1000), "H2 D3 C4 S5 S10 HJ DQ");
        apply_action(&mut hand, Action::Bet(20)).unwrap();
        apply_action(&mut hand, Action::Call).unwrap();
        apply_action(&mut hand, Action::Bet(20)).unwrap();

        let before = hand.snapshot();
        let err = apply_action(&mut hand, Action::Call).unwrap_err();
        assert_eq!(err, GameError::InsufficientCards { needed: 1, available: 0 });
        assert_eq!(hand.snapshot(), before);
    }

    #[test]
    fn test_chips_conserved_through_hand() {
        let mut hand = new_hand((500, 700)).unwrap();
        let total = hand.chips_in_play();
        for action in [Action::Bet(10), Action::Raise, Action::Raise, Action::Call, Action::Bet(5), Action::Call] {
            apply_action(&mut hand, action).unwrap();
            assert_eq!(hand.chips_in_play(), total);
            assert_eq!(hand.pot(), hand.committed(Seat::First) + hand.committed(Seat::Second));
        }
        apply_action(&mut hand, Action::Fold).unwrap();
        assert_eq!(hand.chips_in_play(), total);
    }
}
