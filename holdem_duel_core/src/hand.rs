use crate::card::{Card, Rank};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use std::fmt;

/// 牌型 (HandCategory)
/// 变体按从小到大排列，可以直接利用派生的 `Ord` 比较牌型大小。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,      // 高牌
    OnePair,       // 一对
    TwoPair,       // 两对
    ThreeOfAKind,  // 三条
    Straight,      // 顺子
    Flush,         // 同花
    FullHouse,     // 葫芦
    FourOfAKind,   // 四条
    StraightFlush, // 同花顺
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            HandCategory::HighCard => "高牌",
            HandCategory::OnePair => "一对",
            HandCategory::TwoPair => "两对",
            HandCategory::ThreeOfAKind => "三条",
            HandCategory::Straight => "顺子",
            HandCategory::Flush => "同花",
            HandCategory::FullHouse => "葫芦",
            HandCategory::FourOfAKind => "四条",
            HandCategory::StraightFlush => "同花顺",
        })
    }
}

/// 一手牌的评估结果
///
/// `best_five` 按重要性排列：成组的牌在前（张数多的组在前，同样张数时点数大的在前），
/// 其余踢脚牌按点数从大到小排在后面。
///
/// 比较时先比牌型，再逐张比较 `best_five` 的点数；花色不参与比较，
/// 所以点数完全相同的两手牌相等（平分奖池）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    pub best_five: [Card; 5],
}

impl EvaluatedHand {
    /// 用于比较的点数序列
    pub fn tie_break(&self) -> [Rank; 5] {
        self.best_five.map(|card| card.rank)
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EvaluatedHand {}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tie_break().cmp(&other.tie_break()))
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cards: Vec<String> = self.best_five.iter().map(|c| c.to_string()).collect();
        write!(f, "{} [{}]", self.category, cards.join(", "))
    }
}

// --- 牌型评估逻辑 ---

/// 从至少 5 张牌中找出最优的 5 张牌组合
///
/// 枚举所有 5 张牌的组合（7 张牌时是 21 种），逐个独立判定牌型，取最大的一个。
/// 同花和顺子只看组合自身的 5 张牌，不看全部输入。
///
/// 输入顺序不影响结果：先把牌排成规范顺序再枚举，强度相同的组合总是取第一个。
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, GameError> {
    if cards.len() < 5 {
        return Err(GameError::InsufficientCards { needed: 5, available: cards.len() });
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(GameError::DuplicateCard(*card));
        }
    }

    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));

    get_combinations(&sorted, 5)
        .iter()
        .map(|hand| classify(hand))
        .reduce(|best, hand| if hand > best { hand } else { best })
        .ok_or(GameError::InsufficientCards { needed: 5, available: cards.len() })
}

/// 判定恰好 5 张牌的牌型
///
/// 只依赖点数直方图和花色直方图，没有其他状态。
fn classify(hand: &[Card]) -> EvaluatedHand {
    debug_assert_eq!(hand.len(), 5, "评估的牌必须是5张");

    let mut rank_counts = [0u8; 13];
    let mut suit_counts = [0u8; 4];
    for card in hand {
        rank_counts[card.rank.index()] += 1;
        suit_counts[card.suit.index()] += 1;
    }

    // 1. 同花：5 张牌全是同一花色
    let is_flush = suit_counts.iter().any(|&n| n == 5);

    // 2. 顺子：5 个不同点数且首尾相差 4（A 只算最大，不绕回）
    let present: Vec<usize> = (0..13).filter(|&i| rank_counts[i] > 0).collect();
    let is_straight = present.len() == 5 && present[4] - present[0] == 4;

    // 3. 按 (组内张数, 点数) 从大到小排列，同点数的牌按花色排，保证结果确定
    let mut ordered = hand.to_vec();
    ordered.sort_by_key(|c| (Reverse(rank_counts[c.rank.index()]), Reverse(c.rank), c.suit));
    let best_five: [Card; 5] = std::array::from_fn(|i| ordered[i]);

    let mut shape: Vec<u8> = rank_counts.iter().copied().filter(|&n| n > 0).collect();
    shape.sort_unstable_by(|a, b| b.cmp(a));

    let category = match (is_straight, is_flush, shape.as_slice()) {
        (true, true, _) => HandCategory::StraightFlush,
        (_, _, [4, 1]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (_, true, _) => HandCategory::Flush,
        (true, _, _) => HandCategory::Straight,
        (_, _, [3, 1, 1]) => HandCategory::ThreeOfAKind,
        (_, _, [2, 2, 1]) => HandCategory::TwoPair,
        (_, _, [2, 1, 1, 1]) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    EvaluatedHand { category, best_five }
}

/// 辅助函数：从一个切片中生成所有大小为 k 的组合，保持原有的相对顺序
fn get_combinations<T: Clone>(data: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![vec![]];
    }
    if data.len() < k {
        return vec![];
    }

    let mut result = vec![];
    let (first, rest) = data.split_at(1);

    // 包含第一个元素的组合
    for mut combo in get_combinations(rest, k - 1) {
        combo.insert(0, first[0].clone());
        result.push(combo);
    }

    // 不包含第一个元素的组合
    if data.len() > k {
        result.extend(get_combinations(rest, k));
    }

    result
}

// --- 单元测试 ---
