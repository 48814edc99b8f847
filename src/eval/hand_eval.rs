//! Five-card hand evaluation.
//!
//! Every 5-card hand maps to a single `HandStrength` integer. Larger values are
//! strictly stronger hands and equal values are exact ties, so hands can be
//! compared and tie groups detected without any further logic.
//!
//! The value is a base-13 number: the hand category is the most significant
//! digit, followed by up to five kicker ranks.
//!
//! ```text
//! value = category·13⁵ + k1·13⁴ + k2·13³ + k3·13² + k4·13 + k5
//! ```

use crate::cards::card::{Card, RANK_2, RANK_5, RANK_A};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const BASE: u32 = 13;
const CATEGORY_WEIGHT: u32 = BASE * BASE * BASE * BASE * BASE;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    fn from_digit(digit: u32) -> Self {
        match digit {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable strength of a 5-card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandStrength(u32);

impl HandStrength {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        debug_assert!(kickers.len() <= 5);
        let mut value = category as u32 * CATEGORY_WEIGHT;
        let mut weight = CATEGORY_WEIGHT / BASE;
        for &k in kickers {
            value += k as u32 * weight;
            weight /= BASE;
        }
        Self(value)
    }

    /// Get the raw value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_digit(self.0 / CATEGORY_WEIGHT)
    }

    /// The five kicker digits, most significant first; unused slots are 0.
    pub fn kickers(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        let mut rest = self.0 % CATEGORY_WEIGHT;
        for slot in out.iter_mut().rev() {
            *slot = (rest % BASE) as u8;
            rest /= BASE;
        }
        out
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category(), self.0)
    }
}

/// A maximal run of equal-rank cards in a sorted hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct RankRun {
    rank: u8,
    len: u8,
}

/// Rank runs of a 5-card hand, sorted by (length, rank) ascending.
#[derive(Debug, Default)]
struct RankRuns {
    runs: [RankRun; 5],
    count: usize,
}

impl RankRuns {
    fn from_sorted(hand: &[Card; 5]) -> Self {
        let mut out = Self::default();
        let mut current = RankRun {
            rank: hand[0].rank(),
            len: 1,
        };
        for card in &hand[1..] {
            if card.rank() == current.rank {
                current.len += 1;
            } else {
                out.push(current);
                current = RankRun {
                    rank: card.rank(),
                    len: 1,
                };
            }
        }
        out.push(current);
        out.runs[..out.count].sort_unstable_by_key(|r| (r.len, r.rank));
        out
    }

    fn push(&mut self, run: RankRun) {
        self.runs[self.count] = run;
        self.count += 1;
    }

    /// Rank of the `i`-th run counted from the most significant end.
    fn rank_from_top(&self, i: usize) -> u8 {
        self.runs[self.count - 1 - i].rank
    }

    fn as_slice(&self) -> &[RankRun] {
        &self.runs[..self.count]
    }
}

fn is_wheel(sorted: &[Card; 5]) -> bool {
    sorted[0].rank() == RANK_2
        && sorted[3].rank() == RANK_5
        && sorted[4].rank() == RANK_A
        && sorted.windows(2).take(3).all(|w| w[0].rank() + 1 == w[1].rank())
}

fn is_straight(sorted: &[Card; 5]) -> bool {
    sorted.windows(2).all(|w| w[0].rank() + 1 == w[1].rank()) || is_wheel(sorted)
}

fn is_flush(hand: &[Card; 5]) -> bool {
    hand.iter().all(|c| c.suit() == hand[0].suit())
}

/// Evaluate a 5-card hand, in any order.
pub fn evaluate_5(cards: &[Card; 5]) -> HandStrength {
    let mut hand = *cards;
    hand.sort_unstable_by_key(|c| c.rank());

    let runs = RankRuns::from_sorted(&hand);
    let top = |i| runs.rank_from_top(i);

    match runs.count {
        2 => {
            let category = if runs.as_slice()[0].len == 1 {
                HandCategory::FourOfAKind
            } else {
                HandCategory::FullHouse
            };
            HandStrength::new(category, &[top(0), top(1)])
        }
        3 => {
            let category = if runs.as_slice()[1].len == 1 {
                HandCategory::ThreeOfAKind
            } else {
                HandCategory::TwoPair
            };
            HandStrength::new(category, &[top(0), top(1), top(2)])
        }
        4 => HandStrength::new(HandCategory::OnePair, &[top(0), top(1), top(2), top(3)]),
        _ => {
            let flush = is_flush(&hand);
            if is_straight(&hand) {
                let category = if flush {
                    HandCategory::StraightFlush
                } else {
                    HandCategory::Straight
                };
                // The ace plays low in the wheel, so its high card is the five.
                let high = if is_wheel(&hand) { hand[3].rank() } else { hand[4].rank() };
                HandStrength::new(category, &[high])
            } else {
                let category = if flush {
                    HandCategory::Flush
                } else {
                    HandCategory::HighCard
                };
                HandStrength::new(category, &[top(0), top(1), top(2), top(3), top(4)])
            }
        }
    }
}
