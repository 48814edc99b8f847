//! Poker hand evaluation.
//!
//! - `hand_eval`: totally ordered strength of any 5-card hand
//! - `best_hand`: strongest 5 of 7 cards

pub mod best_hand;
pub mod hand_eval;

pub use best_hand::{best_hand, best_hand_on, best_of_7};
pub use hand_eval::{evaluate_5, HandCategory, HandStrength};
