//! Best five-card hand selection from hole cards plus a complete board.

use super::hand_eval::{evaluate_5, HandStrength};
use crate::cards::card::{Board, Card, HoleCards};
use crate::cards::Combinations;

/// Evaluate a 7-card hand (best 5-card combination out of 21).
pub fn best_of_7(cards: &[Card; 7]) -> HandStrength {
    Combinations::<5>::new(cards.len())
        .map(|idx| evaluate_5(&idx.map(|i| cards[i])))
        .max()
        .unwrap_or_default()
}

/// Best hand for a player's hole cards on a complete 5-card board.
pub fn best_hand(hole_cards: &HoleCards, board: &[Card; 5]) -> HandStrength {
    best_of_7(&[
        hole_cards.card1,
        hole_cards.card2,
        board[0],
        board[1],
        board[2],
        board[3],
        board[4],
    ])
}

/// Best hand on a board, or `None` while the river is still to come.
pub fn best_hand_on(hole_cards: &HoleCards, board: &Board) -> Option<HandStrength> {
    board.complete().map(|cards| best_hand(hole_cards, cards))
}
