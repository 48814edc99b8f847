//! Card and deck primitives.
//!
//! ## Modules
//!
//! - `card`: Card, hole cards, board, burned cards, deck and street types
//! - `combinations`: k-of-n index enumeration used by best-hand selection

pub mod card;
pub mod combinations;

pub use card::{
    parse_cards, unshuffled_deck, Board, BurnedCards, Card, Deck, HoleCards, ParseCardError,
    Street,
};
pub use combinations::{binomial, Combinations};
