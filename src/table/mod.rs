//! Table state: the authoritative deck, players, board and burn pile of one hand.

pub mod game;

pub use game::{Game, GameError, Player, TableSnapshot, MAX_PLAYERS, MIN_PLAYERS};
