//! # Hold'em Equity
//!
//! A Monte Carlo equity engine for Texas Hold'em. Given any table state (hole
//! cards dealt, some or all community cards showing), it estimates each
//! player's expected share of the pot by replaying the rest of the hand many
//! times at random.
//!
//! ## Features
//!
//! - **Exact Evaluation**: Every 5-card hand maps to one integer; comparison is `<`
//! - **Best of Seven**: Checks all 21 five-card subsets of hole cards plus board
//! - **Fair Splits**: Ties divide the pot exactly, for any table of 2 to 22 players
//! - **Faithful Dealing**: Burn cards are replayed, hidden cards stay hidden
//! - **Parallel and Reproducible**: Seeded runs give the same answer on any thread count
//!
//! ## Quick Start
//!
//! ```
//! use holdem_equity::{EquitySimulator, Game, SimulatorConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! // 1. Deal a hand
//! let mut game = Game::new(4, &mut rng).unwrap();
//! game.deal_hole_cards().unwrap();
//! game.deal_flop().unwrap();
//!
//! // 2. Estimate equities without touching the game
//! let simulator = EquitySimulator::new(SimulatorConfig::fast().with_seed(7)).unwrap();
//! let report = simulator.estimate(&game).unwrap();
//!
//! // 3. Record them on the players
//! game.set_equities(&report.equities);
//! assert!(game.players().iter().all(|p| p.equity().is_some()));
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, deck, hole cards, board and burn pile
//! - [`eval`]: 5-card evaluator and best-of-7 selection
//! - [`table`]: Authoritative state of one hand
//! - [`equity`]: Monte Carlo simulator, configuration and reports
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Equity Simulator                         │
//! │  - Reshuffle unseen cards   - Replay burns and streets          │
//! │  - Split pots exactly       - Parallel seeded chunks            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ reads TableSnapshot
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │  Table  │         │ Best of 7 │         │  Cards /  │
//!    │  State  │         │ Evaluator │         │   Deck    │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Card primitives.
///
/// Cards, the 52-card deck, hole cards, board and burned cards.
pub mod cards;

/// Hand evaluation.
///
/// Scores 5-card hands and picks the best 5 of 7.
pub mod eval;

/// Table state module.
pub mod table;

/// Equity simulation module.
///
/// Monte Carlo estimation of each player's share of the pot.
pub mod equity;

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, Deck, HoleCards, Street};
pub use equity::{EquityReport, EquitySimulator, SimulationError, SimulatorConfig};
pub use eval::{best_hand, evaluate_5, HandCategory, HandStrength};
pub use table::{Game, GameError, TableSnapshot};
