//! Monte Carlo equity simulator.
//!
//! Each trial reshuffles the cards an observer cannot see (remaining deck plus
//! burned cards), replays the burns and the rest of the deal on a private copy,
//! and splits one pot among the players holding the best hand.
//!
//! Pot shares are counted in integer units of [`SHARE_UNITS`], which every
//! possible tie-group size (1 to 22) divides exactly. Accumulation is therefore
//! exact and order independent, so results do not depend on thread scheduling
//! and a fully determined board gives bit-identical equities for any trial count.

use std::fmt;
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::{ConfigError, SimulatorConfig};
use super::report::EquityReport;
use crate::cards::card::{Board, BurnedCards, Card, Deck, HoleCards};
use crate::eval::{best_hand, HandStrength};
use crate::table::{Game, GameError, TableSnapshot};

/// Least common multiple of 1..=22: one pot, divisible by any tie-group size.
pub const SHARE_UNITS: u64 = 232_792_560;

/// Errors that can occur when running a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Invalid simulator configuration.
    Config(ConfigError),
    /// Invalid table state.
    Game(GameError),
    /// The worker pool could not be created.
    ThreadPool(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Invalid configuration: {}", e),
            Self::Game(e) => write!(f, "Invalid table state: {}", e),
            Self::ThreadPool(e) => write!(f, "Failed to build thread pool: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Game(e) => Some(e),
            Self::ThreadPool(_) => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GameError> for SimulationError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

/// Outcome of one completed board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Showdown {
    /// Best hand per player.
    pub strengths: Vec<HandStrength>,
    /// Pot share per player, in [`SHARE_UNITS`]; sums to exactly one pot.
    pub shares: Vec<u64>,
}

impl Showdown {
    /// Number of players splitting the pot.
    pub fn num_winners(&self) -> usize {
        self.shares.iter().filter(|&&s| s > 0).count()
    }

    /// Fraction of the pot won by a player.
    pub fn equity(&self, seat: usize) -> f64 {
        self.shares[seat] as f64 / SHARE_UNITS as f64
    }
}

/// Score every player on a complete board and split the pot among the best hands.
pub fn showdown(hole_cards: &[HoleCards], board: &[Card; 5]) -> Showdown {
    let strengths: Vec<HandStrength> = hole_cards.iter().map(|h| best_hand(h, board)).collect();
    let best = strengths.iter().copied().max().unwrap_or_default();
    let winners = strengths.iter().filter(|&&s| s == best).count() as u64;
    let shares = strengths
        .iter()
        .map(|&s| if s == best { SHARE_UNITS / winners } else { 0 })
        .collect();
    Showdown { strengths, shares }
}

/// Per-player accumulators for a batch of trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) trials: u64,
    pub(crate) shares: Vec<u64>,
    pub(crate) wins: Vec<u64>,
    pub(crate) ties: Vec<u64>,
}

impl Tally {
    fn new(num_players: usize) -> Self {
        Self {
            trials: 0,
            shares: vec![0; num_players],
            wins: vec![0; num_players],
            ties: vec![0; num_players],
        }
    }

    fn record(&mut self, outcome: &Showdown) {
        self.trials += 1;
        let split = outcome.num_winners() > 1;
        for (seat, &share) in outcome.shares.iter().enumerate() {
            if share == 0 {
                continue;
            }
            self.shares[seat] += share;
            if split {
                self.ties[seat] += 1;
            } else {
                self.wins[seat] += 1;
            }
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        for (a, b) in self.shares.iter_mut().zip(&other.shares) {
            *a += b;
        }
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.ties.iter_mut().zip(&other.ties) {
            *a += b;
        }
        self
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `units / (trials * SHARE_UNITS)` reduced to lowest terms before the one
/// rounding step into `f64`.
pub(crate) fn share_fraction(units: u64, trials: u64) -> f64 {
    let den = trials as u128 * SHARE_UNITS as u128;
    if den == 0 {
        return 0.0;
    }
    let g = gcd(units as u128, den).max(1);
    (units as u128 / g) as f64 / (den / g) as f64
}

/// Reusable per-worker buffers for completing boards.
struct Scratch {
    deck: Deck,
    burned: BurnedCards,
    board: Board,
}

impl Scratch {
    fn new() -> Self {
        Self {
            deck: Deck::from_cards(Vec::new()),
            burned: BurnedCards::new(),
            board: Board::new(),
        }
    }

    fn draw(&mut self) -> Card {
        self.deck
            .deal()
            .expect("validated snapshot holds enough unseen cards")
    }

    fn burn(&mut self) {
        self.deck
            .burn(&mut self.burned)
            .expect("validated snapshot holds enough unseen cards");
    }

    /// Burn one card, then deal community cards up to `target`.
    fn deal_street(&mut self, target: usize) {
        self.burn();
        while self.board.len() < target {
            let card = self.draw();
            self.board.add(card);
        }
    }

    /// Replay the rest of the hand on a reshuffled copy of the unseen cards.
    fn complete_board<R: Rng + ?Sized>(
        &mut self,
        snapshot: &TableSnapshot,
        rng: &mut R,
    ) -> [Card; 5] {
        self.deck.reset_to(&snapshot.unseen);
        self.deck.shuffle(rng);
        self.burned.clear();
        self.board.clone_from(&snapshot.board);

        for _ in 0..snapshot.burned_count {
            self.burn();
        }
        if self.board.len() < 3 {
            self.deal_street(3);
        }
        if self.board.len() < 4 {
            self.deal_street(4);
        }
        if self.board.len() < 5 {
            self.deal_street(5);
        }

        *self
            .board
            .complete()
            .expect("board holds five cards after the river")
    }
}

/// Run one trial: complete the board at random and settle the showdown.
pub fn simulate_trial<R: Rng + ?Sized>(
    snapshot: &TableSnapshot,
    rng: &mut R,
) -> Result<Showdown, GameError> {
    snapshot.validate()?;
    let board = Scratch::new().complete_board(snapshot, rng);
    Ok(showdown(&snapshot.hole_cards, &board))
}

fn run_chunk(snapshot: &TableSnapshot, trials: u64, seed: u64) -> Tally {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scratch = Scratch::new();
    let mut tally = Tally::new(snapshot.hole_cards.len());
    for _ in 0..trials {
        let board = scratch.complete_board(snapshot, &mut rng);
        tally.record(&showdown(&snapshot.hole_cards, &board));
    }
    tally
}

/// Independent seed for work unit `index`.
fn chunk_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Monte Carlo equity estimator.
///
/// # Example
/// ```
/// use holdem_equity::equity::{EquitySimulator, SimulatorConfig};
/// use holdem_equity::table::Game;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut game = Game::new(3, &mut rng).unwrap();
/// game.deal_hole_cards().unwrap();
///
/// let simulator = EquitySimulator::new(SimulatorConfig::fast().with_seed(1)).unwrap();
/// let report = simulator.estimate(&game).unwrap();
/// let total: f64 = report.equities.iter().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator {
    config: SimulatorConfig,
}

impl EquitySimulator {
    /// Create a simulator, validating the configuration.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if config.chunk_size > config.trials {
            warn!(
                "chunk size {} exceeds {} trials; the run will use a single worker",
                config.chunk_size, config.trials
            );
        }
        Ok(Self { config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Estimate equities for a hand in progress. The game is not modified.
    pub fn estimate(&self, game: &Game) -> Result<EquityReport, SimulationError> {
        let snapshot = game.snapshot()?;
        self.run(&snapshot)
    }

    /// Estimate equities from a table snapshot.
    pub fn run(&self, snapshot: &TableSnapshot) -> Result<EquityReport, SimulationError> {
        snapshot.validate()?;
        let start = Instant::now();

        let trials = self.config.trials;
        let chunk_size = self.config.chunk_size;
        let num_chunks = trials.div_ceil(chunk_size);
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        debug!(
            "simulating {} trials in {} chunks for {} players on {:?} (seed {})",
            trials,
            num_chunks,
            snapshot.hole_cards.len(),
            snapshot.board,
            base_seed
        );

        let work = || {
            (0..num_chunks)
                .into_par_iter()
                .map(|i| {
                    let n = chunk_size.min(trials - i * chunk_size);
                    run_chunk(snapshot, n, chunk_seed(base_seed, i))
                })
                .reduce(|| Tally::new(snapshot.hole_cards.len()), Tally::merge)
        };

        let tally = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| SimulationError::ThreadPool(e.to_string()))?
                .install(work),
            None => work(),
        };

        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "{} trials finished in {:.3}s ({:.0} trials/s)",
            tally.trials,
            elapsed,
            tally.trials as f64 / elapsed.max(f64::EPSILON)
        );

        Ok(EquityReport::from_tally(snapshot, &tally, elapsed))
    }
}
