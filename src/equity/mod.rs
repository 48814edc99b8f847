//! Monte Carlo equity estimation.
//!
//! - `config`: trial count, threading and seeding
//! - `simulator`: random board completion and pot splitting
//! - `report`: per-player results and export

pub mod config;
pub mod report;
pub mod simulator;

pub use config::{ConfigError, SimulatorConfig, MAX_TRIALS};
pub use report::EquityReport;
pub use simulator::{
    showdown, simulate_trial, EquitySimulator, Showdown, SimulationError, SHARE_UNITS,
};
