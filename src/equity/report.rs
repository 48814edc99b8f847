//! Equity estimates and their export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::simulator::{share_fraction, Tally};
use crate::cards::card::{Board, HoleCards, Street};
use crate::table::TableSnapshot;

/// Result of one equity estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityReport {
    /// Street the estimate was made on.
    pub street: Street,
    /// Community cards showing.
    pub board: Board,
    /// Hole cards per player, in seat order.
    pub hole_cards: Vec<HoleCards>,
    /// Number of completed trials.
    pub trials: u64,
    /// Expected pot share per player; sums to 1.
    pub equities: Vec<f64>,
    /// Trials each player won outright.
    pub wins: Vec<u64>,
    /// Trials each player split.
    pub ties: Vec<u64>,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
}

impl EquityReport {
    pub(crate) fn from_tally(
        snapshot: &TableSnapshot,
        tally: &Tally,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            street: snapshot.street().unwrap_or(Street::Preflop),
            board: snapshot.board.clone(),
            hole_cards: snapshot.hole_cards.clone(),
            trials: tally.trials,
            equities: tally
                .shares
                .iter()
                .map(|&units| share_fraction(units, tally.trials))
                .collect(),
            wins: tally.wins.clone(),
            ties: tally.ties.clone(),
            elapsed_seconds,
        }
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.equities.len()
    }

    /// Fraction of trials a player won outright.
    pub fn win_rate(&self, seat: usize) -> f64 {
        self.wins[seat] as f64 / self.trials.max(1) as f64
    }

    /// Fraction of trials a player split the pot.
    pub fn tie_rate(&self, seat: usize) -> f64 {
        self.ties[seat] as f64 / self.trials.max(1) as f64
    }

    /// Seat with the highest equity.
    pub fn leader(&self) -> Option<usize> {
        self.equities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(seat, _)| seat)
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }

    /// Save one row per player to a CSV file.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "seat,hole_cards,equity,win_rate,tie_rate")?;
        for (seat, hole) in self.hole_cards.iter().enumerate() {
            writeln!(
                file,
                "{},{}{},{:.6},{:.6},{:.6}",
                seat,
                hole.card1.compact(),
                hole.card2.compact(),
                self.equities[seat],
                self.win_rate(seat),
                self.tie_rate(seat)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EquityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} trials)", self.street, self.trials)?;
        for (seat, hole) in self.hole_cards.iter().enumerate() {
            writeln!(f, "Player {}: {} ({:.1}%)", seat + 1, hole, self.equities[seat] * 100.0)?;
        }
        write!(f, "Board: {}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equity::{EquitySimulator, SimulatorConfig};
    use crate::table::Game;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn river_report() -> EquityReport {
        let mut rng = StdRng::seed_from_u64(3);
        let game = Game::from_known(
            vec!["Ah Kh".parse().unwrap(), "Qc Qd".parse().unwrap()],
            "Qs 7h 2h 9h 3c".parse().unwrap(),
            &mut rng,
        )
        .unwrap();
        EquitySimulator::new(SimulatorConfig::new().with_trials(10).with_seed(3))
            .unwrap()
            .estimate(&game)
            .unwrap()
    }

    #[test]
    fn test_report_fields() {
        let report = river_report();
        assert_eq!(report.street, Street::River);
        assert_eq!(report.trials, 10);
        assert_eq!(report.num_players(), 2);
        assert_eq!(report.equities, vec![1.0, 0.0]);
        assert_eq!(report.wins, vec![10, 0]);
        assert_eq!(report.win_rate(0), 1.0);
        assert_eq!(report.tie_rate(0), 0.0);
        assert_eq!(report.leader(), Some(0));
    }

    #[test]
    fn test_display() {
        let text = river_report().to_string();
        assert!(text.starts_with("River (10 trials)"));
        assert!(text.contains("Player 1: A♥ K♥ (100.0%)"));
        assert!(text.contains("Player 2: Q♣ Q♦ (0.0%)"));
    }

    #[test]
    fn test_save_json_and_csv() {
        let report = river_report();
        let dir = std::env::temp_dir();
        let json_path = dir.join(format!("equity_report_{}.json", std::process::id()));
        let csv_path = dir.join(format!("equity_report_{}.csv", std::process::id()));

        report.save_json(&json_path).unwrap();
        let loaded: EquityReport =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(loaded.equities, report.equities);
        assert_eq!(loaded.hole_cards, report.hole_cards);
        assert_eq!(loaded.board, report.board);

        report.save_csv(&csv_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("seat,hole_cards,equity,win_rate,tie_rate"));
        assert_eq!(lines.next(), Some("0,AhKh,1.000000,1.000000,0.000000"));
        assert_eq!(lines.count(), 1);

        std::fs::remove_file(json_path).ok();
        std::fs::remove_file(csv_path).ok();
    }
}
