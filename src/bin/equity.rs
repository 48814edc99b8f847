//! Hold'em equity calculator.
//!
//! Usage:
//!   cargo run --release --bin equity -- [OPTIONS]
//!
//! Without `--hole`, deals a random hand for `--players` seats and prints
//! every player's equity on each street. With two or more `--hole` arguments,
//! estimates equities for that exact situation (plus an optional `--board`).
//!
//! Examples:
//!   equity --players 6 --seed 42
//!   equity --hole AsAh --hole KdKc --board "Qs 7h 2d"
//!   equity --hole AhKh --hole 7c7d --trials 1000000 --json out.json

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use holdem_equity::cards::{Board, HoleCards, Street};
use holdem_equity::equity::{EquityReport, EquitySimulator, SimulatorConfig};
use holdem_equity::table::Game;

const DEFAULT_PLAYERS: usize = 6;

#[derive(Parser, Debug)]
#[command(
    name = "equity",
    about = "Estimate Texas Hold'em pot equity by Monte Carlo simulation",
    long_about = "Estimate each player's share of the pot by completing the board at random.\n\
                  Deal a random hand street by street, or pass known hole cards with --hole."
)]
struct Args {
    /// Number of players for a randomly dealt hand (2-22, default 6)
    #[arg(short, long, conflicts_with = "holes")]
    players: Option<usize>,

    /// Known hole cards, one per player (e.g. "AsKd"); repeat for each seat
    #[arg(long = "hole")]
    holes: Vec<String>,

    /// Known community cards (0, 3, 4 or 5, e.g. "Qs 7h 2d"); needs --hole
    #[arg(short, long, requires = "holes")]
    board: Option<String>,

    /// Trials per estimate (overrides the config file)
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Random seed for the deal and the simulation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulator configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report(s) to a JSON file
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            SimulatorConfig::from_json_file(path)?
        }
        None => SimulatorConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(threads) = args.threads {
        config.num_threads = Some(threads);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let simulator = EquitySimulator::new(config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let reports = if args.holes.is_empty() {
        play_hand(&simulator, args.players.unwrap_or(DEFAULT_PLAYERS), &mut rng)?
    } else {
        vec![estimate_known(&simulator, args, &mut rng)?]
    };

    if let Some(path) = &args.json {
        match reports.as_slice() {
            [report] => report.save_json(path)?,
            _ => fs::write(path, serde_json::to_string_pretty(&reports)?)?,
        }
        info!("saved {} report(s) to {}", reports.len(), path.display());
    }
    Ok(())
}

/// Deal a random hand and estimate equities on every street.
fn play_hand(
    simulator: &EquitySimulator,
    players: usize,
    rng: &mut StdRng,
) -> Result<Vec<EquityReport>, Box<dyn std::error::Error>> {
    let mut game = Game::new(players, rng)?;
    let mut reports = Vec::with_capacity(4);

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    loop {
        let street = game.advance()?;
        pb.set_message(format!("simulating the {}", street));

        let report = simulator.estimate(&game)?;
        game.set_equities(&report.equities);
        pb.println(render_table(&game, street));
        reports.push(report);
        pb.inc(1);

        if street == Street::River {
            break;
        }
    }

    pb.finish_with_message("hand complete");
    Ok(reports)
}

/// Estimate equities for the hole cards and board given on the command line.
fn estimate_known(
    simulator: &EquitySimulator,
    args: &Args,
    rng: &mut StdRng,
) -> Result<EquityReport, Box<dyn std::error::Error>> {
    let holes = args
        .holes
        .iter()
        .map(|s| s.parse::<HoleCards>())
        .collect::<Result<Vec<_>, _>>()?;
    let board: Board = args.board.as_deref().unwrap_or_default().parse()?;

    let mut game = Game::from_known(holes, board, rng)?;
    let report = simulator.estimate(&game)?;
    game.set_equities(&report.equities);
    println!("{}", render_table(&game, report.street));

    for seat in 0..report.num_players() {
        println!(
            "  seat {}: win {:.2}%  tie {:.2}%",
            seat + 1,
            report.win_rate(seat) * 100.0,
            report.tie_rate(seat) * 100.0
        );
    }
    Ok(report)
}

fn render_table(game: &Game, street: Street) -> String {
    let mut lines = vec![format!("== {} ==", street)];
    for player in game.players() {
        let hole = player
            .hole_cards()
            .map(|h| h.to_string())
            .unwrap_or_else(|| "-- --".to_string());
        let equity = player.equity().unwrap_or(0.0) * 100.0;
        lines.push(format!("Player {}: {} ({:.1}%)", player.seat + 1, hole, equity));
    }
    lines.push(format!("Board: {}", game.board()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_board_requires_hole_cards() {
        let err = Args::try_parse_from(["equity", "--board", "Qs 7h 2d"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let args =
            Args::try_parse_from(["equity", "--hole", "AsAh", "--hole", "KdKc", "-b", "Qs 7h 2d"])
                .unwrap();
        assert_eq!(args.holes, vec!["AsAh", "KdKc"]);
        assert_eq!(args.board.as_deref(), Some("Qs 7h 2d"));
    }

    #[test]
    fn test_players_conflicts_with_hole_cards() {
        let err = Args::try_parse_from(["equity", "--players", "3", "--hole", "AsAh"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let args = Args::try_parse_from(["equity"]).unwrap();
        assert_eq!(args.players, None);
        assert!(args.holes.is_empty());
        assert!(args.board.is_none());
    }
}
