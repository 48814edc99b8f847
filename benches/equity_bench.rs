//! Benchmarks for hand evaluation and equity simulation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdem_equity::cards::{parse_cards, Card};
use holdem_equity::equity::{EquitySimulator, SimulatorConfig};
use holdem_equity::eval::{best_of_7, evaluate_5};
use holdem_equity::table::Game;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cards<const N: usize>(s: &str) -> [Card; N] {
    parse_cards(s).unwrap().try_into().unwrap()
}

fn evaluate_5_benchmark(c: &mut Criterion) {
    let hand: [Card; 5] = cards("Ah Kh Qd Js 9c");
    c.bench_function("evaluate_5", |b| b.iter(|| evaluate_5(black_box(&hand))));
}

fn best_of_7_benchmark(c: &mut Criterion) {
    let hand: [Card; 7] = cards("Ah Kh Qh 7h 2c 2d 9s");
    c.bench_function("best_of_7", |b| b.iter(|| best_of_7(black_box(&hand))));
}

fn simulator_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new(6, &mut rng).unwrap();
    game.deal_hole_cards().unwrap();
    let simulator =
        EquitySimulator::new(SimulatorConfig::new().with_trials(10_000).with_seed(42)).unwrap();

    c.bench_function("preflop_6_players_10k_trials", |b| {
        b.iter(|| simulator.estimate(black_box(&game)).unwrap())
    });
}

criterion_group!(benches, evaluate_5_benchmark, best_of_7_benchmark, simulator_benchmark);
criterion_main!(benches);
