//! Move Selection Benchmarks
//!
//! Performance benchmarks for the evaluator, move ordering and search using
//! Criterion.

use chess_ai::search::{find_best_move, OrderingStrategy, SearchContext};
use chess_ai::tactics::find_forced_mate;
use chess_ai::types::Color;
use chess_ai::{
    evaluate_position, select_move, Difficulty, Evaluator, MoveFilter, RulesEngine,
    StandardBoard, TermSet,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MIDDLEGAME: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

fn bench_legal_moves_starting(c: &mut Criterion) {
    let board = StandardBoard::startpos();

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(board.legal_moves(MoveFilter::All)))
    });
}

fn bench_evaluate_position(c: &mut Criterion) {
    let board = StandardBoard::from_fen(MIDDLEGAME).unwrap();

    c.bench_function("evaluate_position_full", |b| {
        b.iter(|| black_box(evaluate_position(&board, Color::White)))
    });

    let basic = Evaluator::new(TermSet::BASIC);
    c.bench_function("evaluate_position_basic", |b| {
        b.iter(|| black_box(basic.evaluate(&board, Color::White)))
    });
}

fn bench_search_depths(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_move");
    group.sample_size(10);

    for depth in [1, 2, 3] {
        group.bench_function(format!("depth_{depth}"), |b| {
            let mut board = StandardBoard::from_fen(MIDDLEGAME).unwrap();
            b.iter(|| {
                let mut ctx =
                    SearchContext::new(Evaluator::new(TermSet::BASIC), OrderingStrategy::Heuristic);
                black_box(find_best_move(&mut board, depth, Color::White, &mut ctx).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_difficulty_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    group.sample_size(10);

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        group.bench_function(difficulty.to_string(), |b| {
            let mut board = StandardBoard::from_fen(MIDDLEGAME).unwrap();
            b.iter(|| black_box(select_move(&mut board, difficulty, Color::White).unwrap()))
        });
    }
    group.finish();
}

fn bench_forced_mate(c: &mut Criterion) {
    let mut board = StandardBoard::from_fen("6k1/8/8/8/8/8/R7/1R4K1 w - - 0 1").unwrap();

    c.bench_function("find_forced_mate_in_two", |b| {
        b.iter(|| black_box(find_forced_mate(&mut board).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_legal_moves_starting,
    bench_evaluate_position,
    bench_search_depths,
    bench_difficulty_levels,
    bench_forced_mate
);
criterion_main!(benches);
