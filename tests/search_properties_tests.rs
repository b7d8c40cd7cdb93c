//! Integration tests for the move-selection engine
//!
//! Checks the search and evaluation contracts over a fixed suite of
//! positions through the public API only, the way a front end uses it.

use chess_ai::constants::{MATE_SCORE, SCORE_INFINITY};
use chess_ai::search::{find_best_move, minimax, OrderingStrategy, SearchContext};
use chess_ai::tactics::{find_forced_mate, find_safe_capture};
use chess_ai::types::Color;
use chess_ai::{
    evaluate_position, select_move, select_move_with, Difficulty, Evaluator, MoveFilter,
    MoveSource, RulesEngine, SearchConfig, SearchStrategy, StandardBoard, TermSet,
};

// ============================================================================
// Positions
// ============================================================================

/// Checkmated positions and the colour that is mated
const MATED: [(&str, Color); 2] = [
    ("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", Color::Black),
    (
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        Color::White,
    ),
];

const DRAWN: [&str; 3] = [
    "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    "8/8/4k3/8/8/3K4/8/8 w - - 0 1",
    "8/8/4k3/8/8/3KN3/8/8 w - - 0 1",
];

/// Small positions where a full minimax tree stays cheap
const SMALL: [&str; 4] = [
    "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1",
    "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
    "4k3/8/2p5/3p4/8/8/3R4/4K3 w - - 0 1",
    "8/5k2/8/3P4/8/8/5K2/8 b - - 0 50",
];

const MIDDLEGAME: [&str; 2] = [
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "r3k2r/pp3ppp/2n5/3q4/8/2N5/PP3PPP/R2QK2R b KQkq - 0 12",
];

fn board(fen: &str) -> StandardBoard {
    StandardBoard::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {fen}: {e}"))
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_checkmate_scores_are_symmetric() {
    //! The mated side sees -MATE_SCORE, the other side +MATE_SCORE

    for (fen, mated) in MATED {
        let board = board(fen);
        assert!(board.is_checkmate(), "{fen}");
        assert_eq!(evaluate_position(&board, mated), -MATE_SCORE, "{fen}");
        assert_eq!(evaluate_position(&board, mated.opponent()), MATE_SCORE, "{fen}");
    }
}

#[test]
fn test_draws_score_zero_for_both_sides() {
    //! Stalemate and insufficient material are exactly 0 from either side

    for fen in DRAWN {
        let board = board(fen);
        for color in Color::ALL {
            assert_eq!(evaluate_position(&board, color), 0, "{fen} as {color}");
        }
    }
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_alphabeta_equals_minimax_up_to_depth_three() {
    //! Pruning must never change the root value, from either perspective

    let evaluator = Evaluator::new(TermSet::BASIC);
    for fen in SMALL {
        for depth in 1..=3 {
            for perspective in Color::ALL {
                let mut board = board(fen);
                let maximizing = board.side_to_move() == perspective;
                let reference = minimax(&mut board, depth, maximizing, perspective, &evaluator).unwrap();

                let mut ctx = SearchContext::new(evaluator, OrderingStrategy::Heuristic);
                let (_, score) = find_best_move(&mut board, depth, perspective, &mut ctx).unwrap();
                assert_eq!(score, reference, "{fen} depth {depth} as {perspective}");
            }
        }
    }
}

#[test]
fn test_depth_one_score_dominates_every_alternative() {
    //! The depth-1 choice scores at least as well as any single move

    for fen in SMALL.iter().chain(MIDDLEGAME.iter()) {
        let mut board = board(fen);
        let perspective = board.side_to_move();
        let evaluator = Evaluator::new(TermSet::BASIC);

        let mut best_alternative = -SCORE_INFINITY;
        for mv in board.legal_moves(MoveFilter::All) {
            board.apply_move(&mv).unwrap();
            best_alternative = best_alternative.max(evaluator.evaluate(&board, perspective));
            board.undo_move().unwrap();
        }

        let mut ctx = SearchContext::new(evaluator, OrderingStrategy::Heuristic);
        let (mv, score) = find_best_move(&mut board, 1, perspective, &mut ctx).unwrap();
        assert!(mv.is_some(), "{fen}");
        assert_eq!(score, best_alternative, "{fen}");
    }
}

#[test]
fn test_apply_undo_restores_every_position() {
    //! Applying and undoing any legal move restores the exact FEN

    for fen in SMALL.iter().chain(MIDDLEGAME.iter()) {
        let mut board = board(fen);
        let before = board.serialize();
        for mv in board.legal_moves(MoveFilter::All) {
            board.apply_move(&mv).unwrap();
            board.undo_move().unwrap();
            assert_eq!(board.serialize(), before, "{fen} after {mv}");
        }
    }
}

#[test]
fn test_search_leaves_position_unchanged() {
    //! Every selection path hands the position back untouched

    let quick_expert = SearchConfig {
        strategy: SearchStrategy::IterativeTimeBoxed {
            max_depth: 3,
            budget_ms: 50,
            tactical_shortcuts: true,
        },
        ..Difficulty::Expert.config()
    };

    for fen in MIDDLEGAME {
        let mut board = board(fen);
        let before = board.serialize();
        let mover = board.side_to_move();
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            select_move(&mut board, difficulty, mover).unwrap();
            assert_eq!(board.serialize(), before, "{difficulty}");
        }
        select_move_with(&mut board, &quick_expert, mover).unwrap();
        assert_eq!(board.serialize(), before, "expert");
    }
}

#[test]
fn test_fixed_depth_levels_are_deterministic() {
    //! Levels without a time budget always pick the same move

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let fen = MIDDLEGAME[0];
        let first = select_move(&mut board(fen), difficulty, Color::White).unwrap();
        let second = select_move(&mut board(fen), difficulty, Color::White).unwrap();
        assert!(first.is_some());
        assert_eq!(first, second, "{difficulty}");
    }
}

#[test]
fn test_ordering_strategies_agree_on_score() {
    //! Move ordering only changes how much of the tree is visited

    for fen in MIDDLEGAME {
        let scores: Vec<_> = [
            OrderingStrategy::Heuristic,
            OrderingStrategy::StaticEval,
            OrderingStrategy::None,
        ]
        .into_iter()
        .map(|ordering| {
            let mut board = board(fen);
            let perspective = board.side_to_move();
            let mut ctx = SearchContext::new(Evaluator::new(TermSet::POSITIONAL), ordering);
            find_best_move(&mut board, 2, perspective, &mut ctx).unwrap().1
        })
        .collect();
        assert!(scores.windows(2).all(|w| w[0] == w[1]), "{fen}: {scores:?}");
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_rook_mate_found_by_forced_mate_finder() {
    //! King and rook against king: Ra8 is mate

    let mut board = board("6k1/8/6K1/8/8/8/8/R7 w - - 0 1");
    let mv = find_forced_mate(&mut board).unwrap().expect("Should find mate");
    board.apply_move(&mv).unwrap();
    assert!(board.is_checkmate(), "{mv} should mate");
}

#[test]
fn test_hanging_queen_taken_by_safe_capture() {
    //! An undefended queen is captured without further search

    let mut board = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let mut ctx = Difficulty::Expert.config().context();
    let mv = find_safe_capture(&mut board, Color::White, &mut ctx).unwrap();
    assert_eq!(mv.map(|m| m.to_string()).as_deref(), Some("d2d5"));
}

#[test]
fn test_zero_budget_still_returns_legal_move() {
    //! Depth 1 always completes, however small the budget

    let config = SearchConfig {
        strategy: SearchStrategy::IterativeTimeBoxed {
            max_depth: 6,
            budget_ms: 0,
            tactical_shortcuts: false,
        },
        ..Difficulty::Expert.config()
    };
    let mut board = board(MIDDLEGAME[1]);
    let mover = board.side_to_move();
    let outcome = select_move_with(&mut board, &config, mover).unwrap();

    assert_eq!(outcome.source, MoveSource::Search);
    assert_eq!(outcome.depth, 1);
    let mv = outcome.best_move.expect("Should return a move");
    assert!(board.legal_moves(MoveFilter::All).contains(&mv));
}

#[test]
fn test_mated_side_gets_no_move() {
    //! No legal moves is a normal outcome, not an error

    for (fen, mated) in MATED {
        let mut board = board(fen);
        for difficulty in Difficulty::ALL {
            assert_eq!(select_move(&mut board, difficulty, mated).unwrap(), None, "{fen}");
        }
    }
}
