use anyhow::{bail, Context, Result};
use chess_ai::api::{AnalysisNote, DEFAULT_ANALYSIS_DEPTH};
use chess_ai::types::{Color, UciMove};
use chess_ai::{
    analyze_line, hint, select_move, select_move_with, Difficulty, RulesEngine, SearchConfig,
    StandardBoard, STARTING_FEN,
};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Chess move selection, hints and move analysis
#[derive(Parser, Debug)]
#[command(name = "chess_coach", version, about)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick a move for the side to move
    Select {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// easy, medium, hard, expert or 1-4
        #[arg(long, default_value = "medium")]
        level: Difficulty,
        /// JSON search configuration used instead of the level
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Suggest a move with an explanation
    Hint {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[arg(long)]
        json: bool,
    },
    /// Grade a sequence of moves in long algebraic notation
    Analyze {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[arg(long, num_args = 1.., required = true)]
        moves: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_ANALYSIS_DEPTH)]
        depth: u8,
        #[arg(long)]
        json: bool,
    },
    /// Let two difficulty levels play each other
    Play {
        #[arg(long, default_value = "medium")]
        white: Difficulty,
        #[arg(long, default_value = "medium")]
        black: Difficulty,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_board(fen: &str) -> Result<StandardBoard> {
    StandardBoard::from_fen(fen).with_context(|| format!("Failed to load position '{fen}'"))
}

fn load_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SearchConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate().context("Config rejected")?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_select(fen: &str, level: Difficulty, config: Option<&Path>, json: bool) -> Result<()> {
    let mut board = load_board(fen)?;
    let config = match config {
        Some(path) => load_config(path)?,
        None => level.config(),
    };
    let mover = board.side_to_move();
    let outcome = select_move_with(&mut board, &config, mover).context("Search failed")?;

    if json {
        return print_json(&outcome);
    }
    match outcome.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    println!(
        "score {} depth {} source {:?} nodes {} qnodes {} time {}ms",
        outcome.score,
        outcome.depth,
        outcome.source,
        outcome.stats.nodes,
        outcome.stats.qnodes,
        outcome.elapsed.as_millis()
    );
    Ok(())
}

fn run_hint(fen: &str, json: bool) -> Result<()> {
    let mut board = load_board(fen)?;
    let Some(hint) = hint(&mut board).context("Hint search failed")? else {
        println!("No legal moves");
        return Ok(());
    };
    if json {
        return print_json(&hint);
    }
    println!("{} ({:+})", hint.best_move, hint.gain);
    println!("{hint}");
    Ok(())
}

fn run_analyze(fen: &str, moves: &[String], depth: u8, json: bool) -> Result<()> {
    let mut board = load_board(fen)?;
    let line = moves
        .iter()
        .map(|m| m.parse::<UciMove>())
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to parse move list")?;
    let analyses = analyze_line(&mut board, &line, depth).context("Analysis failed")?;

    if json {
        return print_json(&analyses);
    }
    for (i, analysis) in analyses.iter().enumerate() {
        let best = analysis
            .best
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        println!(
            "{:>3}. {:<6} {:<14} loss {:>5}  best {best}",
            i + 1,
            analysis.played.to_string(),
            analysis.quality.to_string(),
            analysis.loss
        );
        let notes: Vec<String> = analysis.notes.iter().map(AnalysisNote::to_string).collect();
        if !notes.is_empty() {
            println!("     {}", notes.join("; "));
        }
    }
    Ok(())
}

fn run_play(fen: &str, white: Difficulty, black: Difficulty, max_plies: u32) -> Result<()> {
    let mut board = load_board(fen)?;
    info!(%white, %black, max_plies, "starting game");

    for ply in 0..max_plies {
        if board.is_terminal() {
            break;
        }
        let mover = board.side_to_move();
        let level = match mover {
            Color::White => white,
            Color::Black => black,
        };
        let Some(mv) = select_move(&mut board, level, mover)
            .with_context(|| format!("Search failed at ply {ply}"))?
        else {
            break;
        };
        board
            .apply_move(&mv)
            .with_context(|| format!("Engine produced an illegal move {mv}"))?;
        debug!(ply, %mover, mv = %mv, "played");
        println!("{:>3}. {:<5} {mv}", ply + 1, mover.to_string());
    }

    if board.is_checkmate() {
        println!("Checkmate, {} wins", board.side_to_move().opponent());
    } else if board.is_draw() {
        println!("Draw");
    } else {
        println!("Unfinished after {max_plies} plies");
    }
    println!("{}", board.serialize());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Select {
            fen,
            level,
            config,
            json,
        } => run_select(&fen, level, config.as_deref(), json),
        Command::Hint { fen, json } => run_hint(&fen, json),
        Command::Analyze {
            fen,
            moves,
            depth,
            json,
        } => {
            if depth == 0 {
                bail!("--depth must be at least 1");
            }
            run_analyze(&fen, &moves, depth, json)
        }
        Command::Play {
            white,
            black,
            max_plies,
            fen,
        } => run_play(&fen, white, black, max_plies),
    }
}
