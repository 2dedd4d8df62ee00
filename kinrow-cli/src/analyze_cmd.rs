//! Analyze command - compare minimax and alpha-beta on one position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_position(), analyze_position(), report_results()
//! - Level 3: run_search()
//! - Level 4: timing and formatting utilities

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use kinrow_core::{
    AlphaBeta, Board, DepthCutoff, Game, HeuristicKind, KInARow, Minimax, SearchAlgorithm,
    SearchStats, Square, Strategy,
};

use crate::board_args::BoardArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Search depth in plies (defaults: minimax 6, alphabeta 12)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Evaluation for cut-off positions: zero or lines
    #[arg(long, default_value = "zero")]
    pub heuristic: HeuristicKind,

    /// JSON file with moves played so far, e.g. {"moves": [[1, 1], [0, 0]]}
    #[arg(long, value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Moves leading to the position to analyze, X first
#[derive(Debug, Deserialize)]
struct PositionFile {
    moves: Vec<[i32; 2]>,
}

/// Outcome of one search
#[derive(Clone, Debug)]
struct Analysis {
    algorithm: &'static str,
    depth: u32,
    value: f64,
    best_move: Option<Square>,
    stats: SearchStats,
    elapsed: Duration,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run analyze command
///
/// 1. Build the game and the position to search
/// 2. Search it with both algorithms
/// 3. Report results
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let game = args.board.build_game()?;
    let board = load_position(&game, args.position.as_deref())?;

    tracing::info!(
        "Analyzing {}x{} (k={}) position, {} to move",
        game.width(),
        game.height(),
        game.k(),
        board.to_move()
    );

    let results = analyze_position(&game, &board, args.depth, args.heuristic)?;

    report_results(&board, &results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_position(game: &KInARow, path: Option<&Path>) -> Result<Board> {
    let Some(path) = path else {
        return Ok(game.initial());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read position: {}", path.display()))?;
    let position: PositionFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse position: {}", path.display()))?;

    let moves: Vec<Square> = position
        .moves
        .iter()
        .map(|&[x, y]| Square::new(x, y))
        .collect();
    let board = game
        .play_moves(&moves)
        .with_context(|| format!("Position {} is not reachable", path.display()))?;

    Ok(board)
}

fn analyze_position(
    game: &KInARow,
    board: &Board,
    depth: Option<u32>,
    heuristic: HeuristicKind,
) -> Result<Vec<Analysis>> {
    let eval = heuristic.build(game);

    let minimax_depth = depth.unwrap_or(Strategy::Minimax.default_depth());
    let minimax = Minimax::new(DepthCutoff::new(minimax_depth), eval);
    let alphabeta_depth = depth.unwrap_or(Strategy::AlphaBeta.default_depth());
    let alphabeta = AlphaBeta::new(DepthCutoff::new(alphabeta_depth), eval);

    let mut results = Vec::with_capacity(2);
    for (algorithm, depth) in [
        (&minimax as &dyn SearchAlgorithm<KInARow>, minimax_depth),
        (&alphabeta as &dyn SearchAlgorithm<KInARow>, alphabeta_depth),
    ] {
        tracing::info!("Running {} at depth {}...", algorithm.name(), depth);
        let analysis = run_search(algorithm, depth, game, board)?;
        tracing::info!(
            "{}: value {:.3}, {} nodes in {:.2?}",
            analysis.algorithm,
            analysis.value,
            analysis.stats.nodes,
            analysis.elapsed
        );
        results.push(analysis);
    }

    Ok(results)
}

fn report_results(board: &Board, results: &[Analysis], args: &AnalyzeArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(board, results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn run_search(
    algorithm: &dyn SearchAlgorithm<KInARow>,
    depth: u32,
    game: &KInARow,
    board: &Board,
) -> Result<Analysis> {
    let start = Instant::now();
    let result = algorithm
        .search(game, board)
        .with_context(|| format!("{} search failed", algorithm.name()))?;

    Ok(Analysis {
        algorithm: algorithm.name(),
        depth,
        value: result.value,
        best_move: result.best_move,
        stats: result.stats,
        elapsed: start.elapsed(),
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_move(mv: Option<Square>) -> String {
    match mv {
        Some(sq) => sq.to_string(),
        None => "-".to_string(),
    }
}

fn print_json_results(results: &[Analysis]) {
    #[derive(serde::Serialize)]
    struct JsonAnalysis {
        algorithm: &'static str,
        depth: u32,
        value: f64,
        best_move: Option<[i32; 2]>,
        stats: SearchStats,
        elapsed_ms: f64,
    }

    let output: Vec<JsonAnalysis> = results
        .iter()
        .map(|a| JsonAnalysis {
            algorithm: a.algorithm,
            depth: a.depth,
            value: a.value,
            best_move: a.best_move.map(|sq| [sq.x, sq.y]),
            stats: a.stats,
            elapsed_ms: a.elapsed.as_secs_f64() * 1000.0,
        })
        .collect();

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(board: &Board, results: &[Analysis]) {
    println!("\n=== Position ({} to move) ===", board.to_move());
    print!("{}", board);

    println!("\n=== Analysis ===");
    println!(
        "{:<10} {:>5} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8} {:>10}",
        "Algorithm",
        "Depth",
        "Value",
        "Move",
        "Nodes",
        "Hits",
        "Cutoffs",
        "Prunes",
        "Flushes",
        "Time"
    );
    for a in results {
        println!(
            "{:<10} {:>5} {:>8.3} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8} {:>10.2?}",
            a.algorithm,
            a.depth,
            a.value,
            format_move(a.best_move),
            a.stats.nodes,
            a.stats.cache_hits,
            a.stats.cutoffs,
            a.stats.prunes,
            a.stats.flushes,
            a.elapsed
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
