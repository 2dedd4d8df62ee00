//! Play command - play games of k-in-a-row between two strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: configuration and formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use kinrow_core::{
    play_game, Board, Game, HeuristicKind, KInARow, Mark, PlayerConfig, Square, Strategies,
    Strategy,
};

use crate::board_args::BoardArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Strategy for X: minimax (m), alphabeta (a) or random (r)
    #[arg(long, default_value = "alphabeta")]
    pub x: Strategy,

    /// Strategy for O: minimax (m), alphabeta (a) or random (r)
    #[arg(long, default_value = "random")]
    pub o: Strategy,

    /// Search depth in plies (defaults: minimax 6, alphabeta 12)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Evaluation for cut-off positions: zero or lines
    #[arg(long, default_value = "zero")]
    pub heuristic: HeuristicKind,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not log each move and board
    #[arg(long)]
    pub quiet: bool,
}

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    XWins,
    OWins,
    Draw,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct PlayedGame {
    game_number: usize,
    outcome: Outcome,
    moves: Vec<Square>,
    final_board: Board,
}

/// Aggregated results over all games
#[derive(Clone, Debug)]
struct SeriesResults {
    games: Vec<PlayedGame>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game from the board options
/// 2. Play the requested number of games
/// 3. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let game = args.board.build_game()?;

    tracing::info!(
        "Starting {} game(s) on {}x{} (k={}): X={} vs O={}",
        args.games,
        game.width(),
        game.height(),
        game.k(),
        args.x,
        args.o
    );

    let results = play_series(&game, &args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; X always moves first
fn play_series(game: &KInARow, args: &PlayArgs, seed: Option<u64>) -> Result<SeriesResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let x = player_config(args.x, args, &mut rng);
        let o = player_config(args.o, args, &mut rng);

        let record = play_single_game(game, &x, &o, game_num + 1, !args.quiet)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves.len()
        );

        games.push(record);
    }

    Ok(compute_statistics(games))
}

fn report_results(results: &SeriesResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    game: &KInARow,
    x: &PlayerConfig,
    o: &PlayerConfig,
    game_number: usize,
    verbose: bool,
) -> Result<PlayedGame> {
    let mut strategies: Strategies<KInARow> = Strategies::default();
    strategies.insert(Mark::X, x.build_policy(game));
    strategies.insert(Mark::O, o.build_policy(game));

    let record = play_game(game, &mut strategies, verbose)
        .with_context(|| format!("Game {} failed", game_number))?;

    let utility = game.utility(&record.final_state, Mark::X)?;
    let outcome = if utility > 0.0 {
        Outcome::XWins
    } else if utility < 0.0 {
        Outcome::OWins
    } else {
        Outcome::Draw
    };

    Ok(PlayedGame {
        game_number,
        outcome,
        moves: record.moves.into_iter().map(|(_, mv)| mv).collect(),
        final_board: record.final_state,
    })
}

fn compute_statistics(games: Vec<PlayedGame>) -> SeriesResults {
    let count = |outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let x_wins = count(Outcome::XWins);
    let o_wins = count(Outcome::OWins);
    let draws = count(Outcome::Draw);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    SeriesResults {
        games,
        x_wins,
        o_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Player config for one game; random players get their own seed
fn player_config(strategy: Strategy, args: &PlayArgs, rng: &mut ChaCha8Rng) -> PlayerConfig {
    let mut config = PlayerConfig::new(strategy)
        .with_heuristic(args.heuristic)
        .with_seed(rng.gen());
    if let Some(depth) = args.depth {
        config = config.with_depth(depth);
    }
    config
}

fn percent(n: usize, total: usize) -> f32 {
    if total > 0 {
        n as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &SeriesResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: String,
        moves: Vec<[i32; 2]>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: format!("{:?}", g.outcome),
                moves: g.moves.iter().map(|sq| [sq.x, sq.y]).collect(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &SeriesResults) {
    let total = results.games.len();

    println!("\n=== Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves",
            game.game_number,
            game.outcome,
            game.moves.len()
        );
        print!("{}", game.final_board);
    }
}

// ============================================================================
// TESTS
// ============================================================================
