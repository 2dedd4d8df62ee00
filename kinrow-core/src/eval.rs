//! Heuristic evaluation for positions where search is cut off

use crate::board::{Board, Cell, Mark, Square, LINE_DIRECTIONS};
use crate::game::{Game, KInARow};

/// Estimate of a non-terminal state's value to `player`.
///
/// Only consulted when the cutoff triggers. Values should stay strictly
/// inside the game's utility range so a heuristic never outranks a real win.
pub trait Heuristic<G: Game> {
    fn evaluate(&self, state: &G::State, player: G::Player) -> f64;
}

impl<G, F> Heuristic<G> for F
where
    G: Game,
    F: Fn(&G::State, G::Player) -> f64,
{
    fn evaluate(&self, state: &G::State, player: G::Player) -> f64 {
        self(state, player)
    }
}

/// Scores every non-terminal position as 0. With a cutoff that is never
/// reached this turns depth-bounded search into exhaustive search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl<G: Game> Heuristic<G> for ZeroHeuristic {
    fn evaluate(&self, _state: &G::State, _player: G::Player) -> f64 {
        0.0
    }
}

// ============================================================================
// OPEN LINES
// ============================================================================

/// Counts the length-`k` windows still winnable by each side.
///
/// A window holding only `player`'s marks adds `n^2` for its `n` marks; one
/// holding only opponent marks subtracts the same. The sum is normalized by
/// the largest possible total so the result lies in (-1, 1).
#[derive(Clone, Copy, Debug)]
pub struct OpenLines {
    k: u32,
}

impl OpenLines {
    pub fn new(k: u32) -> Self {
        Self { k }
    }

    pub fn for_game(game: &KInARow) -> Self {
        Self::new(game.k())
    }

    /// Raw (unnormalized) score and the number of windows inspected
    fn score(&self, board: &Board, player: Mark) -> (i64, usize) {
        if self.k > board.width().max(board.height()) {
            return (0, 0);
        }
        let Ok(k) = i32::try_from(self.k) else {
            return (0, 0);
        };
        let mut total = 0i64;
        let mut windows = 0usize;

        for y in board.rows() {
            for x in board.columns() {
                let start = Square::new(x, y);
                for &dir in &LINE_DIRECTIONS {
                    if board.lookup(start.offset(dir, k - 1)) == Cell::Off {
                        continue;
                    }
                    windows += 1;
                    total += window_score(board, player, start, dir, k);
                }
            }
        }

        (total, windows)
    }
}

fn window_score(board: &Board, player: Mark, start: Square, dir: (i32, i32), k: i32) -> i64 {
    let mut mine = 0i64;
    let mut theirs = 0i64;
    for n in 0..k {
        match board.lookup(start.offset(dir, n)) {
            Cell::Mark(mark) if mark == player => mine += 1,
            Cell::Mark(_) => theirs += 1,
            _ => {}
        }
    }

    match (mine, theirs) {
        (m, 0) => m * m,
        (0, t) => -(t * t),
        _ => 0,
    }
}

impl Heuristic<KInARow> for OpenLines {
    fn evaluate(&self, board: &Board, player: Mark) -> f64 {
        let (total, windows) = self.score(board, player);
        if windows == 0 {
            return 0.0;
        }
        let bound = (windows as i64 * (self.k as i64).pow(2) + 1) as f64;
        total as f64 / bound
    }
}

/// The heuristics a configured player can pick from
#[derive(Clone, Copy, Debug)]
pub enum BoardHeuristic {
    Zero,
    Lines(OpenLines),
}

impl BoardHeuristic {
    pub fn lines(game: &KInARow) -> Self {
        BoardHeuristic::Lines(OpenLines::for_game(game))
    }
}

impl Heuristic<KInARow> for BoardHeuristic {
    fn evaluate(&self, board: &Board, player: Mark) -> f64 {
        match self {
            BoardHeuristic::Zero => 0.0,
            BoardHeuristic::Lines(lines) => lines.evaluate(board, player),
        }
    }
}
