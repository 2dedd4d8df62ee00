//! Line detection through the last square played
//!
//! A move can only create a run through its own square, so only the four
//! lines through `last` are walked. Cost grows with `k`, not board area.

use crate::board::{Board, Cell, Mark, Square, LINE_DIRECTIONS};

/// Count contiguous `mark` cells starting one step from `from` along `dir`.
/// Stops at the first empty, off-board or opposing cell.
fn count_from(board: &Board, mark: Mark, from: Square, dir: (i32, i32)) -> u32 {
    let mut count = 0;
    let mut n = 1;
    while board.lookup(from.offset(dir, n)) == Cell::Mark(mark) {
        count += 1;
        n += 1;
    }
    count
}

/// Length of the `mark` run through `square` along the line `dir`, counting
/// `square` itself.
pub fn run_length(board: &Board, mark: Mark, square: Square, dir: (i32, i32)) -> u32 {
    let back = (-dir.0, -dir.1);
    count_from(board, mark, square, dir) + count_from(board, mark, square, back) + 1
}

/// True if `mark` has at least `k` in a line through `last`
pub fn has_k_in_row(board: &Board, mark: Mark, last: Square, k: u32) -> bool {
    LINE_DIRECTIONS
        .iter()
        .any(|&dir| run_length(board, mark, last, dir) >= k)
}
