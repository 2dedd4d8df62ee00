//! Board model: squares, marks and the immutable position type

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Grid coordinates, x to the right and y downward from the top-left corner.
///
/// Signed so that line walks can step past the edges and read [`Cell::Off`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step `n` squares along direction `(dx, dy)`
    pub fn offset(&self, (dx, dy): (i32, i32), n: i32) -> Square {
        Square::new(
            self.x.saturating_add(dx.saturating_mul(n)),
            self.y.saturating_add(dy.saturating_mul(n)),
        )
    }
}

/// Row-major: top row first, left to right within a row
impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four undirected line orientations as (dx, dy).
/// Index: 0=vertical, 1=horizontal, 2=diagonal, 3=anti-diagonal
pub const LINE_DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // |
    (1, 0),  // -
    (1, 1),  // \
    (1, -1), // /
];

/// Player mark. `X` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of looking up a square
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Mark(Mark),
    Empty,
    Off,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Mark(mark) => mark.symbol(),
            Cell::Empty => '.',
            Cell::Off => '#',
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// A position: dimensions, side to move, occupied squares and the cached
/// utility of the move that produced it.
///
/// Boards are never mutated after construction; every transition goes through
/// [`Board::with_changes`]. Equality and hashing only look at `to_move` and
/// the occupied squares, so the same position reached through different move
/// orders is one cache key.
#[derive(Clone, Debug)]
pub struct Board {
    width: u32,
    height: u32,
    to_move: Mark,
    /// Occupied squares only (sparse, canonically ordered)
    squares: BTreeMap<Square, Mark>,
    /// +1 if X has won, -1 if O has won, 0 otherwise
    utility: i8,
}

impl Board {
    /// Empty board with `to_move` to play
    pub fn new(width: u32, height: u32, to_move: Mark) -> Self {
        Self {
            width,
            height,
            to_move,
            squares: BTreeMap::new(),
            utility: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Cached utility from X's point of view
    pub fn utility(&self) -> i8 {
        self.utility
    }

    pub fn contains(&self, square: Square) -> bool {
        square.x >= 0
            && square.y >= 0
            && i64::from(square.x) < i64::from(self.width)
            && i64::from(square.y) < i64::from(self.height)
    }

    /// Column coordinates, saturated at `i32::MAX`
    pub fn columns(&self) -> Range<i32> {
        0..i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Row coordinates, saturated at `i32::MAX`
    pub fn rows(&self) -> Range<i32> {
        0..i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    /// Look up a square, distinguishing empty squares from squares off the board
    pub fn lookup(&self, square: Square) -> Cell {
        match self.squares.get(&square) {
            Some(&mark) => Cell::Mark(mark),
            None if self.contains(square) => Cell::Empty,
            None => Cell::Off,
        }
    }

    /// Iterate occupied squares in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Mark)> + '_ {
        self.squares.iter().map(|(&square, &mark)| (square, mark))
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares.contains_key(&square)
    }

    pub fn occupied_count(&self) -> usize {
        self.squares.len()
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn empty_count(&self) -> usize {
        self.area() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.area()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Copy this board, apply `changes` on top of the occupied squares and
    /// optionally override the side to move. The cached utility is reset.
    pub fn with_changes<I>(&self, changes: I, to_move: Option<Mark>) -> Board
    where
        I: IntoIterator<Item = (Square, Mark)>,
    {
        let mut squares = self.squares.clone();
        squares.extend(changes);

        Board {
            width: self.width,
            height: self.height,
            to_move: to_move.unwrap_or(self.to_move),
            squares,
            utility: 0,
        }
    }

    /// Same board with the cached utility set
    pub(crate) fn with_utility(mut self, utility: i8) -> Board {
        self.utility = utility;
        self
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.to_move == other.to_move && self.squares == other.squares
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_move.hash(state);
        self.squares.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.rows() {
            let row: Vec<String> = self
                .columns()
                .map(|x| self.lookup(Square::new(x, y)).symbol().to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHasher;

    fn fx_hash(board: &Board) -> u64 {
        let mut hasher = FxHasher::default();
        board.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_lookup_sentinels() {
        let board = Board::new(3, 2, Mark::X).with_changes([(Square::new(1, 1), Mark::O)], None);
        assert_eq!(board.lookup(Square::new(1, 1)), Cell::Mark(Mark::O));
        assert_eq!(board.lookup(Square::new(0, 0)), Cell::Empty);
        assert_eq!(board.lookup(Square::new(2, 1)), Cell::Empty);
        assert_eq!(board.lookup(Square::new(3, 0)), Cell::Off);
        assert_eq!(board.lookup(Square::new(0, 2)), Cell::Off);
        assert_eq!(board.lookup(Square::new(-1, 0)), Cell::Off);
    }

    #[test]
    fn test_contains_on_huge_board() {
        let board = Board::new(u32::MAX, 2, Mark::X);
        assert!(board.contains(Square::new(i32::MAX, 1)));
        assert!(!board.contains(Square::new(0, 2)));
        assert!(!board.contains(Square::new(-1, 0)));
        assert_eq!(board.lookup(Square::new(i32::MAX, 0)), Cell::Empty);
        assert_eq!(board.columns(), 0..i32::MAX);
        assert_eq!(board.rows(), 0..2);
    }

    #[test]
    fn test_with_changes_leaves_original_untouched() {
        let board = Board::new(3, 3, Mark::X);
        let next = board.with_changes([(Square::new(0, 0), Mark::X)], Some(Mark::O));

        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.to_move(), Mark::X);
        assert_eq!(next.occupied_count(), 1);
        assert_eq!(next.to_move(), Mark::O);
    }

    #[test]
    fn test_with_changes_overrides_existing() {
        let board = Board::new(3, 3, Mark::X).with_changes([(Square::new(0, 0), Mark::X)], None);
        let next = board.with_changes([(Square::new(0, 0), Mark::O)], None);
        assert_eq!(next.lookup(Square::new(0, 0)), Cell::Mark(Mark::O));
        assert_eq!(next.to_move(), Mark::X);
    }

    #[test]
    fn test_equality_ignores_move_order() {
        let empty = Board::new(3, 3, Mark::X);
        let a = empty
            .with_changes([(Square::new(0, 0), Mark::X)], None)
            .with_changes([(Square::new(2, 2), Mark::O)], None);
        let b = empty
            .with_changes([(Square::new(2, 2), Mark::O)], None)
            .with_changes([(Square::new(0, 0), Mark::X)], None);

        assert_eq!(a, b);
        assert_eq!(fx_hash(&a), fx_hash(&b));
    }

    #[test]
    fn test_equality_depends_on_to_move() {
        let a = Board::new(3, 3, Mark::X);
        let b = Board::new(3, 3, Mark::O);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_cached_utility() {
        let a = Board::new(3, 3, Mark::X);
        let b = a.clone().with_utility(1);
        assert_eq!(a, b);
        assert_eq!(fx_hash(&a), fx_hash(&b));
    }

    #[test]
    fn test_conservation() {
        let board = Board::new(4, 3, Mark::X)
            .with_changes([(Square::new(0, 0), Mark::X), (Square::new(3, 2), Mark::O)], None);
        assert_eq!(board.occupied_count() + board.empty_count(), 12);
        assert!(!board.is_full());
    }

    #[test]
    fn test_display() {
        let board = Board::new(3, 2, Mark::X)
            .with_changes([(Square::new(0, 0), Mark::X), (Square::new(2, 1), Mark::O)], None);
        assert_eq!(board.to_string(), "X . .\n. . O\n");
    }
}
