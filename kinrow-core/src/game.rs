//! Game abstraction and the k-in-a-row variant

use std::fmt::Debug;
use std::hash::Hash;

use crate::board::{Board, Mark, Square};
use crate::error::GameError;
use crate::win::has_k_in_row;

// ============================================================================
// GAME TRAIT
// ============================================================================

/// A two-player, zero-sum, perfect-information, turn-taking game.
///
/// States must be cheap to compare and hash: the search engine uses them as
/// memoization keys, so logically identical positions must be equal.
pub trait Game {
    type State: Clone + Eq + Hash + Debug;
    type Move: Copy + Eq + Debug;
    type Player: Copy + Eq + Hash + Debug;

    /// Starting position
    fn initial(&self) -> Self::State;

    /// Player whose turn it is in `state`
    fn to_move(&self, state: &Self::State) -> Self::Player;

    /// Legal moves from `state`, in a deterministic order
    fn actions(&self, state: &Self::State) -> Vec<Self::Move>;

    /// State reached by playing `mv` from `state`
    fn result(&self, state: &Self::State, mv: Self::Move) -> Result<Self::State, GameError>;

    /// True if the game is over
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.actions(state).is_empty()
    }

    /// Value of a terminal `state` to `player`
    fn utility(&self, state: &Self::State, player: Self::Player) -> Result<f64, GameError>;
}

// ============================================================================
// K-IN-A-ROW
// ============================================================================

/// Largest board `KInARow::new` accepts, in squares
pub const MAX_BOARD_SQUARES: u64 = 1 << 20;

/// Place marks on a `width` x `height` grid; the first to get `k` in a row
/// (horizontally, vertically or diagonally) wins. `X` moves first.
#[derive(Clone, Debug)]
pub struct KInARow {
    width: u32,
    height: u32,
    k: u32,
    /// All legal squares, row-major
    squares: Vec<Square>,
}

impl KInARow {
    pub fn new(width: u32, height: u32, k: u32) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if k == 0 {
            return Err(GameError::InvalidConfig(
                "run length k must be positive".to_string(),
            ));
        }

        let area = u64::from(width) * u64::from(height);
        if area > MAX_BOARD_SQUARES {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} has {} squares, more than the limit of {}",
                width, height, area, MAX_BOARD_SQUARES
            )));
        }
        let (Ok(cols), Ok(rows)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(GameError::InvalidConfig(format!(
                "board dimensions {}x{} exceed the coordinate range",
                width, height
            )));
        };

        let squares = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Square::new(x, y)))
            .collect();

        Ok(Self {
            width,
            height,
            k,
            squares,
        })
    }

    /// Classic 3x3 tic-tac-toe
    pub fn tic_tac_toe() -> Self {
        Self {
            width: 3,
            height: 3,
            k: 3,
            squares: (0..3)
                .flat_map(|y| (0..3).map(move |x| Square::new(x, y)))
                .collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Build a position by playing `moves` in order from the initial board
    pub fn play_moves(&self, moves: &[Square]) -> Result<Board, GameError> {
        moves
            .iter()
            .try_fold(self.initial(), |board, &square| self.result(&board, square))
    }
}

impl Game for KInARow {
    type State = Board;
    type Move = Square;
    type Player = Mark;

    fn initial(&self) -> Board {
        Board::new(self.width, self.height, Mark::X)
    }

    fn to_move(&self, board: &Board) -> Mark {
        board.to_move()
    }

    fn actions(&self, board: &Board) -> Vec<Square> {
        self.squares
            .iter()
            .copied()
            .filter(|&square| !board.is_occupied(square))
            .collect()
    }

    fn result(&self, board: &Board, square: Square) -> Result<Board, GameError> {
        if self.is_terminal(board) {
            return Err(GameError::GameOver);
        }
        if !board.contains(square) {
            return Err(GameError::IllegalMove(format!(
                "square {} is off the {}x{} board",
                square, self.width, self.height
            )));
        }
        if board.is_occupied(square) {
            return Err(GameError::IllegalMove(format!(
                "square {} is already occupied",
                square
            )));
        }

        let player = board.to_move();
        let next = board.with_changes([(square, player)], Some(player.opponent()));

        let utility = if !has_k_in_row(&next, player, square, self.k) {
            0
        } else if player == Mark::X {
            1
        } else {
            -1
        };

        Ok(next.with_utility(utility))
    }

    fn is_terminal(&self, board: &Board) -> bool {
        board.utility() != 0 || board.occupied_count() == self.squares.len()
    }

    fn utility(&self, board: &Board, player: Mark) -> Result<f64, GameError> {
        if !self.is_terminal(board) {
            return Err(GameError::NotTerminal);
        }
        let value = f64::from(board.utility());
        Ok(match player {
            Mark::X => value,
            Mark::O => -value,
        })
    }
}
