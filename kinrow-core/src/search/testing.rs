//! Small games for exercising the search engine in tests

use crate::error::GameError;
use crate::game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RaceState {
    pub total: u32,
    pub to_move: Side,
}

/// Players alternately add 1 or 3 to a shared total; whoever brings it to
/// `target` or beyond wins.
///
/// Unlike k-in-a-row, one position can sit at different depths below the
/// root: a total of 3 with B to move follows both `[3]` and `[1, 1, 1]`.
pub struct Race {
    pub target: u32,
}

impl Game for Race {
    type State = RaceState;
    type Move = u32;
    type Player = Side;

    fn initial(&self) -> RaceState {
        RaceState {
            total: 0,
            to_move: Side::A,
        }
    }

    fn to_move(&self, state: &RaceState) -> Side {
        state.to_move
    }

    fn actions(&self, state: &RaceState) -> Vec<u32> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            vec![1, 3]
        }
    }

    fn result(&self, state: &RaceState, mv: u32) -> Result<RaceState, GameError> {
        if self.is_terminal(state) {
            return Err(GameError::GameOver);
        }
        Ok(RaceState {
            total: state.total + mv,
            to_move: state.to_move.opponent(),
        })
    }

    fn is_terminal(&self, state: &RaceState) -> bool {
        state.total >= self.target
    }

    fn utility(&self, state: &RaceState, player: Side) -> Result<f64, GameError> {
        if !self.is_terminal(state) {
            return Err(GameError::NotTerminal);
        }
        let winner = state.to_move.opponent();
        Ok(if player == winner { 1.0 } else { -1.0 })
    }
}

/// A game whose only position claims to be ongoing yet offers no moves
pub struct Stuck;

impl Game for Stuck {
    type State = u8;
    type Move = u8;
    type Player = u8;

    fn initial(&self) -> u8 {
        0
    }

    fn to_move(&self, _state: &u8) -> u8 {
        0
    }

    fn actions(&self, _state: &u8) -> Vec<u8> {
        Vec::new()
    }

    fn result(&self, _state: &u8, _mv: u8) -> Result<u8, GameError> {
        Err(GameError::IllegalMove("no moves exist".to_string()))
    }

    fn is_terminal(&self, _state: &u8) -> bool {
        false
    }

    fn utility(&self, _state: &u8, _player: u8) -> Result<f64, GameError> {
        Err(GameError::NotTerminal)
    }
}
