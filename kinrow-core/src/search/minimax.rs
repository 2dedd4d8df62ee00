//! Depth-bounded minimax with memoization

use super::{
    Context, Cutoff, DepthCutoff, SearchAlgorithm, SearchCache, SearchResult,
    DEFAULT_CACHE_CAPACITY,
};
use crate::error::SearchError;
use crate::eval::{Heuristic, ZeroHeuristic};
use crate::game::Game;

/// Default search depth in plies
pub const DEFAULT_MINIMAX_DEPTH: u32 = 6;

/// Which parts of a node make up its memo key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keying {
    /// The same position can be cut off at one depth and expanded at
    /// another, so depth is part of the key
    StateAndDepth,
    /// Unsound; kept to show what goes wrong without depth
    #[cfg(test)]
    StateOnly,
}

/// Minimax search configuration
#[derive(Clone, Debug)]
pub struct Minimax<C, H> {
    pub cutoff: C,
    pub heuristic: H,
    pub cache_capacity: usize,
    keying: Keying,
}

impl<C, H> Minimax<C, H> {
    pub fn new(cutoff: C, heuristic: H) -> Self {
        Self {
            cutoff,
            heuristic,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            keying: Keying::StateAndDepth,
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    #[cfg(test)]
    fn keyed_on_state_only(mut self) -> Self {
        self.keying = Keying::StateOnly;
        self
    }
}

impl Default for Minimax<DepthCutoff, ZeroHeuristic> {
    fn default() -> Self {
        Self::new(DepthCutoff::new(DEFAULT_MINIMAX_DEPTH), ZeroHeuristic)
    }
}

impl<G, C, H> SearchAlgorithm<G> for Minimax<C, H>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    fn name(&self) -> &'static str {
        "minimax"
    }

    /// Search `state` and return its value to the player to move there
    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Move>, SearchError> {
        let mut run = MinimaxRun {
            ctx: Context::new(game, state, &self.cutoff, &self.heuristic),
            keying: self.keying,
            max_cache: SearchCache::with_capacity(self.cache_capacity),
            min_cache: SearchCache::with_capacity(self.cache_capacity),
        };

        let (value, best_move) = run.max_value(state, 0)?;
        let mut stats = run.ctx.stats;
        stats.flushes = run.max_cache.flushes() + run.min_cache.flushes();

        tracing::debug!(
            value,
            nodes = stats.nodes,
            cache_hits = stats.cache_hits,
            flushes = stats.flushes,
            cutoffs = stats.cutoffs,
            "minimax search complete"
        );

        Ok(SearchResult {
            value,
            best_move,
            stats,
        })
    }
}

/// Minimax over `game` from `state`: returns the root value for the player to
/// move and the move achieving it.
pub fn minimax_search<G, C, H>(
    game: &G,
    state: &G::State,
    cutoff: C,
    heuristic: H,
) -> Result<SearchResult<G::Move>, SearchError>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    Minimax::new(cutoff, heuristic).search(game, state)
}

// ============================================================================
// RECURSION
// ============================================================================

type Scored<M> = (f64, Option<M>);
type MemoKey<S> = (S, u32);

struct MinimaxRun<'a, G: Game, C, H> {
    ctx: Context<'a, G, C, H>,
    keying: Keying,
    max_cache: SearchCache<MemoKey<G::State>, Scored<G::Move>>,
    min_cache: SearchCache<MemoKey<G::State>, Scored<G::Move>>,
}

impl<'a, G, C, H> MinimaxRun<'a, G, C, H>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    fn key(&self, state: &G::State, depth: u32) -> MemoKey<G::State> {
        match self.keying {
            Keying::StateAndDepth => (state.clone(), depth),
            #[cfg(test)]
            Keying::StateOnly => (state.clone(), 0),
        }
    }

    /// Best value the root player can force from `state`, where it is their
    /// turn
    fn max_value(&mut self, state: &G::State, depth: u32) -> Result<Scored<G::Move>, SearchError> {
        let key = self.key(state, depth);
        if let Some(&hit) = self.max_cache.get(&key) {
            self.ctx.stats.cache_hits += 1;
            return Ok(hit);
        }
        self.ctx.stats.nodes += 1;

        let scored = match self.ctx.leaf_value(state, depth)? {
            Some(value) => (value, None),
            None => {
                let mut best = (f64::NEG_INFINITY, None);
                for mv in self.ctx.expand(state, depth)? {
                    let child = self.ctx.game.result(state, mv)?;
                    let (value, _) = self.min_value(&child, depth + 1)?;
                    if value > best.0 {
                        best = (value, Some(mv));
                    }
                }
                best
            }
        };

        self.max_cache.insert(key, scored);
        Ok(scored)
    }

    /// Lowest value the opponent can hold the root player to from `state`,
    /// where it is the opponent's turn
    fn min_value(&mut self, state: &G::State, depth: u32) -> Result<Scored<G::Move>, SearchError> {
        let key = self.key(state, depth);
        if let Some(&hit) = self.min_cache.get(&key) {
            self.ctx.stats.cache_hits += 1;
            return Ok(hit);
        }
        self.ctx.stats.nodes += 1;

        let scored = match self.ctx.leaf_value(state, depth)? {
            Some(value) => (value, None),
            None => {
                let mut best = (f64::INFINITY, None);
                for mv in self.ctx.expand(state, depth)? {
                    let child = self.ctx.game.result(state, mv)?;
                    let (value, _) = self.max_value(&child, depth + 1)?;
                    if value < best.0 {
                        best = (value, Some(mv));
                    }
                }
                best
            }
        };

        self.min_cache.insert(key, scored);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Mark, Square};
    use crate::game::KInARow;
    use crate::search::cutoff_depth;
    use crate::search::testing::{Race, RaceState, Side, Stuck};

    fn sq(x: i32, y: i32) -> Square {
        Square::new(x, y)
    }

    #[test]
    fn test_tic_tac_toe_is_a_draw() {
        let game = KInARow::tic_tac_toe();
        let result =
            minimax_search(&game, &game.initial(), cutoff_depth(9), ZeroHeuristic).unwrap();
        assert_eq!(result.value, 0.0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = KInARow::tic_tac_toe();
        // X X .
        // O O .
        // . . .
        let board = game
            .play_moves(&[sq(0, 0), sq(0, 1), sq(1, 0), sq(1, 1)])
            .unwrap();

        let result = Minimax::default().search(&game, &board).unwrap();
        assert_eq!(result.value, 1.0);
        assert_eq!(result.best_move, Some(sq(2, 0)));
    }

    #[test]
    fn test_value_is_from_player_to_move() {
        let game = KInARow::tic_tac_toe();
        // O to move: (2, 1) wins at once, (2, 0) blocks and forks
        let board = game
            .play_moves(&[sq(0, 0), sq(0, 1), sq(1, 0), sq(1, 1), sq(2, 2)])
            .unwrap();

        let result = Minimax::default().search(&game, &board).unwrap();
        assert_eq!(board.to_move(), Mark::O);
        assert_eq!(result.value, 1.0);
        assert!(matches!(result.best_move, Some(m) if m == sq(2, 0) || m == sq(2, 1)));
    }

    #[test]
    fn test_blocks_opponent_win() {
        let game = KInARow::tic_tac_toe();
        // X X .
        // . O .
        // . . .   O to move must block (2, 0)
        let board = game.play_moves(&[sq(0, 0), sq(1, 1), sq(1, 0)]).unwrap();

        let result = minimax_search(&game, &board, cutoff_depth(9), ZeroHeuristic).unwrap();
        assert_eq!(result.best_move, Some(sq(2, 0)));
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_cutoff_at_root_returns_heuristic() {
        let game = KInARow::tic_tac_toe();
        let result = minimax_search(
            &game,
            &game.initial(),
            |_: &KInARow, _: &Board, _: u32| true,
            |_: &Board, _: Mark| 0.25,
        )
        .unwrap();

        assert_eq!(result.value, 0.25);
        assert_eq!(result.best_move, None);
        assert_eq!(result.stats.expanded, 0);
        assert_eq!(result.stats.cutoffs, 1);
    }

    #[test]
    fn test_terminal_root() {
        let game = KInARow::tic_tac_toe();
        let board = game
            .play_moves(&[sq(0, 0), sq(0, 1), sq(1, 0), sq(1, 1), sq(2, 0)])
            .unwrap();

        let result = Minimax::default().search(&game, &board).unwrap();
        // O is to move and has lost
        assert_eq!(result.value, -1.0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_memoization_hits_transpositions() {
        let game = KInARow::tic_tac_toe();
        let result =
            minimax_search(&game, &game.initial(), cutoff_depth(9), ZeroHeuristic).unwrap();
        assert!(result.stats.cache_hits > 0);
        // Far fewer than the ~550k nodes of an unmemoized tree
        assert!(result.stats.nodes < 20_000);
    }

    #[test]
    fn test_memo_key_includes_depth() {
        // (3, B) is cut off when reached via [1, 1, 1] at depth 3 and must be
        // searched when reached via [3] at depth 1, where B wins by playing 1.
        let game = Race { target: 4 };
        let heuristic = |_: &RaceState, _: Side| 0.5;

        let sound = Minimax::new(cutoff_depth(2), heuristic)
            .search(&game, &game.initial())
            .unwrap();
        assert_eq!(sound.value, -1.0);
        assert_eq!(sound.best_move, Some(1));

        let unsound = Minimax::new(cutoff_depth(2), heuristic)
            .keyed_on_state_only()
            .search(&game, &game.initial())
            .unwrap();
        assert_eq!(unsound.value, 0.5);
        assert_eq!(unsound.best_move, Some(3));
    }

    #[test]
    fn test_tiny_cache_gives_same_answer() {
        let game = KInARow::tic_tac_toe();
        let board = game.play_moves(&[sq(1, 1)]).unwrap();
        let full = Minimax::new(cutoff_depth(9), ZeroHeuristic)
            .search(&game, &board)
            .unwrap();
        let tiny = Minimax::new(cutoff_depth(9), ZeroHeuristic)
            .with_cache_capacity(16)
            .search(&game, &board)
            .unwrap();

        assert_eq!(full.value, tiny.value);
        assert_eq!(full.best_move, tiny.best_move);
        assert_eq!(full.stats.flushes, 0);
        assert!(tiny.stats.flushes > 0);
    }

    #[test]
    fn test_stuck_game_is_an_invariant_violation() {
        let result = minimax_search(&Stuck, &0, cutoff_depth(3), ZeroHeuristic);
        assert!(matches!(result, Err(SearchError::NoActions { depth: 0 })));
    }
}
