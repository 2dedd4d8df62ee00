//! Adversarial search: minimax and alpha-beta
//!
//! Both algorithms fix the searching player at the root and recurse through
//! two procedures, `max_value` for that player's turns and `min_value` for
//! the opponent's. A [`Cutoff`] predicate stops expansion and substitutes a
//! [`Heuristic`] estimate. Memoization tables live only as long as one
//! search call.

mod alphabeta;
mod cache;
mod minimax;

#[cfg(test)]
pub(crate) mod testing;

pub use alphabeta::{alphabeta_search, AlphaBeta, DEFAULT_ALPHABETA_DEPTH};
pub use cache::{SearchCache, DEFAULT_CACHE_CAPACITY};
pub use minimax::{minimax_search, Minimax, DEFAULT_MINIMAX_DEPTH};

use serde::Serialize;

use crate::error::SearchError;
use crate::eval::Heuristic;
use crate::game::Game;

// ============================================================================
// CUTOFF
// ============================================================================

/// Decides whether to stop expanding `state` at `depth` plies below the root.
/// Must be monotone in depth so that every branch terminates.
pub trait Cutoff<G: Game> {
    fn cutoff(&self, game: &G, state: &G::State, depth: u32) -> bool;
}

impl<G, F> Cutoff<G> for F
where
    G: Game,
    F: Fn(&G, &G::State, u32) -> bool,
{
    fn cutoff(&self, game: &G, state: &G::State, depth: u32) -> bool {
        self(game, state, depth)
    }
}

/// Stops once the search is deeper than a fixed number of plies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthCutoff {
    pub max_depth: u32,
}

impl DepthCutoff {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl<G: Game> Cutoff<G> for DepthCutoff {
    fn cutoff(&self, _game: &G, _state: &G::State, depth: u32) -> bool {
        depth > self.max_depth
    }
}

/// Cutoff that searches `max_depth` plies deep
pub fn cutoff_depth(max_depth: u32) -> DepthCutoff {
    DepthCutoff::new(max_depth)
}

// ============================================================================
// RESULTS
// ============================================================================

/// Counters collected during one search call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions evaluated (cache hits excluded)
    pub nodes: u64,
    /// Positions whose children were generated
    pub expanded: u64,
    pub terminals: u64,
    /// Positions scored by the heuristic
    pub cutoffs: u64,
    pub cache_hits: u64,
    /// Alpha-beta only: branches abandoned early
    pub prunes: u64,
    /// Times a full memo table was cleared
    pub flushes: u64,
}

/// Value of the root to the player who was to move there, and the move
/// achieving it. `best_move` is `None` when the root itself was terminal or
/// cut off.
#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    pub value: f64,
    pub best_move: Option<M>,
    pub stats: SearchStats,
}

/// A search procedure that can drive a [`crate::policy::SearchPolicy`]
pub trait SearchAlgorithm<G: Game> {
    fn name(&self) -> &'static str;

    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Move>, SearchError>;
}

// ============================================================================
// SHARED NODE LOGIC
// ============================================================================

/// Per-call state shared by both algorithms: the game, the cutoff and
/// heuristic, the root player's perspective and the counters.
struct Context<'a, G: Game, C, H> {
    game: &'a G,
    cutoff: &'a C,
    heuristic: &'a H,
    player: G::Player,
    stats: SearchStats,
}

impl<'a, G, C, H> Context<'a, G, C, H>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    fn new(game: &'a G, root: &G::State, cutoff: &'a C, heuristic: &'a H) -> Self {
        Self {
            game,
            cutoff,
            heuristic,
            player: game.to_move(root),
            stats: SearchStats::default(),
        }
    }

    /// Value of `state` if it is terminal or cut off, `None` if it must be
    /// expanded
    fn leaf_value(&mut self, state: &G::State, depth: u32) -> Result<Option<f64>, SearchError> {
        if self.game.is_terminal(state) {
            self.stats.terminals += 1;
            return Ok(Some(self.game.utility(state, self.player)?));
        }
        if self.cutoff.cutoff(self.game, state, depth) {
            self.stats.cutoffs += 1;
            return Ok(Some(self.heuristic.evaluate(state, self.player)));
        }
        Ok(None)
    }

    /// Legal moves of a non-terminal state
    fn expand(&mut self, state: &G::State, depth: u32) -> Result<Vec<G::Move>, SearchError> {
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(SearchError::NoActions { depth });
        }
        self.stats.expanded += 1;
        Ok(actions)
    }
}
