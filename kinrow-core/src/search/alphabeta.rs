//! Alpha-beta pruning with a bound-aware memo table
//!
//! A value computed inside a narrow (alpha, beta) window may only be a bound
//! on the true value: a max node that fails high (`v >= beta`) stopped early,
//! so its true value is at least `v`; one that fails low (`v <= alpha`) is at
//! most `v`. Each table entry records which of the three it is, and is reused
//! only when that is enough for the window it is probed with. Entries are
//! keyed on `(state, depth)` for the same reason as in minimax.

use super::{
    Context, Cutoff, DepthCutoff, SearchAlgorithm, SearchCache, SearchResult,
    DEFAULT_CACHE_CAPACITY,
};
use crate::error::SearchError;
use crate::eval::{Heuristic, ZeroHeuristic};
use crate::game::Game;

/// Default search depth in plies
pub const DEFAULT_ALPHABETA_DEPTH: u32 = 12;

/// Alpha-beta search configuration
#[derive(Clone, Debug)]
pub struct AlphaBeta<C, H> {
    pub cutoff: C,
    pub heuristic: H,
    pub cache_capacity: usize,
}

impl<C, H> AlphaBeta<C, H> {
    pub fn new(cutoff: C, heuristic: H) -> Self {
        Self {
            cutoff,
            heuristic,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for AlphaBeta<DepthCutoff, ZeroHeuristic> {
    fn default() -> Self {
        Self::new(DepthCutoff::new(DEFAULT_ALPHABETA_DEPTH), ZeroHeuristic)
    }
}

impl<G, C, H> SearchAlgorithm<G> for AlphaBeta<C, H>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Move>, SearchError> {
        let mut run = AlphaBetaRun {
            ctx: Context::new(game, state, &self.cutoff, &self.heuristic),
            max_cache: SearchCache::with_capacity(self.cache_capacity),
            min_cache: SearchCache::with_capacity(self.cache_capacity),
        };

        let (value, best_move) = run.max_value(state, f64::NEG_INFINITY, f64::INFINITY, 0)?;
        let mut stats = run.ctx.stats;
        stats.flushes = run.max_cache.flushes() + run.min_cache.flushes();

        tracing::debug!(
            value,
            nodes = stats.nodes,
            cache_hits = stats.cache_hits,
            flushes = stats.flushes,
            prunes = stats.prunes,
            "alpha-beta search complete"
        );

        Ok(SearchResult {
            value,
            best_move,
            stats,
        })
    }
}

/// Alpha-beta over `game` from `state`. Returns the same root value as
/// [`super::minimax_search`] with the same cutoff and heuristic.
pub fn alphabeta_search<G, C, H>(
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
    AlphaBeta::new(cutoff, heuristic).search(game, state)
}

// ============================================================================
// MEMO ENTRIES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Exact,
    /// True value is at least the stored one
    Lower,
    /// True value is at most the stored one
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct Entry<M> {
    value: f64,
    best_move: Option<M>,
    bound: Bound,
}

impl<M> Entry<M> {
    fn classify(value: f64, best_move: Option<M>, alpha: f64, beta: f64) -> Self {
        let bound = if value >= beta {
            Bound::Lower
        } else if value <= alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        Self {
            value,
            best_move,
            bound,
        }
    }

    fn exact(value: f64) -> Self {
        Self {
            value,
            best_move: None,
            bound: Bound::Exact,
        }
    }

    /// Whether this entry settles a node searched with `(alpha, beta)`
    fn usable(&self, alpha: f64, beta: f64) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.value >= beta,
            Bound::Upper => self.value <= alpha,
        }
    }
}

// ============================================================================
// RECURSION
// ============================================================================

type Scored<M> = (f64, Option<M>);
type MemoKey<S> = (S, u32);

struct AlphaBetaRun<'a, G: Game, C, H> {
    ctx: Context<'a, G, C, H>,
    max_cache: SearchCache<MemoKey<G::State>, Entry<G::Move>>,
    min_cache: SearchCache<MemoKey<G::State>, Entry<G::Move>>,
}

impl<'a, G, C, H> AlphaBetaRun<'a, G, C, H>
where
    G: Game,
    C: Cutoff<G>,
    H: Heuristic<G>,
{
    fn max_value(
        &mut self,
        state: &G::State,
        mut alpha: f64,
        beta: f64,
        depth: u32,
    ) -> Result<Scored<G::Move>, SearchError> {
        let key = (state.clone(), depth);
        if let Some(entry) = self.max_cache.get(&key) {
            if entry.usable(alpha, beta) {
                self.ctx.stats.cache_hits += 1;
                return Ok((entry.value, entry.best_move));
            }
        }
        self.ctx.stats.nodes += 1;

        if let Some(value) = self.ctx.leaf_value(state, depth)? {
            self.max_cache.insert(key, Entry::exact(value));
            return Ok((value, None));
        }

        let window = (alpha, beta);
        let mut best = (f64::NEG_INFINITY, None);
        for mv in self.ctx.expand(state, depth)? {
            let child = self.ctx.game.result(state, mv)?;
            let (value, _) = self.min_value(&child, alpha, beta, depth + 1)?;
            if value > best.0 {
                best = (value, Some(mv));
                alpha = alpha.max(value);
            }
            if best.0 >= beta {
                self.ctx.stats.prunes += 1;
                break;
            }
        }

        let entry = Entry::classify(best.0, best.1, window.0, window.1);
        self.max_cache.insert(key, entry);
        Ok(best)
    }

    fn min_value(
        &mut self,
        state: &G::State,
        alpha: f64,
        mut beta: f64,
        depth: u32,
    ) -> Result<Scored<G::Move>, SearchError> {
        let key = (state.clone(), depth);
        if let Some(entry) = self.min_cache.get(&key) {
            if entry.usable(alpha, beta) {
                self.ctx.stats.cache_hits += 1;
                return Ok((entry.value, entry.best_move));
            }
        }
        self.ctx.stats.nodes += 1;

        if let Some(value) = self.ctx.leaf_value(state, depth)? {
            self.min_cache.insert(key, Entry::exact(value));
            return Ok((value, None));
        }

        let window = (alpha, beta);
        let mut best = (f64::INFINITY, None);
        for mv in self.ctx.expand(state, depth)? {
            let child = self.ctx.game.result(state, mv)?;
            let (value, _) = self.max_value(&child, alpha, beta, depth + 1)?;
            if value < best.0 {
                best = (value, Some(mv));
                beta = beta.min(value);
            }
            if best.0 <= alpha {
                self.ctx.stats.prunes += 1;
                break;
            }
        }

        let entry = Entry::classify(best.0, best.1, window.0, window.1);
        self.min_cache.insert(key, entry);
        Ok(best)
    }
}
