//! Player policies: how a player picks a move

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::SearchError;
use crate::game::Game;
use crate::search::SearchAlgorithm;

/// Chooses a legal move for the player to move in `state`
pub trait Policy<G: Game> {
    fn name(&self) -> &str;

    fn choose(&mut self, game: &G, state: &G::State) -> Result<G::Move, SearchError>;
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniformly random legal move
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, game: &G, state: &G::State) -> Result<G::Move, SearchError> {
        game.actions(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoActions { depth: 0 })
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Plays the move a search algorithm picks, discarding its value
pub struct SearchPolicy<A> {
    algorithm: A,
}

impl<A> SearchPolicy<A> {
    pub fn new(algorithm: A) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }
}

impl<G, A> Policy<G> for SearchPolicy<A>
where
    G: Game,
    A: SearchAlgorithm<G>,
{
    fn name(&self) -> &str {
        self.algorithm.name()
    }

    fn choose(&mut self, game: &G, state: &G::State) -> Result<G::Move, SearchError> {
        let result = self.algorithm.search(game, state)?;
        tracing::debug!(
            algorithm = self.algorithm.name(),
            value = result.value,
            nodes = result.stats.nodes,
            "search chose {:?}",
            result.best_move
        );
        result.best_move.ok_or_else(|| SearchError::NoMoveChosen {
            algorithm: self.algorithm.name().to_string(),
        })
    }
}
