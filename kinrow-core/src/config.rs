//! Game and player configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::eval::BoardHeuristic;
use crate::game::KInARow;
use crate::policy::{Policy, RandomPolicy, SearchPolicy};
use crate::search::{
    AlphaBeta, DepthCutoff, Minimax, DEFAULT_ALPHABETA_DEPTH, DEFAULT_MINIMAX_DEPTH,
};

/// Default run length when only a board size is given
pub const DEFAULT_K: u32 = 3;

// ============================================================================
// GAME CONFIG
// ============================================================================

/// Board dimensions and run length
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_k")]
    pub k: u32,
}

fn default_k() -> u32 {
    DEFAULT_K
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::square(3)
    }
}

impl GameConfig {
    /// `size` x `size` board needing three in a row
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            k: DEFAULT_K,
        }
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    /// Load from a JSON file such as `{"width": 4, "height": 4, "k": 3}`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing game config {}", path.display()))?;
        Ok(config)
    }

    pub fn build(&self) -> Result<KInARow, GameError> {
        KInARow::new(self.width, self.height, self.k)
    }
}

// ============================================================================
// PLAYER CONFIG
// ============================================================================

/// How a player picks moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Minimax,
    AlphaBeta,
    Random,
}

impl Strategy {
    pub fn default_depth(self) -> u32 {
        match self {
            Strategy::Minimax => DEFAULT_MINIMAX_DEPTH,
            Strategy::AlphaBeta => DEFAULT_ALPHABETA_DEPTH,
            Strategy::Random => 0,
        }
    }
}

impl FromStr for Strategy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "minimax" => Ok(Strategy::Minimax),
            "a" | "alphabeta" | "alpha-beta" => Ok(Strategy::AlphaBeta),
            "r" | "random" => Ok(Strategy::Random),
            other => Err(GameError::InvalidConfig(format!(
                "unknown strategy '{}' (expected minimax, alphabeta or random)",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// Evaluation used when a search is cut off
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Zero,
    Lines,
}

impl HeuristicKind {
    pub fn build(self, game: &KInARow) -> BoardHeuristic {
        match self {
            HeuristicKind::Zero => BoardHeuristic::Zero,
            HeuristicKind::Lines => BoardHeuristic::lines(game),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(HeuristicKind::Zero),
            "lines" => Ok(HeuristicKind::Lines),
            other => Err(GameError::InvalidConfig(format!(
                "unknown heuristic '{}' (expected zero or lines)",
                other
            ))),
        }
    }
}

/// Configuration for one player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub strategy: Strategy,
    /// Search depth in plies (None = the strategy's default)
    pub depth: Option<u32>,
    pub heuristic: HeuristicKind,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Random,
            depth: None,
            heuristic: HeuristicKind::Zero,
            seed: None,
        }
    }
}

impl PlayerConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn minimax() -> Self {
        Self::new(Strategy::Minimax)
    }

    pub fn alpha_beta() -> Self {
        Self::new(Strategy::AlphaBeta)
    }

    pub fn random() -> Self {
        Self::new(Strategy::Random)
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn effective_depth(&self) -> u32 {
        self.depth.unwrap_or_else(|| self.strategy.default_depth())
    }

    /// Build the policy this configuration describes for `game`
    pub fn build_policy(&self, game: &KInARow) -> Box<dyn Policy<KInARow>> {
        let cutoff = DepthCutoff::new(self.effective_depth());
        let heuristic = self.heuristic.build(game);

        match self.strategy {
            Strategy::Minimax => Box::new(SearchPolicy::new(Minimax::new(cutoff, heuristic))),
            Strategy::AlphaBeta => Box::new(SearchPolicy::new(AlphaBeta::new(cutoff, heuristic))),
            Strategy::Random => match self.seed {
                Some(seed) => Box::new(RandomPolicy::with_seed(seed)),
                None => Box::new(RandomPolicy::new()),
            },
        }
    }
}
