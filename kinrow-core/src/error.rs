//! Error types for game rules and search

/// Errors raised by a game's rules.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game is already over")]
    GameOver,

    #[error("utility requested for a non-terminal position")]
    NotTerminal,
}

/// Errors raised by the search engine, policies and the game driver.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("non-terminal position at depth {depth} has no legal actions")]
    NoActions { depth: u32 },

    /// The root was cut off or terminal, so the search picked no move
    #[error("{algorithm} search chose no move (root position was cut off or terminal)")]
    NoMoveChosen { algorithm: String },

    #[error("no policy registered for player {0}")]
    MissingPolicy(String),

    #[error("policy chose illegal move {0}")]
    IllegalPolicyMove(String),
}
