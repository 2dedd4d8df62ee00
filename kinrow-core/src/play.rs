//! Turn-taking game driver

use std::fmt::Display;

use rustc_hash::FxHashMap;

use crate::error::SearchError;
use crate::game::Game;
use crate::policy::Policy;

/// Policy for each player, looked up by whose turn it is
pub type Strategies<G> = FxHashMap<<G as Game>::Player, Box<dyn Policy<G>>>;

/// A finished game: the terminal state and every move made, in order
#[derive(Clone, Debug)]
pub struct GameRecord<G: Game> {
    pub final_state: G::State,
    pub moves: Vec<(G::Player, G::Move)>,
}

impl<G: Game> GameRecord<G> {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Play `game` from its initial state until it is over, asking the policy of
/// the player to move for each move. With `verbose`, every move and the
/// resulting position are logged.
pub fn play_game<G>(
    game: &G,
    strategies: &mut Strategies<G>,
    verbose: bool,
) -> Result<GameRecord<G>, SearchError>
where
    G: Game,
    G::State: Display,
{
    let mut state = game.initial();
    let mut moves = Vec::new();

    while !game.is_terminal(&state) {
        let player = game.to_move(&state);
        let policy = strategies
            .get_mut(&player)
            .ok_or_else(|| SearchError::MissingPolicy(format!("{:?}", player)))?;

        let mv = policy.choose(game, &state)?;
        if !game.actions(&state).contains(&mv) {
            return Err(SearchError::IllegalPolicyMove(format!(
                "{:?} from {} policy",
                mv,
                policy.name()
            )));
        }

        state = game.result(&state, mv)?;
        moves.push((player, mv));

        if verbose {
            tracing::info!("Player {:?} ({}) move: {:?}\n{}", player, policy.name(), mv, state);
        }
    }

    Ok(GameRecord {
        final_state: state,
        moves,
    })
}
