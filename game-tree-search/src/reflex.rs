//! One-ply action selection with random tie-breaking.

use derivative::Derivative;
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::{
    game::{AdversarialGame, MAXIMIZING_AGENT},
    search::ActionScorable,
};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Picks an action by looking one move ahead and nothing more
///
/// Every legal action of the maximizing agent is scored, and the agent picks uniformly at random
/// between the actions tied for the best score. Unlike the tree searchers this doesn't prefer the
/// first of several equally good actions.
pub struct ReflexAgent<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
}

impl<ScorableType> ReflexAgent<ScorableType> {
    /// Construct a new `ReflexAgent`
    ///
    /// Use [crate::search::SuccessorScore] to drive it with a scorer for states instead of
    /// actions
    pub fn new(score_function: ScorableType) -> Self {
        Self { score_function }
    }

    /// Every legal action paired with its score, in the order the game listed them
    pub fn scored_actions<GameType>(&self, game: &GameType) -> Vec<(GameType::Action, f64)>
    where
        GameType: AdversarialGame,
        ScorableType: ActionScorable<GameType>,
    {
        game.legal_actions(MAXIMIZING_AGENT)
            .into_iter()
            .map(|action| {
                let score = self.score_function.score_action(game, &action);
                (action, score)
            })
            .collect()
    }

    /// Pick one of the best scoring actions, or None if there are no legal actions
    pub fn choose_action<GameType, R>(
        &self,
        game: &GameType,
        rng: &mut R,
    ) -> Option<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: ActionScorable<GameType>,
        R: Rng + ?Sized,
    {
        let scored = self.scored_actions(game);
        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(None, |best: Option<f64>, score| {
                Some(best.map_or(score, |b| b.max(score)))
            })?;

        let best_actions = scored
            .into_iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| action)
            .collect_vec();

        debug!(
            best_score,
            tied = best_actions.len(),
            "reflex agent picking between its best actions"
        );

        best_actions.choose(rng).cloned()
    }
}
