use crate::game::{AdversarialGame, MAXIMIZING_AGENT};

/// This trait is used to control something that can return a score from a game state
///
/// Higher scores are better for the maximizing agent. Scores should be finite and the same state
/// should always get the same score; the searchers don't check either of these.
///
/// We use this trait to be able to layer in different scoring approaches, such as caching
pub trait Scorable<GameType> {
    /// Convert the given game state into a score
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// The default evaluation: whatever the game itself reports as its score
pub struct GameScore;

impl<GameType: AdversarialGame> Scorable<GameType> for GameScore {
    fn score(&self, game: &GameType) -> f64 {
        game.score()
    }
}

/// Scores an action taken from a state rather than a state on its own
///
/// This is what one-ply choosers like [crate::reflex::ReflexAgent] use
pub trait ActionScorable<GameType: AdversarialGame> {
    /// Score `action` played by the maximizing agent from `game`
    fn score_action(&self, game: &GameType, action: &GameType::Action) -> f64;
}

impl<GameType, FnLike> ActionScorable<GameType> for FnLike
where
    GameType: AdversarialGame,
    FnLike: Fn(&GameType, &GameType::Action) -> f64,
{
    fn score_action(&self, game: &GameType, action: &GameType::Action) -> f64 {
        (self)(game, action)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Turns a state [Scorable] into an [ActionScorable] by scoring the successor state the action
/// leads to
pub struct SuccessorScore<ScorableType>(pub ScorableType);

impl<GameType, ScorableType> ActionScorable<GameType> for SuccessorScore<ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    fn score_action(&self, game: &GameType, action: &GameType::Action) -> f64 {
        self.0.score(&game.successor(MAXIMIZING_AGENT, action))
    }
}
