use std::{hash::Hash, sync::Arc};

use dashmap::DashMap;
use derivative::Derivative;

use super::Scorable;

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = "ScorableType: Clone"))]
/// Cache the score of every state we evaluate
///
/// Evaluations are pure, so a state reached through different move orders (a transposition) only
/// needs to be scored once. The cache is shared between clones, which makes it possible to keep
/// it warm across the iterations of a deepened search.
pub struct CachedScore<ScorableType, GameType>
where
    GameType: Eq + Hash,
{
    #[derivative(Debug = "ignore")]
    scorable: ScorableType,
    #[derivative(Debug = "ignore")]
    cache: Arc<DashMap<GameType, f64>>,
}

impl<ScorableType, GameType> CachedScore<ScorableType, GameType>
where
    GameType: Eq + Hash,
{
    /// Wrap `scorable` with a fresh, empty cache
    pub fn new(scorable: ScorableType) -> Self {
        Self::with_cache(scorable, Arc::new(DashMap::new()))
    }

    /// Wrap `scorable` with an existing cache
    pub fn with_cache(scorable: ScorableType, cache: Arc<DashMap<GameType, f64>>) -> Self {
        Self { scorable, cache }
    }

    /// How many distinct states have been scored so far
    pub fn cached_states(&self) -> usize {
        self.cache.len()
    }
}

impl<ScorableType, GameType> Scorable<GameType> for CachedScore<ScorableType, GameType>
where
    ScorableType: Scorable<GameType>,
    GameType: Eq + Hash + Clone,
{
    fn score(&self, game: &GameType) -> f64 {
        if let Some(score) = self.cache.get(game) {
            return *score;
        }

        *self
            .cache
            .entry(game.clone())
            .or_insert_with(|| self.scorable.score(game))
    }
}
