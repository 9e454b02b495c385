//! Depth limited game-tree search for one maximizing agent against any number of opponents.
//!
//! Agents take turns in index order, one ply each: agent 0 (the maximizing agent), then agent 1,
//! and so on before wrapping back to agent 0. The agent to move at ply `depth` is always
//! `depth % num_agents`, and the search stops at ply `depth_limit * num_agents`, so a depth limit
//! of 2 lets every agent move twice.
//!
//! There are three variants, all driven by the same traversal:
//!
//! - [SearchVariant::Minimax] assumes every opponent works to minimize your score.
//! - [SearchVariant::AlphaBeta] is minimax that skips subtrees which can't change the result.
//!   It always returns the same value as minimax.
//! - [SearchVariant::Expectimax] assumes every opponent acts uniformly at random, so opponent
//!   nodes average their children instead of minimizing.
//!
//! Ties between equally good actions are broken in favour of the first one the game listed.
//!
//! ```rust
//! use game_tree_search::{explicit::ExplicitGame, search::{minimax_action, GameScore}};
//!
//! // The opponent (agent 1) can hold 'risky' to 1, while 'safe' is worth at least 3
//! let game = ExplicitGame::from_json(
//!     r#"{
//!         "num_agents": 2,
//!         "root": {
//!             "children": [
//!                 { "action": "safe", "children": [
//!                     { "action": "a", "score": 3 },
//!                     { "action": "b", "score": 7 }
//!                 ]},
//!                 { "action": "risky", "children": [
//!                     { "action": "a", "score": 1 },
//!                     { "action": "b", "score": 100 }
//!                 ]}
//!             ]
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(minimax_action(&game, 1, GameScore), Some("safe".to_owned()));
//! ```

mod score;
pub use score::{ActionScorable, GameScore, Scorable, SuccessorScore};

mod cached_score;
pub use cached_score::CachedScore;

mod search_return;
pub use search_return::{LeafReason, NodeKind, SearchReturn};

mod combinator;

mod searcher;
pub use searcher::{
    alpha_beta_action, choose_action, expectimax_action, minimax_action, GameTreeSearcher,
    SearchVariant, SearcherOptions,
};

#[cfg(test)]
mod tests;
