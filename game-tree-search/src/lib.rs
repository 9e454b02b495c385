#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements adversarial game-tree search: minimax, minimax with alpha-beta pruning,
//! and expectimax, for one maximizing agent playing against any number of opponents. You provide
//! a game by implementing [game::AdversarialGame] and a 'scoring' function that turns a game state
//! into an `f64`, where higher is better for the maximizing agent.
//!
//! The searchers never look inside the game; all they need is the legal actions for an agent, the
//! state an action leads to, and whether the game is already decided. [explicit::ExplicitGame]
//! is a ready made game whose whole tree is written out in JSON, which is handy for testing.
//!
//! ```rust
//! use game_tree_search::{
//!     explicit::ExplicitGame,
//!     search::{alpha_beta_action, expectimax_action, GameScore},
//! };
//!
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
//! // Against an opponent trying to hurt us, 'safe' is the better move
//! assert_eq!(alpha_beta_action(&game, 1, GameScore), Some("safe".to_owned()));
//!
//! // Against an opponent acting at random, 'risky' is worth 50.5 on average
//! assert_eq!(expectimax_action(&game, 1, GameScore), Some("risky".to_owned()));
//! ```

pub mod explicit;
pub mod game;
pub mod reflex;
pub mod search;

pub use game::AdversarialGame;
