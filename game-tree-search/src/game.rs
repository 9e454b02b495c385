//! The interface a game has to provide to be searched.

use std::fmt::Debug;

/// The index of the maximizing agent. Every other index is an opponent
pub const MAXIMIZING_AGENT: usize = 0;

/// A game state that the searchers in this crate can explore
///
/// Implementors are treated as immutable values: [AdversarialGame::successor] must hand back a
/// new state and leave `self` untouched, so that sibling subtrees all start from the same state.
///
/// [AdversarialGame::num_agents] should be at least 1 and never change for a given game. With
/// zero agents the search has no plies to spend, so an undecided root comes back as a single
/// [crate::search::LeafReason::DepthLimit] leaf and no action is chosen.
pub trait AdversarialGame: Sized {
    /// An opaque token identifying a move. Actions are only ever compared with each other and
    /// replayed into [AdversarialGame::successor], never interpreted
    type Action: Clone + Debug + PartialEq;

    /// The legal actions for the given agent, in the order they should be explored
    ///
    /// An empty list is allowed, the searchers treat that node as terminal
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// The state reached when `agent` plays `action` from this state
    fn successor(&self, agent: usize, action: &Self::Action) -> Self;

    /// The number of agents taking turns, including the maximizing agent
    fn num_agents(&self) -> usize;

    /// Has the maximizing agent won
    fn is_win(&self) -> bool;

    /// Has the maximizing agent lost
    fn is_lose(&self) -> bool;

    /// The running score of the game, used by [crate::search::GameScore]
    fn score(&self) -> f64;

    /// True if the game is decided one way or the other
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
