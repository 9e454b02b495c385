//! A game whose whole tree is written out ahead of time.
//!
//! This is mostly useful for testing searchers and for poking at them from the command line:
//! each node lists its score, whether the game is decided there, and the actions leading to its
//! children. Agents take turns exactly as the searchers expect, so the node at ply `d` belongs
//! to agent `d % num_agents`.
//!
//! ```json
//! {
//!   "num_agents": 2,
//!   "root": {
//!     "children": [
//!       { "action": "left", "score": 3 },
//!       { "action": "right", "outcome": "lose", "score": -500 }
//!     ]
//!   }
//! }
//! ```

use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::AdversarialGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a decided game ended, from the maximizing agent's point of view
pub enum Outcome {
    #[allow(missing_docs)]
    Win,
    #[allow(missing_docs)]
    Lose,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// One state in a written out game tree
pub struct TreeNode {
    /// The game's own score at this state
    #[serde(default)]
    pub score: f64,
    /// Set if the game is decided at this state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// The actions available here, in the order they should be explored
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Branch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// An action and the state it leads to
pub struct Branch {
    /// The name of the action. Must be unique among its siblings
    pub action: String,
    #[allow(missing_docs)]
    #[serde(flatten)]
    pub node: TreeNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The serialized form of an [ExplicitGame]
pub struct TreeDescription {
    /// How many agents take turns, including the maximizing agent
    pub num_agents: usize,
    /// The starting state
    pub root: TreeNode,
}

#[derive(Debug, Clone, Copy)]
/// The knobs for [TreeDescription::random]
pub struct RandomTreeShape {
    /// How many agents take turns
    pub num_agents: usize,
    /// The most actions any node can have. Every non-terminal node has at least one
    pub branching: usize,
    /// How many rounds deep the tree goes, one round being a move by every agent
    pub rounds: usize,
    /// The chance that any non-root node ends the game with a random outcome
    pub terminal_chance: f64,
    /// Scores are drawn uniformly from `-score_range..=score_range`
    pub score_range: i32,
}

impl Default for RandomTreeShape {
    fn default() -> Self {
        Self {
            num_agents: 2,
            branching: 3,
            rounds: 2,
            terminal_chance: 0.1,
            score_range: 100,
        }
    }
}

impl TreeDescription {
    /// Build a random tree with the given shape
    ///
    /// Scores are whole numbers so values found by different searches compare exactly
    ///
    /// Fails if the shape can't describe a tree: no agents, a `terminal_chance` outside `[0, 1]`
    /// or a negative `score_range`
    pub fn random<R: Rng>(rng: &mut R, shape: RandomTreeShape) -> Result<Self> {
        if shape.num_agents == 0 {
            bail!("A game tree needs at least one agent");
        }
        if !(0.0..=1.0).contains(&shape.terminal_chance) {
            bail!("terminal_chance must be between 0 and 1, got {}", shape.terminal_chance);
        }
        if shape.score_range < 0 {
            bail!("score_range can't be negative, got {}", shape.score_range);
        }

        let plies = shape.rounds.saturating_mul(shape.num_agents);

        Ok(Self {
            num_agents: shape.num_agents,
            root: random_node(rng, &shape, 0, plies),
        })
    }
}

fn random_node<R: Rng>(
    rng: &mut R,
    shape: &RandomTreeShape,
    depth: usize,
    plies: usize,
) -> TreeNode {
    let score = rng.gen_range(-shape.score_range..=shape.score_range) as f64;

    if depth > 0 && rng.gen_bool(shape.terminal_chance) {
        let outcome = if rng.gen_bool(0.5) {
            Outcome::Win
        } else {
            Outcome::Lose
        };

        return TreeNode {
            score,
            outcome: Some(outcome),
            children: vec![],
        };
    }

    let children = if depth >= plies {
        vec![]
    } else {
        let count = rng.gen_range(1..=shape.branching.max(1));
        (0..count)
            .map(|i| Branch {
                action: format!("m{i}"),
                node: random_node(rng, shape, depth + 1, plies),
            })
            .collect()
    };

    TreeNode {
        score,
        outcome: None,
        children,
    }
}

#[derive(Debug)]
struct ArenaNode {
    score: f64,
    outcome: Option<Outcome>,
    children: Vec<(String, usize)>,
}

#[derive(Debug, Clone)]
/// A handle to one state of a written out game tree
///
/// Cloning and taking successors is cheap: every handle shares the same tree. Two handles are
/// equal when they point at the same node of the same tree.
pub struct ExplicitGame {
    nodes: Arc<Vec<ArenaNode>>,
    num_agents: usize,
    current: usize,
}

impl ExplicitGame {
    /// Parse and validate a tree from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let description: TreeDescription =
            serde_json::from_str(json).context("Could not parse the game tree")?;

        Self::from_description(description)
    }

    /// Validate a tree description and build the game at its root
    pub fn from_description(description: TreeDescription) -> Result<Self> {
        if description.num_agents == 0 {
            bail!("A game tree needs at least one agent");
        }

        let mut nodes = vec![];
        push_node(&mut nodes, description.root, "root")?;

        Ok(Self {
            nodes: Arc::new(nodes),
            num_agents: description.num_agents,
            current: 0,
        })
    }

    /// Build a random game with the given shape
    pub fn random<R: Rng>(rng: &mut R, shape: RandomTreeShape) -> Result<Self> {
        Self::from_description(TreeDescription::random(rng, shape)?)
    }

    /// The total number of states in the tree, reachable from this one or not
    pub fn tree_size(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self) -> &ArenaNode {
        &self.nodes[self.current]
    }
}

fn push_node(nodes: &mut Vec<ArenaNode>, node: TreeNode, path: &str) -> Result<usize> {
    let index = nodes.len();
    nodes.push(ArenaNode {
        score: node.score,
        outcome: node.outcome,
        children: vec![],
    });

    let mut seen = HashSet::new();
    let mut children = Vec::with_capacity(node.children.len());
    for branch in node.children {
        if !seen.insert(branch.action.clone()) {
            bail!("Action {} appears twice under {path}", branch.action);
        }

        let child_path = format!("{path}/{}", branch.action);
        let child_index = push_node(nodes, branch.node, &child_path)?;
        children.push((branch.action, child_index));
    }

    nodes[index].children = children;

    Ok(index)
}

impl PartialEq for ExplicitGame {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes) && self.current == other.current
    }
}

impl Eq for ExplicitGame {}

impl Hash for ExplicitGame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.nodes).hash(state);
        self.current.hash(state);
    }
}

impl AdversarialGame for ExplicitGame {
    type Action = String;

    fn legal_actions(&self, _agent: usize) -> Vec<String> {
        self.node()
            .children
            .iter()
            .map(|(action, _)| action.clone())
            .collect()
    }

    /// # Panics
    ///
    /// If `action` is not one of this state's actions
    fn successor(&self, _agent: usize, action: &String) -> Self {
        let next = self
            .node()
            .children
            .iter()
            .find(|(name, _)| name == action)
            .map(|(_, index)| *index)
            .unwrap_or_else(|| panic!("{action:?} is not a legal action from this state"));

        Self {
            nodes: self.nodes.clone(),
            num_agents: self.num_agents,
            current: next,
        }
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn is_win(&self) -> bool {
        self.node().outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node().outcome == Some(Outcome::Lose)
    }

    fn score(&self) -> f64 {
        self.node().score
    }
}
