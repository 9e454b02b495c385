use std::fmt::Debug;
use text_trees::StringTreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a node combines the values of its children
pub enum NodeKind {
    /// The maximizing agent is moving and takes the highest value
    Max,
    /// An adversary is moving and takes the lowest value
    Min,
    /// A randomly acting agent is moving; the value is the mean over its actions
    Chance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why the search stopped expanding at a leaf
pub enum LeafReason {
    /// Every agent has moved `depth_limit` times
    DepthLimit,
    /// The maximizing agent won
    Win,
    /// The maximizing agent lost
    Lose,
    /// The agent to move had nothing it could do
    NoLegalActions,
}

#[derive(Debug, Clone)]
/// This is returned from a search
/// It contains all the information we generated about the game tree
pub enum SearchReturn<Action: Clone + Debug> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen value
    Node {
        /// The agent that was moving at this node
        agent: usize,
        /// How the children were combined
        kind: NodeKind,
        /// The ply this node was at, the root is 0
        depth: usize,
        /// A 'recursive' look at all the actions under us, in the order they were explored
        ///
        /// When a cutoff happened this stops at the action that triggered it
        options: Vec<(Action, Self)>,
        /// Index into `options` of the chosen action. Chance nodes never choose one
        chosen: Option<usize>,
        /// The value of this node
        value: f64,
        /// Whether alpha-beta pruning stopped this node before it ran out of actions to try
        ///
        /// This can be set on the last action too, in which case nothing was actually skipped
        cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    Leaf {
        /// The ply this leaf was at
        depth: usize,
        /// The evaluation of the state at this leaf
        value: f64,
        /// Why we didn't look any deeper
        reason: LeafReason,
    },
}

impl<Action> SearchReturn<Action>
where
    Action: Clone + Debug,
{
    /// Returns the value for this node
    pub fn value(&self) -> f64 {
        match self {
            SearchReturn::Node { value, .. } => *value,
            SearchReturn::Leaf { value, .. } => *value,
        }
    }

    /// Returns the ply this node was found at
    pub fn depth(&self) -> usize {
        match self {
            SearchReturn::Node { depth, .. } | SearchReturn::Leaf { depth, .. } => *depth,
        }
    }

    /// Returns the action chosen at this node
    ///
    /// At the root this is the move the maximizing agent should make. Leaves and chance nodes
    /// return None
    pub fn best_action(&self) -> Option<&Action> {
        self.chosen_option().map(|(action, _)| action)
    }

    fn chosen_option(&self) -> Option<&(Action, Self)> {
        match self {
            SearchReturn::Leaf { .. } => None,
            SearchReturn::Node {
                options, chosen, ..
            } => chosen.and_then(|i| options.get(i)),
        }
    }

    /// Returns all the actions in the 'route' through the game tree that the search expects to
    /// be played, paired with the agent playing them
    ///
    /// The route ends at the first leaf or chance node, since a chance node doesn't pick a
    /// single action. This is useful for debugging as it shows the line each agent was expected
    /// to follow
    pub fn chosen_route(&self) -> Vec<(usize, Action)> {
        match self {
            SearchReturn::Leaf { .. } => vec![],
            SearchReturn::Node { agent, .. } => {
                if let Some((action, child)) = self.chosen_option() {
                    let mut tail = child.chosen_route();
                    tail.insert(0, (*agent, action.clone()));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// The number of nodes visited to produce this result, leaves included
    pub fn node_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 1,
            SearchReturn::Node { options, .. } => {
                1 + options.iter().map(|(_, r)| r.node_count()).sum::<usize>()
            }
        }
    }

    /// The number of nodes where alpha-beta pruning triggered
    pub fn cutoff_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 0,
            SearchReturn::Node {
                options, cutoff, ..
            } => {
                usize::from(*cutoff) + options.iter().map(|(_, r)| r.cutoff_count()).sum::<usize>()
            }
        }
    }

    /// The deepest ply any node in this result was found at
    pub fn max_depth(&self) -> usize {
        match self {
            SearchReturn::Leaf { depth, .. } => *depth,
            SearchReturn::Node { depth, options, .. } => options
                .iter()
                .map(|(_, r)| r.max_depth())
                .max()
                .unwrap_or(*depth),
        }
    }

    /// Whether any branch was cut short by the depth limit rather than ending on its own
    ///
    /// If this is false, searching deeper can't change the result. Subtrees skipped by a cutoff
    /// don't count: with the same explored values the same cutoffs happen again
    pub fn reached_depth_limit(&self) -> bool {
        match self {
            SearchReturn::Leaf { reason, .. } => *reason == LeafReason::DepthLimit,
            SearchReturn::Node { options, .. } => {
                options.iter().any(|(_, r)| r.reached_depth_limit())
            }
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the value of every node, and which agent played which action to get there
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { value, reason, .. } => {
                StringTreeNode::new(format!("{label} {value} ({reason:?})"))
            }
            SearchReturn::Node {
                agent,
                kind,
                options,
                chosen,
                value,
                cutoff,
                ..
            } => {
                let cutoff = if *cutoff { " cutoff" } else { "" };
                let mut node = StringTreeNode::new(format!(
                    "{label} {value} ({kind:?} agent {agent}{cutoff})"
                ));
                for (i, (action, result)) in options.iter().enumerate() {
                    let marker = if *chosen == Some(i) { "*" } else { "" };
                    node.push_node(result.to_text_tree_node(format!("{marker}{action:?}")));
                }

                node
            }
        }
    }
}
