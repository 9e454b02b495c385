use std::fmt::Debug;

use super::{NodeKind, SearchReturn};

/// The alpha-beta window threaded down the tree
///
/// `None` means unbounded: no alpha yet is minus infinity, no beta yet is plus infinity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Window {
    pub(crate) alpha: Option<f64>,
    pub(crate) beta: Option<f64>,
}

impl Window {
    pub(crate) fn unbounded() -> Self {
        Self::default()
    }

    /// Can the node stop looking at its remaining actions, given its running value
    ///
    /// Comparisons are strict, so equal values never prune
    pub(crate) fn cuts_off(&self, kind: NodeKind, value: f64) -> bool {
        match kind {
            NodeKind::Max => self.beta.map_or(false, |beta| value > beta),
            NodeKind::Min => self.alpha.map_or(false, |alpha| value < alpha),
            NodeKind::Chance => false,
        }
    }

    /// Tighten our side of the window with the node's running value
    pub(crate) fn tighten(&mut self, kind: NodeKind, value: f64) {
        match kind {
            NodeKind::Max => self.alpha = Some(self.alpha.map_or(value, |a| a.max(value))),
            NodeKind::Min => self.beta = Some(self.beta.map_or(value, |b| b.min(value))),
            NodeKind::Chance => {}
        }
    }
}

/// Folds the children of one node into that node's value
///
/// Max and min nodes keep the first child that is strictly better than everything before it, so
/// ties go to whichever action the game listed first. Chance nodes sum the children and average
/// them in [Combinator::finish].
#[derive(Debug)]
pub(crate) struct Combinator<Action: Clone + Debug> {
    kind: NodeKind,
    options: Vec<(Action, SearchReturn<Action>)>,
    chosen: Option<usize>,
    best: Option<f64>,
    total: f64,
}

impl<Action: Clone + Debug> Combinator<Action> {
    pub(crate) fn new(kind: NodeKind, expected_options: usize) -> Self {
        Self {
            kind,
            options: Vec::with_capacity(expected_options),
            chosen: None,
            best: None,
            total: 0.0,
        }
    }

    /// Fold in one child and return the node's running value
    pub(crate) fn push(&mut self, action: Action, child: SearchReturn<Action>) -> f64 {
        let value = child.value();
        self.options.push((action, child));

        let improved = match (self.kind, self.best) {
            (NodeKind::Chance, _) => false,
            (_, None) => true,
            (NodeKind::Max, Some(best)) => value > best,
            (NodeKind::Min, Some(best)) => value < best,
        };

        if improved {
            self.best = Some(value);
            self.chosen = Some(self.options.len() - 1);
        }

        self.total += value;

        match self.kind {
            NodeKind::Chance => self.total / self.options.len() as f64,
            NodeKind::Max | NodeKind::Min => self.best.unwrap_or(value),
        }
    }

    /// Build the finished node. Must only be called after at least one [Combinator::push]
    pub(crate) fn finish(self, agent: usize, depth: usize, cutoff: bool) -> SearchReturn<Action> {
        let value = match self.kind {
            NodeKind::Chance => self.total / self.options.len() as f64,
            NodeKind::Max | NodeKind::Min => self.best.unwrap_or(f64::NAN),
        };

        SearchReturn::Node {
            agent,
            kind: self.kind,
            depth,
            options: self.options,
            chosen: self.chosen,
            value,
            cutoff,
        }
    }
}
