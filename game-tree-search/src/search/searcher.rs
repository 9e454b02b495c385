use std::{
    fmt::Display,
    str::FromStr,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use derivative::Derivative;
use tracing::{debug, info, info_span, trace};

use crate::game::{AdversarialGame, MAXIMIZING_AGENT};

use super::{
    combinator::{Combinator, Window},
    LeafReason, NodeKind, Scorable, SearchReturn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which flavour of game-tree search to run
pub enum SearchVariant {
    /// Plain minimax: every opponent minimizes
    Minimax,
    /// Minimax with alpha-beta pruning. Returns the same values as [SearchVariant::Minimax]
    /// while skipping subtrees that can't change the result
    AlphaBeta,
    /// Opponents are modeled as picking uniformly at random between their legal actions
    Expectimax,
}

impl SearchVariant {
    /// Every variant, in the order they are usually reported
    pub const ALL: [SearchVariant; 3] = [
        SearchVariant::Minimax,
        SearchVariant::AlphaBeta,
        SearchVariant::Expectimax,
    ];

    /// The kind of node the given agent's turn produces under this variant
    pub fn node_kind(&self, agent: usize) -> NodeKind {
        match (agent, self) {
            (MAXIMIZING_AGENT, _) => NodeKind::Max,
            (_, SearchVariant::Minimax | SearchVariant::AlphaBeta) => NodeKind::Min,
            (_, SearchVariant::Expectimax) => NodeKind::Chance,
        }
    }

    /// Whether this variant threads an alpha-beta window through the tree
    pub fn prunes(&self) -> bool {
        matches!(self, SearchVariant::AlphaBeta)
    }
}

impl Display for SearchVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchVariant::Minimax => "minimax",
            SearchVariant::AlphaBeta => "alpha-beta",
            SearchVariant::Expectimax => "expectimax",
        };

        write!(f, "{name}")
    }
}

impl FromStr for SearchVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(SearchVariant::Minimax),
            "alpha-beta" | "alphabeta" => Ok(SearchVariant::AlphaBeta),
            "expectimax" => Ok(SearchVariant::Expectimax),
            other => Err(anyhow::anyhow!("Unknown search variant {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Optional properties that can be defined for a [GameTreeSearcher]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use std::time::Duration;
/// use game_tree_search::search::SearcherOptions;
///
/// let defaults: SearcherOptions = Default::default();
///
/// assert_eq!(defaults.depth_limit, 2);
/// assert_eq!(defaults.deadline_padding, Duration::from_millis(5));
/// assert_eq!(defaults.max_depth_limit, None);
/// ```
pub struct SearcherOptions {
    /// How many rounds to look ahead. One round is a single move by every agent, so the search
    /// stops at ply `depth_limit * num_agents`
    ///
    /// Defaults to 2
    pub depth_limit: usize,
    /// How long to 'reserve' at the end of a time budget
    ///
    /// Used by [GameTreeSearcher::deepened_search_until_timelimit] so that we hand back a result
    /// before the caller's deadline, not right on it
    ///
    /// Defaults to 5 milliseconds
    pub deadline_padding: Duration,
    /// The deepest depth limit iterative deepening will try, if any
    pub max_depth_limit: Option<usize>,
}

impl Default for SearcherOptions {
    fn default() -> Self {
        Self {
            depth_limit: 2,
            deadline_padding: Duration::from_millis(5),
            max_depth_limit: None,
        }
    }
}

#[derive(Debug, Copy, Clone)]
/// This type is used to represent that the main thread
/// told the worker thread to stop running so we returned
/// out of the current context
pub(crate) struct AbortedEarly;

#[derive(Debug, Copy, Clone)]
enum FromWorkerAction {
    KeepGoing,
    Stop,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and a search variant and can be used to pick
/// actions for the maximizing agent (agent 0) of any [AdversarialGame]
///
/// It also outputs traces using the [tracing] crate.
pub struct GameTreeSearcher<ScorableType> {
    /// Shows up in the traces so searches from different searchers can be told apart
    pub name: &'static str,
    /// The search to run
    pub variant: SearchVariant,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearcherOptions,
}

impl<ScorableType> GameTreeSearcher<ScorableType> {
    /// Construct a new `GameTreeSearcher`
    ///
    /// [SearcherOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    ///
    /// ```rust
    /// use game_tree_search::{
    ///     explicit::ExplicitGame,
    ///     search::{GameScore, GameTreeSearcher, SearchVariant, SearcherOptions},
    /// };
    ///
    /// let game = ExplicitGame::from_json(
    ///     r#"{
    ///         "num_agents": 1,
    ///         "root": {
    ///             "children": [
    ///                 { "action": "stay", "score": 5 },
    ///                 { "action": "go", "score": 10 }
    ///             ]
    ///         }
    ///     }"#,
    /// )
    /// .unwrap();
    ///
    /// let searcher = GameTreeSearcher::new(
    ///     "doc",
    ///     SearchVariant::AlphaBeta,
    ///     GameScore,
    ///     SearcherOptions {
    ///         depth_limit: 1,
    ///         ..Default::default()
    ///     },
    /// );
    ///
    /// assert_eq!(searcher.choose_action(&game), Some("go".to_owned()));
    /// ```
    pub fn new(
        name: &'static str,
        variant: SearchVariant,
        score_function: ScorableType,
        options: SearcherOptions,
    ) -> Self {
        Self {
            name,
            variant,
            score_function,
            options,
        }
    }

    /// The options this searcher was built with
    pub fn options(&self) -> &SearcherOptions {
        &self.options
    }

    /// The scorer used to evaluate leaves
    pub fn score_function(&self) -> &ScorableType {
        &self.score_function
    }

    /// Run the search from `game` and return everything it found
    ///
    /// The root is always the maximizing agent's turn. If the root has no legal actions, or is
    /// already won or lost, the result is a single leaf.
    pub fn search<GameType>(&self, game: &GameType) -> SearchReturn<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        let span = info_span!(
            "game_tree_search",
            searcher = self.name,
            variant = %self.variant,
            depth_limit = self.options.depth_limit,
            num_agents = game.num_agents(),
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            nodes = tracing::field::Empty,
        );
        let _entered = span.enter();

        let result = match self.search_node(
            game,
            0,
            self.options.depth_limit.saturating_mul(game.num_agents()),
            Window::unbounded(),
            None,
        ) {
            Ok(result) => result,
            Err(AbortedEarly) => unreachable!("There is no halt channel so we can't be aborted"),
        };

        span.record("chosen_value", result.value());
        span.record(
            "chosen_action",
            format!("{:?}", result.best_action()).as_str(),
        );
        span.record("nodes", result.node_count() as u64);

        result
    }

    /// Pick the action the maximizing agent should make, if it has any
    pub fn choose_action<GameType>(&self, game: &GameType) -> Option<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        self.search(game).best_action().cloned()
    }

    fn leaf_reason<GameType: AdversarialGame>(
        node: &GameType,
        depth: usize,
        max_plies: usize,
    ) -> Option<LeafReason> {
        if node.is_win() {
            Some(LeafReason::Win)
        } else if node.is_lose() {
            Some(LeafReason::Lose)
        } else if depth >= max_plies {
            Some(LeafReason::DepthLimit)
        } else {
            None
        }
    }

    fn search_node<GameType>(
        &self,
        node: &GameType,
        depth: usize,
        max_plies: usize,
        window: Window,
        worker_halt_reciever: Option<&mpsc::Receiver<()>>,
    ) -> Result<SearchReturn<GameType::Action>, AbortedEarly>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        if let Some(reason) = Self::leaf_reason(node, depth, max_plies) {
            return Ok(SearchReturn::Leaf {
                depth,
                value: self.score_function.score(node),
                reason,
            });
        }

        let agent = depth % node.num_agents();
        let kind = self.variant.node_kind(agent);
        let actions = node.legal_actions(agent);

        if actions.is_empty() {
            return Ok(SearchReturn::Leaf {
                depth,
                value: self.score_function.score(node),
                reason: LeafReason::NoLegalActions,
            });
        }

        let mut window = window;
        let mut combinator = Combinator::new(kind, actions.len());
        let mut cutoff = false;

        for action in actions {
            if let Some(worker_halt_reciever) = worker_halt_reciever {
                if worker_halt_reciever.try_recv().is_ok() {
                    return Err(AbortedEarly);
                }
            }

            let child = node.successor(agent, &action);
            let child_return =
                self.search_node(&child, depth + 1, max_plies, window, worker_halt_reciever)?;
            let value = combinator.push(action, child_return);

            if self.variant.prunes() {
                if window.cuts_off(kind, value) {
                    trace!(depth, agent, value, ?window, "alpha-beta cutoff");
                    cutoff = true;
                    break;
                }

                window.tighten(kind, value);
            }
        }

        Ok(combinator.finish(agent, depth, cutoff))
    }

    /// This will do an iterative deepening search until we reach the time limit [minus the
    /// `deadline_padding` from the options]. Iterative deepening means it will first search with
    /// a depth limit of 1, then 2, and so on, keeping the result of the deepest search that
    /// finished in time.
    ///
    /// The actual search is run in a separate thread so that we don't have issues with returning
    /// in time if we started a long search that may not return in time. When we return from the
    /// main/timing thread we also send a signal the the 'worker' thread telling it to stop, so as
    /// not to waste CPU cycles
    ///
    /// We stop early once a search never hits the depth limit, since searching deeper can't
    /// change anything, or once we reach [SearcherOptions::max_depth_limit].
    ///
    /// Returns the depth limit of the result we kept, or None if not even a depth limit of 1
    /// finished in time
    pub fn deepened_search_until_timelimit<GameType>(
        &self,
        game: GameType,
        budget: Duration,
    ) -> Option<(usize, SearchReturn<GameType::Action>)>
    where
        GameType: AdversarialGame + Send + 'static,
        GameType::Action: Send + 'static,
        ScorableType: Scorable<GameType> + Clone + Send + 'static,
    {
        let span = info_span!(
            "deepened_search",
            searcher = self.name,
            variant = %self.variant,
            budget_ms = budget.as_millis() as u64,
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            depth = tracing::field::Empty,
        );
        let _entered = span.enter();

        let max_duration = budget.saturating_sub(self.options.deadline_padding);
        let started_at = Instant::now();

        let (to_main_thread, from_worker_thread) = mpsc::channel();
        let (suspend_worker, worker_halt_reciever) = mpsc::channel();

        let worker = self.clone();
        thread::spawn(move || {
            let mut depth_limit: usize = 1;

            loop {
                let result = match worker.search_node(
                    &game,
                    0,
                    depth_limit.saturating_mul(game.num_agents()),
                    Window::unbounded(),
                    Some(&worker_halt_reciever),
                ) {
                    Ok(result) => result,
                    Err(AbortedEarly) => return,
                };

                debug!(
                    depth_limit,
                    value = result.value(),
                    nodes = result.node_count() as u64,
                    "finished deepening iteration"
                );

                let exhausted = !result.reached_depth_limit();
                let at_max = worker
                    .options
                    .max_depth_limit
                    .map_or(false, |max| depth_limit >= max);
                let action = if exhausted || at_max {
                    FromWorkerAction::Stop
                } else {
                    FromWorkerAction::KeepGoing
                };

                let send_result = to_main_thread.send((action, depth_limit, result));

                if send_result.is_err() || matches!(action, FromWorkerAction::Stop) {
                    return;
                }

                depth_limit += 1;
            }
        });

        let mut current = None;

        while let Some(remaining) = max_duration.checked_sub(started_at.elapsed()) {
            match from_worker_thread.recv_timeout(remaining) {
                Ok((action, depth, result)) => {
                    current = Some((depth, result));

                    if matches!(action, FromWorkerAction::Stop) {
                        info!(depth, "Nothing left to gain from searching deeper");
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
            }
        }

        // We can't kill the thread so we use this to help the
        // worker know when to stop
        let _ = suspend_worker.send(());

        if let Some((depth, result)) = &current {
            span.record("chosen_value", result.value());
            span.record(
                "chosen_action",
                format!("{:?}", result.best_action()).as_str(),
            );
            span.record("depth", *depth as u64);
        }

        current
    }
}

/// Pick the maximizing agent's action from `game` with the given search variant
///
/// `depth_limit` counts rounds, where every agent moves once per round. Returns None when the
/// root has no legal actions, is already decided, or `depth_limit` is 0.
pub fn choose_action<GameType, ScorableType>(
    game: &GameType,
    depth_limit: usize,
    evaluation: ScorableType,
    variant: SearchVariant,
) -> Option<GameType::Action>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    let options = SearcherOptions {
        depth_limit,
        ..Default::default()
    };

    GameTreeSearcher::new("choose_action", variant, evaluation, options).choose_action(game)
}

/// [choose_action] with [SearchVariant::Minimax]
pub fn minimax_action<GameType, ScorableType>(
    game: &GameType,
    depth_limit: usize,
    evaluation: ScorableType,
) -> Option<GameType::Action>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    choose_action(game, depth_limit, evaluation, SearchVariant::Minimax)
}

/// [choose_action] with [SearchVariant::AlphaBeta]
pub fn alpha_beta_action<GameType, ScorableType>(
    game: &GameType,
    depth_limit: usize,
    evaluation: ScorableType,
) -> Option<GameType::Action>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    choose_action(game, depth_limit, evaluation, SearchVariant::AlphaBeta)
}

/// [choose_action] with [SearchVariant::Expectimax]
pub fn expectimax_action<GameType, ScorableType>(
    game: &GameType,
    depth_limit: usize,
    evaluation: ScorableType,
) -> Option<GameType::Action>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    choose_action(game, depth_limit, evaluation, SearchVariant::Expectimax)
}
