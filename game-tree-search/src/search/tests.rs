use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;
use crate::{
    explicit::{ExplicitGame, RandomTreeShape},
    game::AdversarialGame,
};

fn fixture(json: &str) -> ExplicitGame {
    ExplicitGame::from_json(json).unwrap()
}

fn searcher(variant: SearchVariant, depth_limit: usize) -> GameTreeSearcher<GameScore> {
    GameTreeSearcher::new(
        "test",
        variant,
        GameScore,
        SearcherOptions {
            depth_limit,
            ..Default::default()
        },
    )
}

fn random_game(seed: u64) -> (ExplicitGame, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let shape = RandomTreeShape {
        num_agents: rng.gen_range(1..=4),
        branching: rng.gen_range(1..=3),
        rounds: rng.gen_range(1..=3),
        terminal_chance: 0.1,
        score_range: 10,
    };
    let depth_limit = rng.gen_range(0..=shape.rounds + 1);

    (ExplicitGame::random(&mut rng, shape).unwrap(), depth_limit)
}

#[test]
fn test_single_agent_picks_the_higher_score() {
    let game = fixture(
        r#"{ "num_agents": 1, "root": { "children": [
            { "action": "five", "score": 5 },
            { "action": "ten", "score": 10 }
        ]}}"#,
    );

    assert_eq!(minimax_action(&game, 1, GameScore), Some("ten".to_owned()));
    assert_eq!(alpha_beta_action(&game, 1, GameScore), Some("ten".to_owned()));
    assert_eq!(expectimax_action(&game, 1, GameScore), Some("ten".to_owned()));
}

#[test]
fn test_minimax_takes_the_guaranteed_minimum() {
    let game = fixture(include_str!("../../fixtures/trap.json"));

    let result = searcher(SearchVariant::Minimax, 1).search(&game);

    assert_eq!(result.best_action(), Some(&"safe".to_owned()));
    assert_eq!(result.value(), 3.0);
    assert_eq!(
        result.chosen_route(),
        vec![(0, "safe".to_owned()), (1, "a".to_owned())]
    );
    assert_eq!(alpha_beta_action(&game, 1, GameScore), Some("safe".to_owned()));
}

#[test]
fn test_expectimax_gambles_on_random_opponents() {
    let game = fixture(include_str!("../../fixtures/trap.json"));

    let result = searcher(SearchVariant::Expectimax, 1).search(&game);

    assert_eq!(result.best_action(), Some(&"risky".to_owned()));
    assert_eq!(result.value(), (1.0 + 100.0) / 2.0);
    // The route stops at the chance node since it never picks an action
    assert_eq!(result.chosen_route(), vec![(0, "risky".to_owned())]);
}

#[test]
fn test_chance_node_is_the_mean_of_its_children() {
    let game = fixture(
        r#"{ "num_agents": 2, "root": { "children": [
            { "action": "only", "children": [
                { "action": "a", "score": 1 },
                { "action": "b", "score": 2 },
                { "action": "c", "score": 6 }
            ]}
        ]}}"#,
    );

    let result = searcher(SearchVariant::Expectimax, 1).search(&game);

    let SearchReturn::Node { options, .. } = &result else {
        panic!("The root should be a node");
    };
    let (_, chance) = &options[0];
    assert!(matches!(
        chance,
        SearchReturn::Node {
            kind: NodeKind::Chance,
            chosen: None,
            ..
        }
    ));
    assert_eq!(chance.value(), (1.0 + 2.0 + 6.0) / 3.0);
    assert_eq!(result.value(), 3.0);
}

#[test]
fn test_textbook_tree_prunes() {
    let game = fixture(include_str!("../../fixtures/textbook.json"));

    let minimax = searcher(SearchVariant::Minimax, 1).search(&game);
    let alpha_beta = searcher(SearchVariant::AlphaBeta, 1).search(&game);

    assert_eq!(minimax.value(), 3.0);
    assert_eq!(alpha_beta.value(), 3.0);
    assert_eq!(minimax.best_action(), Some(&"left".to_owned()));
    assert_eq!(alpha_beta.best_action(), Some(&"left".to_owned()));

    assert_eq!(minimax.node_count(), 13);
    assert_eq!(minimax.cutoff_count(), 0);
    assert_eq!(alpha_beta.node_count(), 11);
    assert_eq!(alpha_beta.cutoff_count(), 2);
}

#[test]
fn test_multiple_opponents_move_in_turn() {
    let game = fixture(include_str!("../../fixtures/two_ghosts.json"));

    let minimax = searcher(SearchVariant::Minimax, 1).search(&game);
    let alpha_beta = searcher(SearchVariant::AlphaBeta, 1).search(&game);
    let expectimax = searcher(SearchVariant::Expectimax, 1).search(&game);

    assert_eq!(minimax.best_action(), Some(&"west".to_owned()));
    assert_eq!(minimax.value(), 2.0);
    assert_eq!(
        minimax.chosen_route(),
        vec![
            (0, "west".to_owned()),
            (1, "south".to_owned()),
            (2, "south".to_owned())
        ]
    );

    assert_eq!(alpha_beta.best_action(), Some(&"west".to_owned()));
    assert_eq!(alpha_beta.value(), 2.0);
    assert_eq!(minimax.node_count(), 16);
    assert_eq!(alpha_beta.node_count(), 12);

    assert_eq!(expectimax.best_action(), Some(&"east".to_owned()));
    assert_eq!(expectimax.value(), 5.5);
}

#[test]
fn test_decided_states_are_not_expanded() {
    let game = fixture(include_str!("../../fixtures/two_ghosts.json"));

    for variant in SearchVariant::ALL {
        let result = searcher(variant, 2).search(&game);
        let SearchReturn::Node { options, .. } = &result else {
            panic!("The root should be a node");
        };
        let (action, stop) = &options[2];

        assert_eq!(action, "stop");
        assert!(matches!(
            stop,
            SearchReturn::Leaf {
                depth: 1,
                reason: LeafReason::Lose,
                ..
            }
        ));
        assert_eq!(stop.value(), -500.0);
    }
}

#[test]
fn test_decided_root_has_no_action() {
    let game = fixture(
        r#"{ "num_agents": 2, "root": { "outcome": "win", "score": 42, "children": [
            { "action": "pointless", "score": 1 }
        ]}}"#,
    );

    let result = searcher(SearchVariant::AlphaBeta, 3).search(&game);

    assert!(matches!(
        result,
        SearchReturn::Leaf {
            reason: LeafReason::Win,
            ..
        }
    ));
    assert_eq!(result.value(), 42.0);
    assert_eq!(result.node_count(), 1);
    assert_eq!(result.best_action(), None);
}

#[test]
fn test_root_without_actions_has_no_action() {
    let game = fixture(r#"{ "num_agents": 2, "root": { "score": 9 } }"#);

    for variant in SearchVariant::ALL {
        let result = searcher(variant, 2).search(&game);

        assert!(matches!(
            result,
            SearchReturn::Leaf {
                reason: LeafReason::NoLegalActions,
                ..
            }
        ));
        assert_eq!(result.value(), 9.0);
        assert_eq!(choose_action(&game, 2, GameScore, variant), None);
    }
}

#[test]
fn test_zero_depth_limit_only_scores_the_root() {
    let game = fixture(include_str!("../../fixtures/trap.json"));

    let result = searcher(SearchVariant::Minimax, 0).search(&game);

    assert!(matches!(
        result,
        SearchReturn::Leaf {
            depth: 0,
            reason: LeafReason::DepthLimit,
            ..
        }
    ));
    assert_eq!(minimax_action(&game, 0, GameScore), None);
}

#[test]
fn test_huge_depth_limit_searches_the_whole_tree() {
    let game = fixture(include_str!("../../fixtures/trap.json"));

    assert_eq!(
        minimax_action(&game, usize::MAX, GameScore),
        Some("safe".to_owned())
    );
    assert_eq!(
        alpha_beta_action(&game, usize::MAX, GameScore),
        Some("safe".to_owned())
    );

    let result = searcher(SearchVariant::Expectimax, usize::MAX).search(&game);

    assert_eq!(result.best_action(), Some(&"risky".to_owned()));
    assert_eq!(result.value(), 50.5);
    assert!(!result.reached_depth_limit());
}

#[derive(Debug, Clone)]
struct NoAgents;

impl AdversarialGame for NoAgents {
    type Action = u8;

    fn legal_actions(&self, _agent: usize) -> Vec<u8> {
        vec![1, 2]
    }

    fn successor(&self, _agent: usize, _action: &u8) -> Self {
        NoAgents
    }

    fn num_agents(&self) -> usize {
        0
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        1.5
    }
}

#[test]
fn test_zero_agents_only_scores_the_root() {
    for variant in SearchVariant::ALL {
        let result = searcher(variant, 3).search(&NoAgents);

        assert!(matches!(
            result,
            SearchReturn::Leaf {
                depth: 0,
                value,
                reason: LeafReason::DepthLimit,
            } if value == 1.5
        ));
        assert_eq!(choose_action(&NoAgents, 3, GameScore, variant), None);
    }
}

#[test]
fn test_opponent_without_actions_is_scored_in_place() {
    let game = fixture(
        r#"{ "num_agents": 2, "root": { "children": [
            { "action": "stuck", "score": 4 },
            { "action": "free", "children": [
                { "action": "a", "score": 2 }
            ]}
        ]}}"#,
    );

    let result = searcher(SearchVariant::Minimax, 1).search(&game);

    assert_eq!(result.best_action(), Some(&"stuck".to_owned()));
    assert_eq!(result.value(), 4.0);
}

#[test]
fn test_ties_go_to_the_first_action() {
    let game = fixture(
        r#"{ "num_agents": 2, "root": { "children": [
            { "action": "first", "children": [
                { "action": "x", "score": 5 },
                { "action": "y", "score": 5 }
            ]},
            { "action": "second", "children": [
                { "action": "x", "score": 5 },
                { "action": "y", "score": 6 }
            ]}
        ]}}"#,
    );

    for variant in [SearchVariant::Minimax, SearchVariant::AlphaBeta] {
        let result = searcher(variant, 1).search(&game);

        assert_eq!(result.best_action(), Some(&"first".to_owned()));
        assert_eq!(
            result.chosen_route(),
            vec![(0, "first".to_owned()), (1, "x".to_owned())]
        );
    }
}

#[test]
fn test_custom_evaluation_is_used_at_the_frontier() {
    let game = fixture(include_str!("../../fixtures/trap.json"));
    let negated = |game: &ExplicitGame| -game.score();

    // Flipping the sign turns the opponent's 'b' replies into the guaranteed minimums
    assert_eq!(minimax_action(&game, 1, negated), Some("safe".to_owned()));
    assert_eq!(
        searcher(SearchVariant::Minimax, 1).search(&game).value(),
        3.0
    );
    assert_eq!(
        GameTreeSearcher::new("negated", SearchVariant::Minimax, negated, Default::default())
            .search(&game)
            .value(),
        -7.0
    );
}

#[test]
fn test_cached_evaluation_matches_uncached() {
    let game = fixture(include_str!("../../fixtures/two_ghosts.json"));
    let cached = CachedScore::new(GameScore);

    let searcher_with_cache = GameTreeSearcher::new(
        "cached",
        SearchVariant::Expectimax,
        cached.clone(),
        SearcherOptions {
            depth_limit: 1,
            ..Default::default()
        },
    );

    let result = searcher_with_cache.search(&game);

    assert_eq!(result.value(), 5.5);
    // 8 frontier leaves plus the decided 'stop' state
    assert_eq!(cached.cached_states(), 9);

    searcher_with_cache.search(&game);
    assert_eq!(cached.cached_states(), 9);
}

#[test]
fn test_alpha_beta_matches_minimax_on_random_trees() {
    for seed in 0..300 {
        let (game, depth_limit) = random_game(seed);

        let minimax = searcher(SearchVariant::Minimax, depth_limit).search(&game);
        let alpha_beta = searcher(SearchVariant::AlphaBeta, depth_limit).search(&game);

        assert_eq!(minimax.value(), alpha_beta.value(), "seed {seed}");
        assert_eq!(
            minimax.best_action(),
            alpha_beta.best_action(),
            "seed {seed}"
        );
        assert!(alpha_beta.node_count() <= minimax.node_count(), "seed {seed}");
    }
}

#[test]
fn test_search_never_passes_the_depth_limit() {
    for seed in 0..100 {
        let (game, depth_limit) = random_game(seed);
        let plies = depth_limit * game.num_agents();

        for variant in SearchVariant::ALL {
            let result = searcher(variant, depth_limit).search(&game);

            assert!(result.max_depth() <= plies, "seed {seed} {variant}");
        }
    }
}

#[test]
fn test_depth_limit_cuts_deep_trees() {
    let mut rng = StdRng::seed_from_u64(3);
    let shape = RandomTreeShape {
        num_agents: 3,
        branching: 2,
        rounds: 3,
        terminal_chance: 0.0,
        score_range: 10,
    };
    let game = ExplicitGame::random(&mut rng, shape).unwrap();

    let result = searcher(SearchVariant::Expectimax, 1).search(&game);

    assert_eq!(result.max_depth(), 3);
    assert!(result.reached_depth_limit());
}

#[test]
fn test_variant_names_round_trip() {
    for variant in SearchVariant::ALL {
        assert_eq!(variant.to_string().parse::<SearchVariant>().unwrap(), variant);
    }

    assert!("negamax".parse::<SearchVariant>().is_err());
}

#[test]
fn test_deepening_stops_once_the_tree_is_exhausted() {
    let game = fixture(include_str!("../../fixtures/textbook.json"));
    let searcher = searcher(SearchVariant::AlphaBeta, 1);

    let (depth, result) = searcher
        .deepened_search_until_timelimit(game, Duration::from_secs(10))
        .unwrap();

    // Depth 1 stops right on the leaves, depth 2 sees that they have no actions
    assert_eq!(depth, 2);
    assert_eq!(result.value(), 3.0);
    assert_eq!(result.best_action(), Some(&"left".to_owned()));
}

#[test]
fn test_deepening_respects_max_depth_limit() {
    let mut rng = StdRng::seed_from_u64(5);
    let shape = RandomTreeShape {
        num_agents: 2,
        branching: 2,
        rounds: 4,
        terminal_chance: 0.0,
        score_range: 10,
    };
    let game = ExplicitGame::random(&mut rng, shape).unwrap();
    let searcher = GameTreeSearcher::new(
        "capped",
        SearchVariant::Minimax,
        GameScore,
        SearcherOptions {
            max_depth_limit: Some(2),
            ..Default::default()
        },
    );

    let (depth, result) = searcher
        .deepened_search_until_timelimit(game.clone(), Duration::from_secs(10))
        .unwrap();

    assert_eq!(depth, 2);
    assert_eq!(
        result.value(),
        self::searcher(SearchVariant::Minimax, 2).search(&game).value()
    );
}

#[test]
fn test_deepening_without_time_returns_nothing() {
    let game = fixture(include_str!("../../fixtures/textbook.json"));

    let result = searcher(SearchVariant::Minimax, 1)
        .deepened_search_until_timelimit(game, Duration::ZERO);

    assert!(result.is_none());
}
