use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use game_tree_search::search::{GameScore, GameTreeSearcher, SearchVariant, SearcherOptions};
use tracing::warn;

use crate::fixture::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Path to the game tree JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// Rounds to look ahead. Every agent moves once per round
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;
        let options = SearcherOptions {
            depth_limit: self.depth,
            ..Default::default()
        };

        println!(
            "{:<12} {:<12} {:>10} {:>8} {:>8}",
            "variant", "action", "value", "nodes", "cutoffs"
        );

        let mut adversarial = vec![];
        for variant in SearchVariant::ALL {
            let searcher = GameTreeSearcher::new("compare", variant, GameScore, options);
            let result = searcher.search(&game);
            let action = result
                .best_action()
                .cloned()
                .unwrap_or_else(|| "none".to_owned());

            println!(
                "{:<12} {:<12} {:>10} {:>8} {:>8}",
                variant.to_string().bold(),
                action,
                result.value(),
                result.node_count(),
                result.cutoff_count()
            );

            if variant != SearchVariant::Expectimax {
                adversarial.push((variant, action, result.value()));
            }
        }

        if let [(_, minimax_action, minimax_value), (_, pruned_action, pruned_value)] =
            adversarial.as_slice()
        {
            if minimax_action != pruned_action || minimax_value != pruned_value {
                warn!(
                    %minimax_action,
                    minimax_value,
                    %pruned_action,
                    pruned_value,
                    "Alpha-beta disagreed with minimax"
                );
                println!("{}", "alpha-beta and minimax disagree".red().bold());
            }
        }

        Ok(())
    }
}
