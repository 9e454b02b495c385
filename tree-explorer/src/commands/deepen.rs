use std::{path::PathBuf, time::Duration};

use color_eyre::eyre::Result;
use colored::Colorize;
use game_tree_search::search::{GameScore, GameTreeSearcher, SearcherOptions};

use crate::fixture::{format_route, load_fixture, VariantArg};

#[derive(clap::Args, Debug)]
pub(crate) struct Deepen {
    /// Path to the game tree JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// Which search to run
    #[clap(short, long, value_enum, default_value_t = VariantArg::AlphaBeta)]
    variant: VariantArg,

    /// Time budget in milliseconds
    #[clap(short, long, value_parser, default_value_t = 100)]
    millis: u64,

    /// Never search past this many rounds
    #[clap(long, value_parser)]
    max_depth: Option<usize>,
}

impl Deepen {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;
        let options = SearcherOptions {
            max_depth_limit: self.max_depth,
            ..Default::default()
        };
        let searcher = GameTreeSearcher::new("deepen", self.variant.into(), GameScore, options);

        match searcher.deepened_search_until_timelimit(game, Duration::from_millis(self.millis)) {
            Some((depth, result)) => {
                let action = result
                    .best_action()
                    .cloned()
                    .unwrap_or_else(|| "none".to_owned());

                println!("{} {depth}", "Completed depth limit:".bold());
                println!("{} {}", "Chosen action:".bold(), action.green().bold());
                println!("{} {}", "Value:".bold(), result.value());
                println!("{} {}", "Route:".bold(), format_route(&result.chosen_route()));
            }
            None => {
                println!("{}", "No search finished inside the time budget".red().bold());
            }
        }

        Ok(())
    }
}
