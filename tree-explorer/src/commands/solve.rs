use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use game_tree_search::{
    explicit::ExplicitGame,
    search::{CachedScore, GameScore, GameTreeSearcher, Scorable, SearcherOptions},
};
use tracing::info;

use crate::fixture::{format_route, load_fixture, VariantArg};

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Path to the game tree JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// Which search to run
    #[clap(short, long, value_enum, default_value_t = VariantArg::AlphaBeta)]
    variant: VariantArg,

    /// Rounds to look ahead. Every agent moves once per round
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// Print every node the search visited
    #[clap(long)]
    tree: bool,

    /// Remember the score of states we have already evaluated
    #[clap(long)]
    cache: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;
        let options = SearcherOptions {
            depth_limit: self.depth,
            ..Default::default()
        };

        if self.cache {
            let score = CachedScore::new(GameScore);
            let searcher = GameTreeSearcher::new("solve", self.variant.into(), score, options);
            self.report(&searcher, &game);
            info!(
                cached_states = searcher.score_function().cached_states(),
                "Evaluation cache"
            );
        } else {
            let searcher = GameTreeSearcher::new("solve", self.variant.into(), GameScore, options);
            self.report(&searcher, &game);
        }

        Ok(())
    }

    fn report<S>(&self, searcher: &GameTreeSearcher<S>, game: &ExplicitGame)
    where
        S: Scorable<ExplicitGame>,
    {
        let result = searcher.search(game);

        let action = match result.best_action() {
            Some(action) => action.green().bold().to_string(),
            None => "none".red().to_string(),
        };
        println!("{} {}", "Variant:".bold(), searcher.variant);
        println!("{} {action}", "Chosen action:".bold());
        println!("{} {}", "Value:".bold(), result.value());
        println!(
            "{} {} ({} cutoffs)",
            "Nodes visited:".bold(),
            result.node_count(),
            result.cutoff_count()
        );
        println!("{} {}", "Route:".bold(), format_route(&result.chosen_route()));

        if self.tree {
            println!();
            println!("{}", result.to_text_tree());
        }
    }
}
