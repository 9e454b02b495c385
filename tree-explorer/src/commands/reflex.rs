use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use game_tree_search::{
    reflex::ReflexAgent,
    search::{GameScore, SuccessorScore},
};
use rand::{rngs::StdRng, SeedableRng};

use crate::fixture::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Reflex {
    /// Path to the game tree JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// Seed for breaking ties. Picks a fresh seed if not given
    #[clap(short, long, value_parser)]
    seed: Option<u64>,
}

impl Reflex {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;
        let agent = ReflexAgent::new(SuccessorScore(GameScore));
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for (action, score) in agent.scored_actions(&game) {
            println!("{action:<12} {score}");
        }

        match agent.choose_action(&game, &mut rng) {
            Some(action) => println!("{} {}", "Chosen action:".bold(), action.green().bold()),
            None => println!("{}", "No legal actions".red().bold()),
        }

        Ok(())
    }
}
