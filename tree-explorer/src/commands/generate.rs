use std::{fs::File, io::BufWriter, path::PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use game_tree_search::explicit::{RandomTreeShape, TreeDescription};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

#[derive(clap::Args, Debug)]
pub(crate) struct Generate {
    /// The most actions any state can have
    #[clap(short, long, value_parser, default_value_t = 3)]
    branching: usize,

    /// Rounds deep the tree goes
    #[clap(short, long, value_parser, default_value_t = 2)]
    rounds: usize,

    /// Number of agents, including the maximizing agent
    #[clap(short, long, value_parser, default_value_t = 2)]
    agents: usize,

    /// Chance that a state ends the game early
    #[clap(long, value_parser, default_value_t = 0.1)]
    terminal_chance: f64,

    /// Seed for the generator
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// Where to write the tree
    #[clap(short, long, value_parser)]
    out: PathBuf,
}

impl Generate {
    pub(crate) fn run(self) -> Result<()> {
        let shape = RandomTreeShape {
            num_agents: self.agents,
            branching: self.branching,
            rounds: self.rounds,
            terminal_chance: self.terminal_chance,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(self.seed);
        let description = TreeDescription::random(&mut rng, shape)
            .map_err(|e| eyre!("{e:#}"))
            .wrap_err("Could not generate a game tree")?;

        let file = File::create(&self.out)
            .wrap_err_with(|| format!("Could not create {}", self.out.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &description)?;

        info!(path = %self.out.display(), "Wrote random game tree");

        Ok(())
    }
}
