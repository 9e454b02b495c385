pub mod compare;
pub mod deepen;
pub mod generate;
pub mod reflex;
pub mod solve;

use compare::Compare;
use deepen::Deepen;
use generate::Generate;
use reflex::Reflex;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run one search variant over a game tree
    Solve(Solve),
    /// Run every search variant over a game tree and compare them
    Compare(Compare),
    /// Search deeper and deeper until a time budget runs out
    Deepen(Deepen),
    /// Pick an action one move ahead, breaking ties at random
    Reflex(Reflex),
    /// Write a random game tree fixture
    Generate(Generate),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Compare(c) => c.run()?,
            Command::Deepen(d) => d.run()?,
            Command::Reflex(r) => r.run()?,
            Command::Generate(g) => g.run()?,
        }

        Ok(())
    }
}
