use std::{fs::read_to_string, path::Path};

#[cfg(test)]
use std::path::PathBuf;

use clap::ValueEnum;
use color_eyre::eyre::{eyre, Result, WrapErr};
use game_tree_search::{explicit::ExplicitGame, search::SearchVariant};
use itertools::Itertools;

/// Load and validate a game tree fixture
pub(crate) fn load_fixture(path: &Path) -> Result<ExplicitGame> {
    let json =
        read_to_string(path).wrap_err_with(|| format!("Could not read {}", path.display()))?;

    ExplicitGame::from_json(&json)
        .map_err(|e| eyre!("{e:#}"))
        .wrap_err_with(|| format!("{} is not a valid game tree", path.display()))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum VariantArg {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl From<VariantArg> for SearchVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Minimax => SearchVariant::Minimax,
            VariantArg::AlphaBeta => SearchVariant::AlphaBeta,
            VariantArg::Expectimax => SearchVariant::Expectimax,
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../game-tree-search/fixtures")
        .join(name)
}

/// Render a principal line as `agent 0: west -> agent 1: south`
pub(crate) fn format_route(route: &[(usize, String)]) -> String {
    if route.is_empty() {
        return "(empty)".to_owned();
    }

    route
        .iter()
        .map(|(agent, action)| format!("agent {agent}: {action}"))
        .join(" -> ")
}
