//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod categories;
pub mod dismiss;
pub mod history;
pub mod launch;
pub mod suggest;

use crate::app::AppContext;
use crate::error::{NudgeError, Result};

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Suggest(args) => suggest::run(ctx, args),
        Commands::Dismiss(args) => dismiss::run(ctx, args),
        Commands::Launch(args) => launch::run(ctx, args),
        Commands::History(args) => history::run(ctx, args),
        Commands::Categories(args) => categories::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show eligible suggestions, most relevant first
    Suggest(suggest::SuggestArgs),

    /// Dismiss a suggestion so it stops appearing
    Dismiss(dismiss::DismissArgs),

    /// Record that a suggestion was launched
    Launch(launch::LaunchArgs),

    /// Show the interaction history and ranking features of a suggestion
    History(history::HistoryArgs),

    /// List the active categories in precedence order
    Categories(categories::CategoriesArgs),
}

/// Reject ids no catalog candidate declares.
pub(crate) fn require_known(ctx: &AppContext, id: &str) -> Result<()> {
    if ctx.catalog.contains(id) {
        Ok(())
    } else {
        Err(NudgeError::SuggestionNotFound(id.to_string()))
    }
}
