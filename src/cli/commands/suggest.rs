//! nudge suggest - Eligible suggestions, ranked

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Record a SHOWN event for every suggestion returned
    #[arg(long)]
    pub record_shown: bool,

    /// Maximum number of suggestions to print
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &SuggestArgs) -> Result<()> {
    let mut suggestions = ctx.service.on_get_suggestions()?;
    if let Some(limit) = args.limit {
        suggestions.truncate(limit);
    }

    if args.record_shown {
        ctx.service
            .on_suggestions_shown(suggestions.iter().map(|s| s.id.as_str()))?;
    }

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "count": suggestions.len(),
            "recorded_shown": args.record_shown,
            "suggestions": suggestions,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Suggestions ({})", suggestions.len()));
    if suggestions.is_empty() {
        layout.push_line("No eligible suggestions.");
    }
    for (rank, suggestion) in suggestions.iter().enumerate() {
        layout.section(&format!("{}. {}", rank + 1, suggestion.title));
        layout.kv("Id", &suggestion.id);
        if let Some(summary) = &suggestion.summary {
            layout.kv("Summary", summary);
        }
        layout.kv("Action", &suggestion.action.to_string());
        layout.blank();
    }
    emit_human(layout);
    Ok(())
}
