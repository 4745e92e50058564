//! nudge launch - Record a click on a suggestion

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Suggestion id (`package/class`)
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &LaunchArgs) -> Result<()> {
    super::require_known(ctx, &args.id)?;
    ctx.service.on_suggestion_launched(&args.id)?;

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "id": args.id,
            "launched": true,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title("Launched").kv("Id", &args.id);
    emit_human(layout);
    Ok(())
}
