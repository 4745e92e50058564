//! nudge history - Interaction log and ranking features of one suggestion

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, format_millis, robot_ok};
use crate::error::Result;
use crate::storage::EventKind;
use crate::suggestions::Scorer;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Suggestion id (`package/class`)
    pub id: String,

    /// Include every recorded event, not just the aggregates
    #[arg(long)]
    pub events: bool,
}

pub fn run(ctx: &AppContext, args: &HistoryArgs) -> Result<()> {
    let summary = ctx.service.event_summary(&args.id)?;
    let features = ctx.service.features(&args.id)?;
    let relevance = ctx.config.ranking.weights.score(&features);
    let dismissed = ctx.service.is_dismissed(&args.id)?;
    let events = if args.events {
        ctx.service.event_history(&args.id)?
    } else {
        Vec::new()
    };

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "id": args.id,
            "dismissed": dismissed,
            "summary": summary,
            "features": features,
            "relevance": relevance,
            "events": events,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&format!("History: {}", args.id))
        .kv("Dismissed", &dismissed.to_string())
        .kv("Relevance", &format!("{relevance:.4}"))
        .blank()
        .section("Events");
    for kind in EventKind::ALL {
        let entry = summary.kind(kind);
        layout.kv(
            kind.as_str(),
            &format!("{} (last {})", entry.count, format_millis(entry.last_millis)),
        );
    }
    layout.blank().section("Features");
    for (feature, value) in features.iter() {
        layout.kv(feature.name(), &format!("{value:.4}"));
    }
    if args.events {
        layout.blank().section("Log");
        for record in &events {
            layout.bullet(&format!(
                "{} {}",
                format_millis(Some(record.timestamp_millis)),
                record.kind
            ));
        }
    }
    emit_human(layout);
    Ok(())
}
