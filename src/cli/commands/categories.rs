//! nudge categories - Active category registry

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CategoriesArgs {}

pub fn run(ctx: &AppContext, _args: &CategoriesArgs) -> Result<()> {
    let categories = ctx.service.categories();

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "count": categories.len(),
            "categories": categories,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Categories ({})", categories.len()));
    for category in categories {
        let detail = match (category.exclusive, category.exclusive_expire_millis()) {
            (false, _) => String::new(),
            (true, None) => " [exclusive, never expires]".to_string(),
            (true, Some(_)) => format!(" [exclusive, {} days]", category.exclusive_expire_days),
        };
        layout.bullet(&format!("{}{detail}", category.tag));
    }
    emit_human(layout);
    Ok(())
}
