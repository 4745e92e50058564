//! Accumulates suggestions across categories, dropping repeated ids.

use std::collections::HashSet;

use tracing::trace;

use super::category::Category;
use super::display::Suggestion;

/// Single-use builder for one aggregation pass.
#[derive(Debug, Default)]
pub struct SuggestionListBuilder {
    entries: Vec<Suggestion>,
    seen: HashSet<String>,
}

impl SuggestionListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `suggestions` for `category`, skipping ids already present from
    /// any category. Returns how many were added.
    pub fn add_suggestions(&mut self, category: &Category, suggestions: Vec<Suggestion>) -> usize {
        let mut added = 0;
        for suggestion in suggestions {
            if !self.seen.insert(suggestion.id.clone()) {
                trace!(id = %suggestion.id, category = %category.tag, "duplicate skipped");
                continue;
            }
            self.entries.push(suggestion);
            added += 1;
        }
        added
    }

    #[must_use]
    pub fn build(self) -> Vec<Suggestion> {
        self.entries
    }
}
