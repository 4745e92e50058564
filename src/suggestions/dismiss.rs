//! Persisted dismissed flag per suggestion id.

use std::sync::Arc;

use crate::error::Result;
use crate::storage::StateStore;

#[derive(Clone)]
pub struct DismissHandler {
    state: Arc<dyn StateStore>,
}

impl DismissHandler {
    #[must_use]
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    pub fn mark_dismissed(&self, id: &str) -> Result<()> {
        self.state.set_dismissed(id, true)
    }

    pub fn mark_not_dismissed(&self, id: &str) -> Result<()> {
        self.state.set_dismissed(id, false)
    }

    pub fn is_dismissed(&self, id: &str) -> Result<bool> {
        self.state.is_dismissed(id)
    }
}
