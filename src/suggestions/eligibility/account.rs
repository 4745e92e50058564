//! Candidates may require an account of a given type to exist.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::suggestions::candidate::{META_DATA_REQUIRE_ACCOUNT, RawCandidate};
use crate::suggestions::source::DeviceState;

use super::EligibilityCheck;

pub struct AccountEligibilityChecker {
    device: Arc<dyn DeviceState>,
}

impl AccountEligibilityChecker {
    #[must_use]
    pub fn new(device: Arc<dyn DeviceState>) -> Self {
        Self { device }
    }
}

impl EligibilityCheck for AccountEligibilityChecker {
    fn id(&self) -> &str {
        "account"
    }

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        _ignore_appear_rule: bool,
    ) -> Result<bool> {
        let Some(account_type) = candidate.meta_text(META_DATA_REQUIRE_ACCOUNT) else {
            return Ok(true);
        };
        let present = self.device.has_account_type(account_type);
        if !present {
            debug!(id, account_type, "required account missing");
        }
        Ok(present)
    }
}
