//! Only privileged (system-installed) applications may provide suggestions.

use tracing::debug;

use crate::error::Result;
use crate::suggestions::candidate::RawCandidate;

use super::EligibilityCheck;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderEligibilityChecker;

impl EligibilityCheck for ProviderEligibilityChecker {
    fn id(&self) -> &str {
        "provider"
    }

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        _ignore_appear_rule: bool,
    ) -> Result<bool> {
        if !candidate.system_app {
            debug!(
                id,
                package = %candidate.component.package,
                "provider is not a system app"
            );
            return Ok(false);
        }
        Ok(true)
    }
}
