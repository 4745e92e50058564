//! Candidates may require device features, declared as a comma separated list.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::suggestions::candidate::{META_DATA_REQUIRE_FEATURE, RawCandidate};
use crate::suggestions::source::DeviceState;

use super::EligibilityCheck;

pub struct FeatureEligibilityChecker {
    device: Arc<dyn DeviceState>,
}

impl FeatureEligibilityChecker {
    #[must_use]
    pub fn new(device: Arc<dyn DeviceState>) -> Self {
        Self { device }
    }
}

impl EligibilityCheck for FeatureEligibilityChecker {
    fn id(&self) -> &str {
        "feature"
    }

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        _ignore_appear_rule: bool,
    ) -> Result<bool> {
        let Some(required) = candidate.meta_text(META_DATA_REQUIRE_FEATURE) else {
            return Ok(true);
        };
        for feature in required.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !self.device.has_feature(feature) {
                debug!(id, feature, "required feature missing");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
