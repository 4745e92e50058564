//! Candidates that declare a network requirement need an active connection.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::suggestions::candidate::{META_DATA_IS_CONNECTION_REQUIRED, RawCandidate};
use crate::suggestions::source::DeviceState;

use super::EligibilityCheck;

pub struct ConnectivityEligibilityChecker {
    device: Arc<dyn DeviceState>,
}

impl ConnectivityEligibilityChecker {
    #[must_use]
    pub fn new(device: Arc<dyn DeviceState>) -> Self {
        Self { device }
    }
}

impl EligibilityCheck for ConnectivityEligibilityChecker {
    fn id(&self) -> &str {
        "connectivity"
    }

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        _ignore_appear_rule: bool,
    ) -> Result<bool> {
        if !candidate.meta_flag(META_DATA_IS_CONNECTION_REQUIRED) {
            return Ok(true);
        }
        let connected = self.device.is_network_connected_or_connecting();
        if !connected {
            debug!(id, "network required but not connected");
        }
        Ok(connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::candidate::{ComponentName, MetadataValue};
    use crate::suggestions::source::StaticDeviceState;

    fn checker(connected: bool) -> ConnectivityEligibilityChecker {
        ConnectivityEligibilityChecker::new(Arc::new(
            StaticDeviceState::default().with_network(connected),
        ))
    }

    fn raw() -> RawCandidate {
        RawCandidate::new(ComponentName::new("pkg", "cls"))
    }

    #[test]
    fn no_requirement_is_eligible() {
        assert!(checker(false).is_eligible("test", &raw(), false).unwrap());

        let not_required =
            raw().with_meta(META_DATA_IS_CONNECTION_REQUIRED, MetadataValue::Flag(false));
        assert!(checker(false).is_eligible("test", &not_required, false).unwrap());
    }

    #[test]
    fn has_connection_is_eligible() {
        let required = raw().with_meta(META_DATA_IS_CONNECTION_REQUIRED, MetadataValue::Flag(true));
        assert!(checker(true).is_eligible("test", &required, false).unwrap());
    }

    #[test]
    fn no_connection_is_ineligible() {
        let required = raw().with_meta(META_DATA_IS_CONNECTION_REQUIRED, MetadataValue::Flag(true));
        assert!(!checker(false).is_eligible("test", &required, false).unwrap());
    }
}
