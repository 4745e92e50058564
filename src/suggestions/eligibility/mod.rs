//! Eligibility checks.
//!
//! A candidate is eligible when every check in the chain passes. Checks run in
//! order and evaluation stops at the first failure, so later checks (notably
//! the appear/dismiss check, which writes state) are skipped for candidates
//! already rejected.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::candidate::RawCandidate;
use super::source::DeviceState;

pub mod account;
pub mod connectivity;
pub mod dismissed;
pub mod feature;
pub mod provider;

pub use account::AccountEligibilityChecker;
pub use connectivity::ConnectivityEligibilityChecker;
pub use dismissed::{AppearState, DismissedChecker};
pub use feature::FeatureEligibilityChecker;
pub use provider::ProviderEligibilityChecker;

/// One predicate in the eligibility chain.
///
/// Each check owns its own metadata key and knows nothing about the others.
pub trait EligibilityCheck: Send + Sync {
    /// Short identifier used in logs (e.g. "provider").
    fn id(&self) -> &str;

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        ignore_appear_rule: bool,
    ) -> Result<bool>;
}

pub type BoxedCheck = Box<dyn EligibilityCheck>;

/// Ordered, short-circuiting AND over eligibility checks.
#[derive(Default)]
pub struct EligibilityChain {
    checks: Vec<BoxedCheck>,
}

impl EligibilityChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: provider, connectivity, feature, account, then the
    /// appear/dismiss check last.
    #[must_use]
    pub fn standard(device: Arc<dyn DeviceState>, dismissed: DismissedChecker) -> Self {
        Self::new()
            .with_check(Box::new(ProviderEligibilityChecker))
            .with_check(Box::new(ConnectivityEligibilityChecker::new(Arc::clone(&device))))
            .with_check(Box::new(FeatureEligibilityChecker::new(Arc::clone(&device))))
            .with_check(Box::new(AccountEligibilityChecker::new(device)))
            .with_check(Box::new(dismissed))
    }

    #[must_use]
    pub fn with_check(mut self, check: BoxedCheck) -> Self {
        self.checks.push(check);
        self
    }

    #[must_use]
    pub fn check_ids(&self) -> Vec<&str> {
        self.checks.iter().map(|check| check.id()).collect()
    }

    pub fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        ignore_appear_rule: bool,
    ) -> Result<bool> {
        for check in &self.checks {
            if !check.is_eligible(id, candidate, ignore_appear_rule)? {
                debug!(id, check = check.id(), "candidate ineligible");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
