//! Appear/dismiss state machine.
//!
//! Each candidate id gets a first-seen time the first time it is evaluated.
//! A candidate can declare how many days after that it should first appear
//! (`suggestion.dismiss`, e.g. `"10"` or `"0,10"`; only the first entry is
//! used). A manual dismissal hides it regardless of the appear rule.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, MILLIS_PER_DAY};
use crate::error::Result;
use crate::storage::StateStore;
use crate::suggestions::candidate::{META_DATA_DISMISS_CONTROL, MetadataValue, RawCandidate};
use crate::suggestions::dismiss::DismissHandler;

use super::EligibilityCheck;

const DEFAULT_FIRST_APPEAR_DAY: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearState {
    SuppressedByDismiss,
    SuppressedByFutureAppear { eligible_at_millis: i64 },
    Visible,
}

pub struct DismissedChecker {
    state: Arc<dyn StateStore>,
    dismiss: DismissHandler,
    clock: Arc<dyn Clock>,
}

impl DismissedChecker {
    #[must_use]
    pub fn new(state: Arc<dyn StateStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dismiss: DismissHandler::new(Arc::clone(&state)),
            state,
            clock,
        }
    }

    /// Run one transition of the state machine for `id`.
    ///
    /// Records the first-seen time if absent. Reaching `Visible` clears the
    /// dismissed flag; a dismissal racing that write is last-write-wins.
    pub fn evaluate(
        &self,
        id: &str,
        candidate: &RawCandidate,
        ignore_appear_rule: bool,
    ) -> Result<AppearState> {
        let now = self.clock.now_millis();
        let first_seen = self.state.setup_time_or_insert(id, now)?;

        if self.dismiss.is_dismissed(id)? {
            return Ok(AppearState::SuppressedByDismiss);
        }

        let first_appear_day = if ignore_appear_rule {
            DEFAULT_FIRST_APPEAR_DAY
        } else {
            parse_appear_day(id, candidate)
        };
        let eligible_at_millis =
            first_seen.saturating_add(first_appear_day.saturating_mul(MILLIS_PER_DAY));

        if now >= eligible_at_millis {
            self.dismiss.mark_not_dismissed(id)?;
            return Ok(AppearState::Visible);
        }
        debug!(id, eligible_at_millis, "waiting for first appear day");
        Ok(AppearState::SuppressedByFutureAppear { eligible_at_millis })
    }
}

impl EligibilityCheck for DismissedChecker {
    fn id(&self) -> &str {
        "dismissed"
    }

    fn is_eligible(
        &self,
        id: &str,
        candidate: &RawCandidate,
        ignore_appear_rule: bool,
    ) -> Result<bool> {
        Ok(self.evaluate(id, candidate, ignore_appear_rule)? == AppearState::Visible)
    }
}

/// First appear day declared by the candidate.
///
/// Integers are taken as is; strings are read as `"a,b,..."` and the first
/// entry is parsed. Anything unparsable falls back to day 0.
#[must_use]
pub fn parse_appear_day(id: &str, candidate: &RawCandidate) -> i64 {
    match candidate.meta(META_DATA_DISMISS_CONTROL) {
        None => DEFAULT_FIRST_APPEAR_DAY,
        Some(MetadataValue::Int(days)) => *days,
        Some(MetadataValue::Text(rule)) => {
            let first = rule.split(',').next().unwrap_or_default().trim();
            first.parse::<i64>().unwrap_or_else(|err| {
                warn!(
                    id,
                    rule = %rule,
                    error = %err,
                    "failed to parse appear/dismiss rule, fall back to 0"
                );
                DEFAULT_FIRST_APPEAR_DAY
            })
        }
        Some(other) => {
            warn!(
                id,
                value = ?other,
                "unexpected appear/dismiss rule type, fall back to 0"
            );
            DEFAULT_FIRST_APPEAR_DAY
        }
    }
}
