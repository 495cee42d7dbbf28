//! Entitlement status value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What justified an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementSource {
    /// An actually-active paid subscription.
    Subscription,

    /// A live trial window with days remaining.
    Trial,

    /// No layer offered positive evidence of access.
    None,
}

impl fmt::Display for EntitlementSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntitlementSource::Subscription => "subscription",
            EntitlementSource::Trial => "trial",
            EntitlementSource::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// The resolved access decision for a user.
///
/// Derived only, never stored: every resolution recomputes it from the
/// underlying subscription and trial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementStatus {
    /// Whether access is granted.
    pub has_access: bool,

    /// Which layer justified the decision.
    pub source: EntitlementSource,

    /// Days left on the trial when the trial is the source.
    pub days_remaining_if_trial: Option<u32>,
}

impl EntitlementStatus {
    /// Access granted by an active subscription.
    pub fn subscription() -> Self {
        Self {
            has_access: true,
            source: EntitlementSource::Subscription,
            days_remaining_if_trial: None,
        }
    }

    /// Access granted by a live trial.
    pub fn trial(days_remaining: u32) -> Self {
        Self {
            has_access: true,
            source: EntitlementSource::Trial,
            days_remaining_if_trial: Some(days_remaining),
        }
    }

    /// Access denied: no positive evidence anywhere.
    pub fn none() -> Self {
        Self {
            has_access: false,
            source: EntitlementSource::None,
            days_remaining_if_trial: None,
        }
    }
}
