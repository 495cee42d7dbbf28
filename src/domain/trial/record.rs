//! Trial record entity.
//!
//! Each user receives at most one time-boxed free trial. The record stores
//! only the window boundaries; everything the UI shows (days remaining,
//! expired) is derived from those boundaries against the current clock on
//! every read, so a stale stored value can never leak through.
//!
//! # Design Decisions
//!
//! - **One per user**: Unique constraint on user_id enforced at the store level
//! - **Pinned boundaries**: `start_date` at 00:00:00.000, `end_date` at
//!   23:59:59.999, so a 7-day trial covers exactly seven calendar days
//! - **Never deleted**: Trials are deactivated, not removed, to keep the
//!   once-per-user guarantee auditable

use crate::domain::foundation::{Timestamp, TrialId, UserId};
use serde::{Deserialize, Serialize};

use super::TrialError;

const MS_PER_DAY: i64 = 86_400_000;

/// Longest window a trial may reach, extensions included.
pub const MAX_TRIAL_DAYS: i32 = 365;

/// Trial record - a single time-boxed window of free access.
///
/// # Invariants
///
/// - `start_date` is pinned to the start of its UTC day
/// - `end_date` is pinned to the end of its UTC day
/// - `end_date - start_date` spans exactly `total_days` calendar days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Unique identifier for this trial.
    pub id: TrialId,

    /// User who owns this trial.
    pub user_id: UserId,

    /// First instant of the trial window (00:00:00.000).
    pub start_date: Timestamp,

    /// Last instant of the trial window (23:59:59.999).
    pub end_date: Timestamp,

    /// Whether the trial is still live. Termination flips this; the
    /// window lapsing does not.
    pub is_active: bool,

    /// Length of the window in calendar days.
    pub total_days: i32,

    /// When the trial record was created.
    pub created_at: Timestamp,

    /// When the trial record was last updated.
    pub updated_at: Timestamp,
}

impl TrialRecord {
    /// Create a new active trial anchored on the account creation day.
    ///
    /// The window starts at the beginning of `anchor`'s calendar day, so an
    /// account created three days ago that only now triggers its first
    /// entitlement check has already consumed three of its days. Callers
    /// guarantee `total_days >= 1` (configuration validates it).
    pub fn create(
        id: TrialId,
        user_id: UserId,
        anchor: Timestamp,
        total_days: i32,
        now: Timestamp,
    ) -> Self {
        let start_date = anchor.start_of_day();
        let end_date = start_date.add_days(total_days as i64 - 1).end_of_day();
        Self {
            id,
            user_id,
            start_date,
            end_date,
            is_active: true,
            total_days,
            created_at: now,
            updated_at: now,
        }
    }

    /// Days of access remaining as shown to the user.
    ///
    /// Whole days between `now` and `end_date`, rounded down, never below
    /// zero. On the calendar day the trial started the full duration is
    /// returned regardless of elapsed hours, so a user never sees
    /// "6 days left" minutes after signup.
    pub fn days_remaining(&self, now: Timestamp) -> u32 {
        if now.same_calendar_day(&self.start_date) {
            return self.total_days.max(0) as u32;
        }
        if now.is_after(&self.end_date) {
            return 0;
        }
        self.end_date.duration_since(&now).num_days().max(0) as u32
    }

    /// Whether the trial window has lapsed.
    ///
    /// Independent of `is_active`: a terminated trial is inactive but not
    /// necessarily expired, and vice versa.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.end_date)
    }

    /// Whether this trial currently grants access.
    pub fn grants_access(&self, now: Timestamp) -> bool {
        self.is_active && self.days_remaining(now) > 0
    }

    /// Extend the trial window by the given number of days.
    ///
    /// Allowed on any active trial, including one whose window has already
    /// lapsed (an admin rescuing a just-expired trial). `total_days` moves
    /// in step with `end_date` so the window invariant keeps holding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the trial has been deactivated, or
    /// `InvalidExtension` for a non-positive day count or one that would
    /// push the window past [`MAX_TRIAL_DAYS`].
    pub fn extend(&mut self, days: i32, now: Timestamp) -> Result<(), TrialError> {
        if days < 1 {
            return Err(TrialError::invalid_extension(days));
        }
        if !self.is_active {
            return Err(TrialError::invalid_state("deactivated", "extend"));
        }
        let total = match self.total_days.checked_add(days) {
            Some(total) if total <= MAX_TRIAL_DAYS => total,
            _ => return Err(TrialError::invalid_extension(days)),
        };

        self.end_date = self.end_date.add_days(days as i64);
        self.total_days = total;
        self.updated_at = now;
        Ok(())
    }

    /// Deactivate the trial.
    ///
    /// Idempotent: deactivating an already inactive trial is a no-op apart
    /// from the updated_at touch.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.is_active = false;
        self.updated_at = now;
    }

    /// Whether an account may still be granted its trial lazily.
    ///
    /// Eligible iff the creation date is unknown, or no more than
    /// `total_days` days old counting any started day as consumed (rounded
    /// up). An unknown creation date defaults to eligible.
    pub fn account_eligible(
        account_created_at: Option<Timestamp>,
        now: Timestamp,
        total_days: i32,
    ) -> bool {
        let created = match account_created_at {
            Some(created) => created,
            None => return true,
        };

        let age_ms = now.duration_since(&created).num_milliseconds();
        if age_ms <= 0 {
            return true;
        }
        let age_days = (age_ms + MS_PER_DAY - 1) / MS_PER_DAY;
        age_days <= total_days as i64
    }
}
