//! Trial domain module.
//!
//! Handles the single time-boxed free trial each user may receive: window
//! arithmetic, lifecycle flags, and account eligibility.
//!
//! # Module Structure
//!
//! - `record` - TrialRecord entity and calendar arithmetic
//! - `errors` - Trial lifecycle errors

mod record;
mod errors;

pub use record::{TrialRecord, MAX_TRIAL_DAYS};
pub use errors::TrialError;
