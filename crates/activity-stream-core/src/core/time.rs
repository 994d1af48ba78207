// crates/activity-stream-core/src/core/time.rs
// ============================================================================
// Module: Activity Stream Time Model
// Description: Caller-supplied timestamps recorded on activities.
// Purpose: Keep activity creation times explicit and replayable.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time when building or saving activities;
//! hosts stamp `created_on` themselves so recorded streams replay exactly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Moment at which an activity happened.
///
/// # Invariants
/// - Values are explicitly provided by callers.
/// - No ordering is enforced between activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical sequence value (tests and replays).
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }
}
