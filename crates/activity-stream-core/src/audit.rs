// crates/activity-stream-core/src/audit.rs
// ============================================================================
// Module: Activity Stream Audit Logging
// Description: Structured audit events for activity saves and override resolution.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Lifecycle events describe every save outcome (persisted, failed
//! validation, rejected by contract). Override events describe each
//! resolution, including whether it was served from the cache. Sinks never
//! influence the outcome they describe; write failures are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::Activity;
use crate::core::ActivityStatus;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Activity save audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Activity identifier when persisted.
    pub activity_id: Option<u64>,
    /// Owning package.
    pub package: String,
    /// Object type name.
    pub name: String,
    /// Action verb.
    pub action: String,
    /// Status after the save attempt.
    pub status: Option<ActivityStatus>,
    /// Diagnostic or violation message.
    pub message: Option<String>,
}

impl LifecycleAuditEvent {
    /// Event for a persisted activity.
    #[must_use]
    pub fn saved(activity: &Activity) -> Self {
        Self::from_activity("activity_saved", activity, None)
    }

    /// Event for a save that failed validation.
    #[must_use]
    pub fn save_failed(activity: &Activity, message: impl Into<String>) -> Self {
        Self::from_activity("activity_save_failed", activity, Some(message.into()))
    }

    /// Event for a save rejected as a contract violation or store failure.
    #[must_use]
    pub fn rejected(activity: &Activity, message: impl Into<String>) -> Self {
        Self::from_activity("activity_rejected", activity, Some(message.into()))
    }

    /// Builds an event snapshot of `activity`.
    fn from_activity(event: &'static str, activity: &Activity, message: Option<String>) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            activity_id: activity.id().map(crate::core::ActivityId::get),
            package: activity.package().to_string(),
            name: activity.name().to_string(),
            action: activity.action().to_string(),
            status: activity.status(),
            message,
        }
    }
}

/// Override resolution audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Format that was resolved.
    pub format: String,
    /// Fully substituted cache key.
    pub substitution_key: String,
    /// Template selected for translation.
    pub selected: String,
    /// Whether the result came from the cache.
    pub cache_hit: bool,
    /// Number of candidates tested against the catalog.
    pub candidates_tested: usize,
}

/// Inputs required to construct an override audit event.
pub struct OverrideAuditEventParams {
    /// Format that was resolved.
    pub format: String,
    /// Fully substituted cache key.
    pub substitution_key: String,
    /// Template selected for translation.
    pub selected: String,
    /// Whether the result came from the cache.
    pub cache_hit: bool,
    /// Number of candidates tested against the catalog.
    pub candidates_tested: usize,
}

impl OverrideAuditEvent {
    /// Creates a new override event with a consistent timestamp.
    #[must_use]
    pub fn new(params: OverrideAuditEventParams) -> Self {
        Self {
            event: "override_resolved",
            timestamp_ms: now_millis(),
            format: params.format,
            substitution_key: params.substitution_key,
            selected: params.selected,
            cache_hit: params.cache_hit,
            candidates_tested: params.candidates_tested,
        }
    }
}

/// Returns milliseconds since the unix epoch, or zero if the clock is unset.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for activity events.
pub trait AuditSink: Send + Sync {
    /// Record a save outcome.
    fn record_lifecycle(&self, event: &LifecycleAuditEvent);

    /// Record an override resolution.
    fn record_override(&self, _event: &OverrideAuditEvent) {}
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// No-op audit sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_lifecycle(&self, _event: &LifecycleAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }

    fn record_override(&self, event: &OverrideAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Writes one serialized record.
    fn write_line<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        self.write_line(event);
    }

    fn record_override(&self, event: &OverrideAuditEvent) {
        self.write_line(event);
    }
}

/// Audit sink that keeps events in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    /// Captured lifecycle events.
    lifecycle: Mutex<Vec<LifecycleAuditEvent>>,
    /// Captured override events.
    overrides: Mutex<Vec<OverrideAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured lifecycle events.
    #[must_use]
    pub fn lifecycle_events(&self) -> Vec<LifecycleAuditEvent> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a copy of the captured override events.
    #[must_use]
    pub fn override_events(&self) -> Vec<OverrideAuditEvent> {
        self.overrides.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }

    fn record_override(&self, event: &OverrideAuditEvent) {
        self.overrides.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}
