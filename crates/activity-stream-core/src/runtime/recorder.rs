// crates/activity-stream-core/src/runtime/recorder.rs
// ============================================================================
// Module: Activity Recorder
// Description: Turns completed commands on records into saved activities.
// Purpose: Record one activity per affected record for configured commands.
// Dependencies: crate::{core, interfaces, runtime::lifecycle}
// ============================================================================

//! ## Overview
//! Host controllers report each completed command (for example `after.edit`)
//! together with the records it touched. The recorder filters commands by
//! the configured names, maps each record to an activity, and saves it
//! through [`ActivityLifecycle`]. A failure on one record never prevents the
//! others from being recorded; every outcome is returned in a
//! [`RecordReport`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::Activity;
use crate::core::ActivityId;
use crate::core::ActivityStatus;
use crate::core::ActorId;
use crate::core::FormatTemplate;
use crate::core::RowId;
use crate::core::Timestamp;
use crate::interfaces::ActivityStore;
use crate::interfaces::TranslationCatalog;
use crate::runtime::lifecycle::ActivityLifecycle;
use crate::runtime::lifecycle::SaveError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Command name whose `updated` records are logged as `created`.
const AFTER_ADD: &str = "after.add";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Recorder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Command names that produce activities.
    pub actions: Vec<String>,
    /// Record columns consulted, in order, for the activity title.
    pub title_columns: Vec<String>,
    /// Format assigned to recorded activities.
    pub format: FormatTemplate,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            actions: vec!["after.add".to_string(), "after.edit".to_string(), "after.delete".to_string()],
            title_columns: vec!["title".to_string(), "name".to_string()],
            format: FormatTemplate::default(),
        }
    }
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Identifies what a command acted on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectIdentifier {
    /// Application (for example `admin`).
    pub application: String,
    /// Subject type (for example `controller`).
    pub kind: String,
    /// Owning package.
    pub package: String,
    /// Object type name.
    pub name: String,
}

/// A completed command as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// Command name (for example `after.edit`).
    pub name: String,
    /// Action verb recorded on activities.
    pub action: String,
    /// Subject the command acted on.
    pub subject: SubjectIdentifier,
    /// Acting user, absent for guests.
    pub actor: Option<ActorId>,
    /// Display name of the acting user.
    pub actor_name: Option<String>,
    /// When the command completed.
    pub created_on: Option<Timestamp>,
    /// Originating address.
    pub ip: Option<String>,
}

/// One record touched by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedRecord {
    /// Record identifier.
    pub id: RowId,
    /// Outcome status reported for the record.
    pub status: Option<ActivityStatus>,
    /// Record columns, used for the title.
    pub columns: BTreeMap<String, String>,
}

impl AffectedRecord {
    /// Creates a record with no columns.
    #[must_use]
    pub const fn new(id: RowId, status: Option<ActivityStatus>) -> Self {
        Self {
            id,
            status,
            columns: BTreeMap::new(),
        }
    }

    /// Adds a column value.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }
}

// ============================================================================
// SECTION: Outputs
// ============================================================================

/// Outcome for one affected record.
#[derive(Debug)]
pub enum RecordOutcome {
    /// An activity was saved.
    Saved(ActivityId),
    /// The record had no loggable status.
    Skipped,
    /// The activity could not be saved.
    Failed(SaveError),
}

/// Per-record outcomes of one command.
#[derive(Debug, Default)]
pub struct RecordReport {
    /// Outcomes in record order.
    pub outcomes: Vec<(RowId, RecordOutcome)>,
}

impl RecordReport {
    /// Returns the identifiers of saved activities.
    #[must_use]
    pub fn saved(&self) -> Vec<ActivityId> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                RecordOutcome::Saved(id) => Some(*id),
                RecordOutcome::Skipped | RecordOutcome::Failed(_) => None,
            })
            .collect()
    }

    /// Returns the number of failed records.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| matches!(outcome, RecordOutcome::Failed(_))).count()
    }

    /// Returns true when no record produced an outcome.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

// ============================================================================
// SECTION: Recorder
// ============================================================================

/// Records activities for completed commands.
#[derive(Clone, Default)]
pub struct ActivityRecorder {
    /// Recorder settings.
    config: RecorderConfig,
    /// Lifecycle used for every save.
    lifecycle: ActivityLifecycle,
}

impl ActivityRecorder {
    /// Creates a recorder.
    #[must_use]
    pub const fn new(config: RecorderConfig, lifecycle: ActivityLifecycle) -> Self {
        Self {
            config,
            lifecycle,
        }
    }

    /// Returns the recorder settings.
    #[must_use]
    pub const fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Returns true when `command` produces activities.
    #[must_use]
    pub fn is_recorded(&self, command: &str) -> bool {
        self.config.actions.iter().any(|action| action == command)
    }

    /// Records one activity per loggable record.
    ///
    /// Commands that are not configured produce an empty report.
    pub fn record<S, C>(
        &self,
        command: &CommandContext,
        records: &[AffectedRecord],
        store: &S,
        catalog: &C,
    ) -> RecordReport
    where
        S: ActivityStore + ?Sized,
        C: TranslationCatalog + ?Sized,
    {
        let mut report = RecordReport::default();
        if !self.is_recorded(&command.name) {
            return report;
        }

        for record in records {
            let outcome = match loggable_status(&command.name, record.status) {
                None => RecordOutcome::Skipped,
                Some(status) => {
                    let mut activity = self.activity_for(command, record, status);
                    match self.lifecycle.save(&mut activity, store, catalog) {
                        Ok(id) => RecordOutcome::Saved(id),
                        Err(err) => RecordOutcome::Failed(err),
                    }
                }
            };
            report.outcomes.push((record.id, outcome));
        }
        report
    }

    /// Builds the activity describing `record`.
    fn activity_for(
        &self,
        command: &CommandContext,
        record: &AffectedRecord,
        status: ActivityStatus,
    ) -> Activity {
        let subject = &command.subject;
        let mut activity = Activity::for_package(subject.package.as_str())
            .with_format(self.config.format.clone())
            .with_name(subject.name.as_str())
            .with_action(command.action.as_str())
            .with_title(self.title_for(record))
            .with_status(status)
            .with_row(record.id);
        activity.set_application(subject.application.as_str());
        activity.set_kind(subject.kind.as_str());
        activity.set_created_by(command.actor);
        activity.set_created_by_name(command.actor_name.clone());
        activity.set_created_on(command.created_on);
        activity.set_ip(command.ip.clone());
        activity
    }

    /// First non-empty configured title column, else `#<id>`.
    fn title_for(&self, record: &AffectedRecord) -> String {
        self.config
            .title_columns
            .iter()
            .filter_map(|column| record.columns.get(column))
            .find(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("#{}", record.id))
    }
}

/// Maps a record status to the status logged, or `None` to skip it.
fn loggable_status(command: &str, status: Option<ActivityStatus>) -> Option<ActivityStatus> {
    match status? {
        ActivityStatus::Failed => None,
        ActivityStatus::Updated if command == AFTER_ADD => Some(ActivityStatus::Created),
        status => Some(status),
    }
}
