// crates/activity-stream-core/src/core/activity.rs
// ============================================================================
// Module: Activity Entity
// Description: Append-only record of one logged action and its field contracts.
// Purpose: Model required fields, status values, write-once package, and save state.
// Dependencies: crate::core::{format, identifiers, parameter, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! An [`Activity`] records who did what to which object. It starts in the
//! [`EntityState::New`] state, is validated and persisted by
//! [`crate::runtime::ActivityLifecycle`], and afterwards rejects any further
//! save: activities are append-only facts.
//!
//! Invariants:
//! - `package` is write-once: once non-empty it may only be "set" to the
//!   same value, and it can never be removed.
//! - Parameters are computed at most once per instance and cached for its
//!   lifetime, even if fields change afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::format::FormatTemplate;
use crate::core::identifiers::ActivityId;
use crate::core::identifiers::ActorId;
use crate::core::identifiers::RowId;
use crate::core::parameter::ParameterSet;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Outcome recorded for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// The object was created.
    Created,
    /// The object was updated.
    Updated,
    /// The object was deleted.
    Deleted,
    /// The action (or the activity itself) failed.
    Failed,
}

impl ActivityStatus {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Failed => "failed",
        }
    }

    /// Returns the default status implied by a verb, if any.
    #[must_use]
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "add" => Some(Self::Created),
            "edit" => Some(Self::Updated),
            "delete" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Required Fields
// ============================================================================

/// Activity fields that may be declared required for a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    /// Owning package.
    Package,
    /// Object type name.
    Name,
    /// Action verb.
    Action,
    /// Object title.
    Title,
    /// Activity status.
    Status,
}

impl RequiredField {
    /// Returns the field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Name => "name",
            Self::Action => "action",
            Self::Title => "title",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every activity must carry before it can be persisted.
pub const DEFAULT_REQUIRED_FIELDS: [RequiredField; 5] = [
    RequiredField::Package,
    RequiredField::Name,
    RequiredField::Action,
    RequiredField::Title,
    RequiredField::Status,
];

// ============================================================================
// SECTION: Entity State
// ============================================================================

/// Save state of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EntityState {
    /// Not yet persisted.
    New,
    /// Last save failed validation; the entity is still unsaved.
    Failed,
    /// Persisted and read-only for saves.
    Persisted {
        /// Identifier assigned by the store.
        id: ActivityId,
    },
}

impl EntityState {
    /// Returns true while the entity has not been persisted.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        !matches!(self, Self::Persisted { .. })
    }
}

// ============================================================================
// SECTION: Contract Violations
// ============================================================================

/// Programming-contract violations on an activity.
///
/// These are never retried; they indicate a caller attempted to mutate an
/// append-only record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Save was attempted on an already persisted activity.
    #[error("activities cannot be modified once saved (activity {id})")]
    AlreadyPersisted {
        /// Identifier of the persisted activity.
        id: ActivityId,
    },
    /// Package was changed after being set.
    #[error("activity package cannot be modified (current `{current}`, requested `{requested}`)")]
    PackageImmutable {
        /// Package already stored on the entity.
        current: String,
        /// Package the caller attempted to set.
        requested: String,
    },
    /// Package removal was attempted.
    #[error("activity package cannot be removed")]
    PackageRemoval,
}

// ============================================================================
// SECTION: Activity
// ============================================================================

/// One logged action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Application the action happened in (for example `admin`).
    application: String,
    /// Subject type (for example `controller`).
    kind: String,
    /// Owning package; write-once.
    package: String,
    /// Object type name (for example `article`).
    name: String,
    /// Action verb (for example `edit`).
    action: String,
    /// Object title at the time of the action.
    title: String,
    /// Activity status; derived from the verb on save when absent.
    status: Option<ActivityStatus>,
    /// Diagnostic attached when a save fails validation.
    status_message: Option<String>,
    /// Identifier of the object acted upon.
    row: Option<RowId>,
    /// Acting user, absent for guests.
    created_by: Option<ActorId>,
    /// Actor display name captured at the time of the action.
    created_by_name: Option<String>,
    /// When the action happened.
    created_on: Option<Timestamp>,
    /// Originating address, when known.
    ip: Option<String>,
    /// Free-form metadata recorded with the action.
    metadata: BTreeMap<String, Value>,
    /// Message format for this activity kind.
    format: FormatTemplate,
    /// Save state.
    state: EntityState,
    /// Parameters, computed at most once.
    #[serde(skip)]
    parameters: OnceCell<ParameterSet>,
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}

impl Activity {
    /// Creates a new, empty activity using the default format.
    #[must_use]
    pub fn new() -> Self {
        Self {
            application: String::new(),
            kind: String::new(),
            package: String::new(),
            name: String::new(),
            action: String::new(),
            title: String::new(),
            status: None,
            status_message: None,
            row: None,
            created_by: None,
            created_by_name: None,
            created_on: None,
            ip: None,
            metadata: BTreeMap::new(),
            format: FormatTemplate::default(),
            state: EntityState::New,
            parameters: OnceCell::new(),
        }
    }

    /// Creates a new activity owned by `package`.
    #[must_use]
    pub fn for_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::new()
        }
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    /// Sets the message format for this activity kind.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<FormatTemplate>) -> Self {
        self.format = format.into();
        self
    }

    /// Sets the object type name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the action verb.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the object title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets an explicit status.
    #[must_use]
    pub const fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the object row identifier.
    #[must_use]
    pub const fn with_row(mut self, row: RowId) -> Self {
        self.row = Some(row);
        self
    }

    /// Sets the acting user and the display name captured for them.
    #[must_use]
    pub fn with_actor(mut self, actor: ActorId, display_name: impl Into<String>) -> Self {
        self.created_by = Some(actor);
        self.created_by_name = Some(display_name.into());
        self
    }

    // ------------------------------------------------------------------------
    // Package (write-once)
    // ------------------------------------------------------------------------

    /// Returns the owning package.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Sets the owning package.
    ///
    /// Setting the value already stored is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::PackageImmutable`] when a different
    /// non-empty package is already set.
    pub fn set_package(&mut self, package: impl Into<String>) -> Result<(), ContractViolation> {
        let package = package.into();
        if !self.package.is_empty() && self.package != package {
            return Err(ContractViolation::PackageImmutable {
                current: self.package.clone(),
                requested: package,
            });
        }
        self.package = package;
        Ok(())
    }

    /// Attempts to remove the package; always rejected.
    ///
    /// # Errors
    ///
    /// Always returns [`ContractViolation::PackageRemoval`].
    pub const fn remove_package(&mut self) -> Result<(), ContractViolation> {
        Err(ContractViolation::PackageRemoval)
    }

    // ------------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------------

    /// Returns the application name.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Sets the application name.
    pub fn set_application(&mut self, application: impl Into<String>) {
        self.application = application.into();
    }

    /// Returns the subject type.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Sets the subject type.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    /// Returns the object type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the object type name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the action verb.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets the action verb.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    /// Returns the verb; an alias for [`Activity::action`].
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.action
    }

    /// Sets the verb; an alias for [`Activity::set_action`].
    pub fn set_verb(&mut self, verb: impl Into<String>) {
        self.set_action(verb);
    }

    /// Returns the object title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the object title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> Option<ActivityStatus> {
        self.status
    }

    /// Sets or clears the status.
    pub const fn set_status(&mut self, status: Option<ActivityStatus>) {
        self.status = status;
    }

    /// Returns the diagnostic attached by the last failed save.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Returns the object row identifier.
    #[must_use]
    pub const fn row(&self) -> Option<RowId> {
        self.row
    }

    /// Sets or clears the object row identifier.
    pub const fn set_row(&mut self, row: Option<RowId>) {
        self.row = row;
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn created_by(&self) -> Option<ActorId> {
        self.created_by
    }

    /// Sets or clears the acting user.
    pub const fn set_created_by(&mut self, actor: Option<ActorId>) {
        self.created_by = actor;
    }

    /// Returns the actor display name captured with the action.
    #[must_use]
    pub fn created_by_name(&self) -> Option<&str> {
        self.created_by_name.as_deref()
    }

    /// Sets or clears the captured actor display name.
    pub fn set_created_by_name(&mut self, name: Option<String>) {
        self.created_by_name = name;
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn created_on(&self) -> Option<Timestamp> {
        self.created_on
    }

    /// Sets or clears when the action happened.
    pub const fn set_created_on(&mut self, created_on: Option<Timestamp>) {
        self.created_on = created_on;
    }

    /// Returns the originating address.
    #[must_use]
    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    /// Sets or clears the originating address.
    pub fn set_ip(&mut self, ip: Option<String>) {
        self.ip = ip;
    }

    /// Returns the recorded metadata.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Records a metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }

    /// Returns the message format.
    #[must_use]
    pub const fn format(&self) -> &FormatTemplate {
        &self.format
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Returns the save state.
    #[must_use]
    pub const fn state(&self) -> EntityState {
        self.state
    }

    /// Returns true while the activity has not been persisted.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.state.is_new()
    }

    /// Returns the identifier assigned on persistence.
    #[must_use]
    pub const fn id(&self) -> Option<ActivityId> {
        match self.state {
            EntityState::Persisted {
                id,
            } => Some(id),
            EntityState::New | EntityState::Failed => None,
        }
    }

    /// Returns true when `field` holds no value.
    ///
    /// Whitespace counts as a value.
    #[must_use]
    pub fn is_field_empty(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::Package => self.package.is_empty(),
            RequiredField::Name => self.name.is_empty(),
            RequiredField::Action => self.action.is_empty(),
            RequiredField::Title => self.title.is_empty(),
            RequiredField::Status => self.status.is_none(),
        }
    }

    /// Forces the `failed` status and attaches a diagnostic.
    ///
    /// The status stays `failed` on later saves unless the caller replaces it.
    pub(crate) fn mark_failed(&mut self, message: String) {
        self.status = Some(ActivityStatus::Failed);
        self.status_message = Some(message);
        self.state = EntityState::Failed;
    }

    /// Marks the activity as persisted under `id`.
    pub(crate) const fn mark_persisted(&mut self, id: ActivityId) {
        self.state = EntityState::Persisted {
            id,
        };
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// Returns the cached parameters, computing them with `extract` on first use.
    ///
    /// `extract` runs at most once per activity instance; later calls return
    /// the first result even if fields have changed since.
    pub fn parameters_with<F>(&self, extract: F) -> &ParameterSet
    where
        F: FnOnce(&Self) -> ParameterSet,
    {
        self.parameters.get_or_init(|| extract(self))
    }

    /// Returns the cached parameters when they have been computed.
    #[must_use]
    pub fn cached_parameters(&self) -> Option<&ParameterSet> {
        self.parameters.get()
    }
}
