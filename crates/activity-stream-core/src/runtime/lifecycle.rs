// crates/activity-stream-core/src/runtime/lifecycle.rs
// ============================================================================
// Module: Activity Lifecycle
// Description: Save-time status derivation, validation, and persistence.
// Purpose: Enforce the append-only contract and required-field rules on save.
// Dependencies: crate::{audit, core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`ActivityLifecycle::save`] is the only path from a new activity to a
//! persisted one. A save proceeds in a fixed order:
//!
//! 1. Persisted activities are rejected as a contract violation.
//! 2. A missing status is derived from the verb (`add`, `edit`, `delete`).
//!    An explicit status always wins, including a `failed` status left by
//!    an earlier save.
//! 3. Required fields are checked; any empty field fails the save, forces
//!    the `failed` status, and attaches a translated diagnostic.
//! 4. The store persists the activity and assigns its identifier.
//!
//! Validation failures leave the activity unsaved so callers may fix the
//! offending field and save again. A retried save persists whatever status
//! the activity holds at that point.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::LifecycleAuditEvent;
use crate::audit::NoopAuditSink;
use crate::core::Activity;
use crate::core::ActivityId;
use crate::core::ActivityStatus;
use crate::core::ContractViolation;
use crate::core::DEFAULT_REQUIRED_FIELDS;
use crate::core::RequiredField;
use crate::interfaces::ActivityStore;
use crate::interfaces::StoreError;
use crate::interfaces::TranslationCatalog;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Diagnostic attached to activities that fail validation, before translation.
pub const MISSING_REQUIRED_DATA: &str = "Missing required data";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation failures reported by a save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("missing required activity field `{field}`")]
    MissingRequired {
        /// First empty field, in declaration order.
        field: RequiredField,
    },
}

/// Errors returned by [`ActivityLifecycle::save`].
#[derive(Debug, Error)]
pub enum SaveError {
    /// The activity failed validation and was not persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The caller violated the append-only contract.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
    /// The store failed to persist the activity.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

/// Validates and persists activities.
#[derive(Clone)]
pub struct ActivityLifecycle {
    /// Fields that must be non-empty before persistence.
    required_fields: Vec<RequiredField>,
    /// Audit sink for save outcomes.
    audit: Arc<dyn AuditSink>,
}

impl Default for ActivityLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLifecycle {
    /// Creates a lifecycle requiring the default field set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            required_fields: DEFAULT_REQUIRED_FIELDS.to_vec(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the required field set.
    #[must_use]
    pub fn with_required_fields(mut self, fields: impl IntoIterator<Item = RequiredField>) -> Self {
        self.required_fields = fields.into_iter().collect();
        self
    }

    /// Routes save outcomes to `audit`.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the required field set.
    #[must_use]
    pub fn required_fields(&self) -> &[RequiredField] {
        &self.required_fields
    }

    /// Saves a new activity.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Contract`] when the activity is already persisted,
    /// [`SaveError::Validation`] when a required field is empty, and
    /// [`SaveError::Store`] when persistence fails.
    pub fn save<S, C>(
        &self,
        activity: &mut Activity,
        store: &S,
        catalog: &C,
    ) -> Result<ActivityId, SaveError>
    where
        S: ActivityStore + ?Sized,
        C: TranslationCatalog + ?Sized,
    {
        if let Some(id) = activity.id() {
            let violation = ContractViolation::AlreadyPersisted {
                id,
            };
            self.audit
                .record_lifecycle(&LifecycleAuditEvent::rejected(activity, violation.to_string()));
            return Err(violation.into());
        }

        if activity.status().is_none() {
            activity.set_status(ActivityStatus::from_verb(activity.verb()));
        }

        if let Err(err) = self.validate(activity) {
            let message = catalog.translate(MISSING_REQUIRED_DATA);
            activity.mark_failed(message.clone());
            self.audit.record_lifecycle(&LifecycleAuditEvent::save_failed(activity, message));
            return Err(err.into());
        }

        match store.persist(activity) {
            Ok(id) => {
                activity.mark_persisted(id);
                self.audit.record_lifecycle(&LifecycleAuditEvent::saved(activity));
                Ok(id)
            }
            Err(err) => {
                self.audit
                    .record_lifecycle(&LifecycleAuditEvent::rejected(activity, err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Checks required fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequired`] for the first empty field.
    pub fn validate(&self, activity: &Activity) -> Result<(), ValidationError> {
        match self.required_fields.iter().find(|field| activity.is_field_empty(**field)) {
            Some(field) => Err(ValidationError::MissingRequired {
                field: *field,
            }),
            None => Ok(()),
        }
    }
}
