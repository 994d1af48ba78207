// crates/activity-stream-core/src/interfaces/mod.rs
// ============================================================================
// Module: Activity Stream Interfaces
// Description: Collaborator contracts for translation, identity, objects, and storage.
// Purpose: Define the capability surfaces the core consumes but never implements.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Activity Stream integrates with the host without
//! embedding a translation backend, user store, or database. Capabilities
//! are passed in explicitly so tests can substitute deterministic fakes.
//! Translation lookups are treated as pure functions; failures in a given
//! deployment are the host's concern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::Activity;
use crate::core::ActivityId;
use crate::core::ActorId;
use crate::core::Reference;

// ============================================================================
// SECTION: Translation Catalog
// ============================================================================

/// Translation catalog consulted for override search and final translation.
pub trait TranslationCatalog {
    /// Returns true when the catalog has an entry for `source`.
    fn is_translatable(&self, source: &str) -> bool;

    /// Translates `source` in the current locale.
    ///
    /// No parameter substitution is performed; untranslatable text is
    /// returned as-is.
    fn translate(&self, source: &str) -> String;
}

impl<T: TranslationCatalog + ?Sized> TranslationCatalog for &T {
    fn is_translatable(&self, source: &str) -> bool {
        (**self).is_translatable(source)
    }

    fn translate(&self, source: &str) -> String {
        (**self).translate(source)
    }
}

impl<T: TranslationCatalog + ?Sized> TranslationCatalog for Arc<T> {
    fn is_translatable(&self, source: &str) -> bool {
        (**self).is_translatable(source)
    }

    fn translate(&self, source: &str) -> String {
        (**self).translate(source)
    }
}

// ============================================================================
// SECTION: Actor Directory
// ============================================================================

/// Resolved identity of an acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRecord {
    /// Display name of the actor.
    pub display_name: String,
    /// Link target for the actor, when linkable.
    pub reference: Option<Reference>,
}

/// Directory used to check whether an actor is still reachable.
pub trait ActorDirectory {
    /// Resolves an actor, returning `None` when it no longer exists.
    fn resolve_actor(&self, id: ActorId) -> Option<ActorRecord>;
}

// ============================================================================
// SECTION: Object Locator
// ============================================================================

/// Locator used to check whether an activity's object still exists.
pub trait ObjectLocator {
    /// Returns the object's link target, or `None` when it is unreachable.
    fn resolve_object(&self, activity: &Activity) -> Option<Reference>;
}

// ============================================================================
// SECTION: Activity Store
// ============================================================================

/// Activity store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("activity store io error: {0}")]
    Io(String),
    /// Store rejected the record.
    #[error("activity store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("activity store error: {0}")]
    Store(String),
}

/// Persistence collaborator, invoked only for validated activities.
pub trait ActivityStore {
    /// Persists an activity and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn persist(&self, activity: &Activity) -> Result<ActivityId, StoreError>;
}
