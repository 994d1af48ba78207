// crates/activity-stream-core/src/runtime/store.rs
// ============================================================================
// Module: Activity Stream In-Memory Collaborators
// Description: Deterministic store, catalog, directory, and locators.
// Purpose: Provide collaborator implementations for tests and local demos.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! This module provides simple in-memory implementations of every
//! collaborator interface. They are deterministic and suitable for tests and
//! demos; they are not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Activity;
use crate::core::ActivityId;
use crate::core::ActorId;
use crate::core::Reference;
use crate::core::RowId;
use crate::interfaces::ActivityStore;
use crate::interfaces::ActorDirectory;
use crate::interfaces::ActorRecord;
use crate::interfaces::ObjectLocator;
use crate::interfaces::StoreError;
use crate::interfaces::TranslationCatalog;

// ============================================================================
// SECTION: Activity Store
// ============================================================================

/// In-memory activity store assigning sequential identifiers.
#[derive(Debug, Default, Clone)]
pub struct InMemoryActivityStore {
    /// Persisted activities keyed by identifier.
    records: Arc<Mutex<BTreeMap<ActivityId, Activity>>>,
}

impl InMemoryActivityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Loads a persisted activity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the store lock is poisoned.
    pub fn load(&self, id: ActivityId) -> Result<Option<Activity>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("activity store mutex poisoned".to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    /// Returns the number of persisted activities.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the store lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("activity store mutex poisoned".to_string()))?;
        Ok(guard.len())
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn persist(&self, activity: &Activity) -> Result<ActivityId, StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("activity store mutex poisoned".to_string()))?;
        let next = guard.keys().next_back().map_or(Some(1), |last| last.get().checked_add(1));
        let id = next
            .and_then(ActivityId::from_raw)
            .ok_or_else(|| StoreError::Invalid("activity identifiers exhausted".to_string()))?;
        guard.insert(id, activity.clone());
        drop(guard);
        Ok(id)
    }
}

// ============================================================================
// SECTION: Translation Catalog
// ============================================================================

/// In-memory translation catalog backed by exact-match entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryTranslationCatalog {
    /// Translations keyed by source string.
    entries: BTreeMap<String, String>,
}

impl InMemoryTranslationCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from `(source, translation)` pairs.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(source, text)| (source.into(), text.into())).collect(),
        }
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, source: impl Into<String>, translation: impl Into<String>) {
        self.entries.insert(source.into(), translation.into());
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationCatalog for InMemoryTranslationCatalog {
    fn is_translatable(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    fn translate(&self, source: &str) -> String {
        self.entries.get(source).cloned().unwrap_or_else(|| source.to_string())
    }
}

// ============================================================================
// SECTION: Actor Directory
// ============================================================================

/// Returns the default link target for a user.
#[must_use]
pub fn actor_reference(id: ActorId) -> Reference {
    Reference::new(format!("option=com_users&task=user.edit&id={id}"))
}

/// In-memory actor directory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryActorDirectory {
    /// Known actors.
    actors: BTreeMap<ActorId, ActorRecord>,
}

impl InMemoryActorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor linked to the default user reference.
    pub fn insert(&mut self, id: ActorId, display_name: impl Into<String>) {
        self.insert_record(id, ActorRecord {
            display_name: display_name.into(),
            reference: Some(actor_reference(id)),
        });
    }

    /// Registers an actor with an explicit record.
    pub fn insert_record(&mut self, id: ActorId, record: ActorRecord) {
        self.actors.insert(id, record);
    }

    /// Removes an actor, as if the account were deleted.
    pub fn remove(&mut self, id: ActorId) -> Option<ActorRecord> {
        self.actors.remove(&id)
    }
}

impl ActorDirectory for InMemoryActorDirectory {
    fn resolve_actor(&self, id: ActorId) -> Option<ActorRecord> {
        self.actors.get(&id).cloned()
    }
}

// ============================================================================
// SECTION: Object Locators
// ============================================================================

/// Locator that never finds an object; titles stay unlinked.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObjectLocator;

impl ObjectLocator for NullObjectLocator {
    fn resolve_object(&self, _activity: &Activity) -> Option<Reference> {
        None
    }
}

/// Locator that links objects known to exist to their edit route.
#[derive(Debug, Default, Clone)]
pub struct RouteObjectLocator {
    /// Existing objects as `(package, name, row)`.
    existing: BTreeSet<(String, String, RowId)>,
}

impl RouteObjectLocator {
    /// Creates a locator with no known objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an object as existing.
    pub fn insert(&mut self, package: impl Into<String>, name: impl Into<String>, row: RowId) {
        self.existing.insert((package.into(), name.into(), row));
    }

    /// Marks an object as gone.
    pub fn remove(&mut self, package: &str, name: &str, row: RowId) -> bool {
        self.existing.remove(&(package.to_string(), name.to_string(), row))
    }
}

impl ObjectLocator for RouteObjectLocator {
    fn resolve_object(&self, activity: &Activity) -> Option<Reference> {
        let package = activity.package();
        let name = activity.name();
        let row = activity.row()?;
        if package.is_empty() || name.is_empty() {
            return None;
        }
        if !self.existing.contains(&(package.to_string(), name.to_string(), row)) {
            return None;
        }
        Some(Reference::new(format!("option=com_{package}&task={name}.edit&id={row}")))
    }
}
