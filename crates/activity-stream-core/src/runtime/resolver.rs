// crates/activity-stream-core/src/runtime/resolver.rs
// ============================================================================
// Module: Activity Override Resolver
// Description: Power-set search for the most specific translatable format.
// Purpose: Select which template string is handed to translation, memoized per key.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Integrators override activity wording by adding catalog entries for
//! partially substituted formats, for example `"Alice {action} {object}"`.
//! Given a format and its scalar parameters, the resolver tests every
//! non-empty subset of parameter names, largest first, substituting only the
//! names in the subset, and selects the first candidate the catalog can
//! translate. When none qualifies the original format is kept.
//!
//! Invariants:
//! - Empty parameter maps return the format unchanged without searching.
//! - At most one search runs per distinct substitution key for the lifetime
//!   of a resolver instance; results are never evicted.
//! - Substitution keys and candidates are built in name order, so equal
//!   inputs always produce the same key and search order.
//! - Parameter maps with 64 or more names are not searched; the format is
//!   returned and cached under its key.
//!
//! The cache is unsynchronized state owned by one resolver; share a resolver
//! across threads only behind external synchronization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::OverrideAuditEvent;
use crate::audit::OverrideAuditEventParams;
use crate::core::ParameterSet;
use crate::core::ScalarMap;
use crate::core::format::replace_placeholder;
use crate::interfaces::TranslationCatalog;

// ============================================================================
// SECTION: Override Resolver
// ============================================================================

/// Memoizing override resolver over a translation catalog.
pub struct OverrideResolver<C> {
    /// Catalog used for translatability checks and final translation.
    catalog: C,
    /// Selected overrides keyed by substitution key.
    overrides: BTreeMap<String, String>,
    /// Audit sink for resolution events.
    audit: Arc<dyn AuditSink>,
}

impl<C: TranslationCatalog> OverrideResolver<C> {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            overrides: BTreeMap::new(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Routes resolution events to `audit`.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns the number of memoized substitution keys.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.overrides.len()
    }

    /// Returns the override memoized for `key`, if any.
    #[must_use]
    pub fn cached_override(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    /// Returns the most specific translatable variant of `format`.
    ///
    /// Remaining placeholders in the selected override are left literal.
    pub fn resolve(&mut self, format: &str, parameters: &ScalarMap) -> String {
        if parameters.is_empty() {
            return format.to_string();
        }

        let key = substitution_key(format, parameters);
        if let Some(cached) = self.overrides.get(&key) {
            let selected = cached.clone();
            self.record(format, key, &selected, true, 0);
            return selected;
        }

        let names: Vec<&str> = parameters.keys().map(String::as_str).collect();
        let mut selected = None;
        let mut tested = 0;
        for subset in subsets_largest_first(names.len()) {
            let candidate = substitute_subset(format, parameters, &names, &subset);
            tested += 1;
            if self.catalog.is_translatable(&candidate) {
                selected = Some(candidate);
                break;
            }
        }
        let selected = selected.unwrap_or_else(|| format.to_string());

        self.overrides.insert(key.clone(), selected.clone());
        self.record(format, key, &selected, false, tested);
        selected
    }

    /// Flattens `tokens`, resolves the override, and translates it.
    ///
    /// Only scalar tokens (and named objects) take part in the search; the
    /// selected override is translated without further substitution.
    pub fn translate(&mut self, format: &str, tokens: &ParameterSet) -> String {
        let scalars = tokens.to_scalars();
        let selected = self.resolve(format, &scalars);
        self.catalog.translate(&selected)
    }

    /// Emits an override audit event.
    fn record(&self, format: &str, key: String, selected: &str, cache_hit: bool, tested: usize) {
        self.audit.record_override(&OverrideAuditEvent::new(OverrideAuditEventParams {
            format: format.to_string(),
            substitution_key: key,
            selected: selected.to_string(),
            cache_hit,
            candidates_tested: tested,
        }));
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Substitutes every parameter into `format`, in name order.
#[must_use]
pub fn substitution_key(format: &str, parameters: &ScalarMap) -> String {
    parameters.iter().fold(format.to_string(), |text, (name, value)| {
        replace_placeholder(&text, name, &value.to_string())
    })
}

/// Substitutes only the names selected by `subset` (indices into `names`).
fn substitute_subset(
    format: &str,
    parameters: &ScalarMap,
    names: &[&str],
    subset: &[usize],
) -> String {
    subset.iter().fold(format.to_string(), |text, index| {
        let name = names[*index];
        match parameters.get(name) {
            Some(value) => replace_placeholder(&text, name, &value.to_string()),
            None => text,
        }
    })
}

/// Enumerates non-empty subsets of `0..count`, largest first.
///
/// Within a size, subsets follow a binary counter whose most significant
/// bit is index 0. Sets of 64 or more elements yield nothing.
fn subsets_largest_first(count: usize) -> impl Iterator<Item = Vec<usize>> {
    let bits = u32::try_from(count).unwrap_or(u32::MAX);
    let total = 1_u64.checked_shl(bits).unwrap_or(0);
    (1 ..= bits).rev().flat_map(move |size| {
        (1 .. total)
            .filter(move |mask| mask.count_ones() == size)
            .map(move |mask| subset_members(mask, count))
    })
}

/// Decodes a mask into member indices, index 0 being the highest bit.
fn subset_members(mask: u64, count: usize) -> Vec<usize> {
    (0 .. count).filter(|index| mask & (1_u64 << (count - 1 - index)) != 0).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
