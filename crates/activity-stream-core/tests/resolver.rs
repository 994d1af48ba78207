// crates/activity-stream-core/tests/resolver.rs
// ============================================================================
// Module: Override Resolver Tests
// Description: Specificity, fallback, and memoization of override resolution.
// ============================================================================
//! ## Overview
//! Exercises the override resolver against a counting catalog so the number
//! of translatability checks can be asserted directly.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::cell::Cell;
use std::collections::BTreeSet;
use std::sync::Arc;

use activity_stream_core::InMemoryTranslationCatalog;
use activity_stream_core::MemoryAuditSink;
use activity_stream_core::NamedObject;
use activity_stream_core::OverrideResolver;
use activity_stream_core::Parameter;
use activity_stream_core::ParameterSet;
use activity_stream_core::ParameterValue;
use activity_stream_core::ScalarMap;
use activity_stream_core::ScalarValue;
use activity_stream_core::TranslationCatalog;
use activity_stream_core::runtime::substitution_key;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Catalog that accepts a fixed set of strings and counts lookups.
#[derive(Default)]
struct CountingCatalog {
    accepted: BTreeSet<String>,
    checks: Cell<usize>,
}

impl CountingCatalog {
    fn accepting(entries: &[&str]) -> Self {
        Self {
            accepted: entries.iter().map(|entry| (*entry).to_string()).collect(),
            checks: Cell::new(0),
        }
    }

    fn checks(&self) -> usize {
        self.checks.get()
    }
}

impl TranslationCatalog for CountingCatalog {
    fn is_translatable(&self, source: &str) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.accepted.contains(source)
    }

    fn translate(&self, source: &str) -> String {
        source.to_uppercase()
    }
}

fn scalars(pairs: &[(&str, &str)]) -> ScalarMap {
    pairs.iter().map(|(name, value)| ((*name).to_string(), ScalarValue::from(*value))).collect()
}

// ============================================================================
// SECTION: Specificity
// ============================================================================

#[test]
fn fully_substituted_candidate_is_selected() {
    let catalog = CountingCatalog::accepting(&["Alice did edit"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));

    assert_eq!(selected, "Alice did edit");
    assert_eq!(catalog.checks(), 1);
}

#[test]
fn larger_subsets_win_over_smaller_ones() {
    let catalog = CountingCatalog::accepting(&["Alice did {b}", "Alice did edit"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));

    assert_eq!(selected, "Alice did edit");
}

#[test]
fn partial_override_keeps_remaining_placeholders_literal() {
    let catalog = CountingCatalog::accepting(&["Alice did {b}"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));

    assert_eq!(selected, "Alice did {b}");
    assert_eq!(catalog.checks(), 3);
}

#[test]
fn equal_size_subsets_substitute_later_names_first() {
    let catalog = CountingCatalog::accepting(&["Alice did {b}", "{a} did edit"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));

    assert_eq!(selected, "{a} did edit");
    assert_eq!(catalog.checks(), 2);
}

// ============================================================================
// SECTION: Fallback and Short-Circuit
// ============================================================================

#[test]
fn untranslatable_candidates_fall_back_to_format() {
    let catalog = CountingCatalog::default();
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));

    assert_eq!(selected, "{a} did {b}");
    assert_eq!(catalog.checks(), 3);
}

#[test]
fn empty_parameters_skip_the_search() {
    let catalog = CountingCatalog::accepting(&["{a} did it"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let selected = resolver.resolve("{a} did it", &ScalarMap::new());

    assert_eq!(selected, "{a} did it");
    assert_eq!(catalog.checks(), 0);
    assert_eq!(resolver.cached_len(), 0);
}

#[test]
fn format_without_matching_placeholders_is_searched_once() {
    let catalog = CountingCatalog::default();
    let mut resolver = OverrideResolver::new(&catalog);
    let parameters = scalars(&[("a", "1")]);

    assert_eq!(resolver.resolve("static text", &parameters), "static text");
    assert_eq!(resolver.resolve("static text", &parameters), "static text");

    assert_eq!(catalog.checks(), 1);
    assert_eq!(resolver.cached_override("static text"), Some("static text"));
}

// ============================================================================
// SECTION: Memoization
// ============================================================================

#[test]
fn repeated_resolution_hits_the_cache() {
    let catalog = CountingCatalog::accepting(&["Alice did {b}"]);
    let mut resolver = OverrideResolver::new(&catalog);
    let parameters = scalars(&[("a", "Alice"), ("b", "edit")]);

    let cold = resolver.resolve("{a} did {b}", &parameters);
    let checks_after_cold = catalog.checks();
    let warm = resolver.resolve("{a} did {b}", &parameters);

    assert_eq!(cold, warm);
    assert_eq!(catalog.checks(), checks_after_cold);
    assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn maps_with_equal_substitution_share_one_search() {
    let catalog = CountingCatalog::default();
    let mut resolver = OverrideResolver::new(&catalog);
    let first = scalars(&[("a", "x"), ("b", "y")]);
    let second = scalars(&[("a", "xy"), ("b", "")]);
    assert_eq!(substitution_key("{a}{b}", &first), substitution_key("{a}{b}", &second));

    let first_result = resolver.resolve("{a}{b}", &first);
    let checks_after_first = catalog.checks();
    let second_result = resolver.resolve("{a}{b}", &second);

    assert_eq!(first_result, second_result);
    assert_eq!(catalog.checks(), checks_after_first);
}

#[test]
fn distinct_values_are_cached_separately() {
    let catalog = CountingCatalog::accepting(&["Alice did edit"]);
    let mut resolver = OverrideResolver::new(&catalog);

    let alice = resolver.resolve("{a} did {b}", &scalars(&[("a", "Alice"), ("b", "edit")]));
    let bob = resolver.resolve("{a} did {b}", &scalars(&[("a", "Bob"), ("b", "edit")]));

    assert_eq!(alice, "Alice did edit");
    assert_eq!(bob, "{a} did {b}");
    assert_eq!(resolver.cached_len(), 2);
}

#[test]
fn substitution_key_uses_name_order() {
    let parameters = scalars(&[("b", "{a}"), ("a", "x")]);

    assert_eq!(substitution_key("{a}-{b}", &parameters), "x-{a}");
}

// ============================================================================
// SECTION: Translation
// ============================================================================

#[test]
fn translate_flattens_objects_and_drops_nested_sets() {
    let catalog = InMemoryTranslationCatalog::from_entries([(
        "Alice {action} {object}",
        "Alice a fait {action} sur {object}",
    )]);
    let mut resolver = OverrideResolver::new(catalog);
    let mut actor = Parameter::new("actor");
    actor.set_value("Alice");
    let mut action = Parameter::new("action");
    action.set_value("edited");
    let mut object = Parameter::new("object");
    object.set_value(NamedObject::named("article"));
    let mut nested = Parameter::new("nested");
    nested.set_value(ParameterValue::Nested(ParameterSet::new()));
    let tokens: ParameterSet = [actor, action, object, nested].into_iter().collect();

    let text = resolver.translate("{actor} {action} {object}", &tokens);

    assert_eq!(text, "Alice a fait {action} sur {object}");
    assert_eq!(tokens.to_scalars().len(), 3);
}

#[test]
fn translate_uses_the_most_specific_catalog_entry() {
    let catalog = InMemoryTranslationCatalog::from_entries([(
        "Alice {action} {object}",
        "Alice a modifié {object}",
    )]);
    let mut resolver = OverrideResolver::new(catalog);
    let mut actor = Parameter::new("actor");
    actor.set_value("Alice");
    let mut action = Parameter::new("action");
    action.set_value(ParameterValue::Null);
    let mut object = Parameter::new("object");
    object.set_value(NamedObject::default());
    let tokens: ParameterSet = [actor, action, object].into_iter().collect();

    let text = resolver.translate("{actor} {action} {object}", &tokens);

    assert_eq!(text, "Alice a modifié {object}");
}

// ============================================================================
// SECTION: Audit
// ============================================================================

#[test]
fn resolutions_are_audited_with_cache_state() {
    let sink = Arc::new(MemoryAuditSink::new());
    let catalog = CountingCatalog::accepting(&["Alice did edit"]);
    let mut resolver = OverrideResolver::new(&catalog).with_audit(sink.clone());
    let parameters = scalars(&[("a", "Alice"), ("b", "edit")]);

    resolver.resolve("{a} did {b}", &parameters);
    resolver.resolve("{a} did {b}", &parameters);

    let events = sink.override_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, "override_resolved");
    assert!(!events[0].cache_hit);
    assert_eq!(events[0].candidates_tested, 1);
    assert_eq!(events[0].selected, "Alice did edit");
    assert!(events[1].cache_hit);
    assert_eq!(events[1].candidates_tested, 0);
    assert_eq!(events[1].substitution_key, "Alice did edit");
}
