// crates/activity-stream-core/tests/proptest_resolver.rs
// ============================================================================
// Module: Override Resolver Property-Based Tests
// Description: Property tests for resolver determinism and search bounds.
// Purpose: Detect ordering drift and cache disagreement across wide inputs.
// ============================================================================

//! Property-based tests for override resolution and template grammar.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::cell::Cell;

use activity_stream_core::FormatTemplate;
use activity_stream_core::OverrideResolver;
use activity_stream_core::ScalarMap;
use activity_stream_core::ScalarValue;
use activity_stream_core::TranslationCatalog;
use proptest::prelude::*;

/// Catalog accepting candidates whose byte length is a multiple of `modulus`.
struct LengthCatalog {
    modulus: usize,
    checks: Cell<usize>,
}

impl LengthCatalog {
    fn new(modulus: usize) -> Self {
        Self {
            modulus,
            checks: Cell::new(0),
        }
    }
}

impl TranslationCatalog for LengthCatalog {
    fn is_translatable(&self, source: &str) -> bool {
        self.checks.set(self.checks.get() + 1);
        source.len() % self.modulus == 0
    }

    fn translate(&self, source: &str) -> String {
        source.to_string()
    }
}

fn parameters_strategy() -> impl Strategy<Value = ScalarMap> {
    prop::collection::btree_map("[a-e]", "[a-z ]{0,4}", 0 .. 5).prop_map(|map| {
        map.into_iter().map(|(name, value)| (name, ScalarValue::Text(value))).collect()
    })
}

fn format_for(parameters: &ScalarMap, extra: &str) -> String {
    let mut format: String =
        parameters.keys().map(|name| format!("{{{name}}} ")).collect::<Vec<_>>().concat();
    format.push_str(extra);
    format
}

proptest! {
    #[test]
    fn cold_and_warm_resolution_agree(
        parameters in parameters_strategy(),
        extra in "[a-z]{0,6}",
        modulus in 1_usize .. 7,
    ) {
        let format = format_for(&parameters, &extra);
        let catalog = LengthCatalog::new(modulus);
        let mut resolver = OverrideResolver::new(&catalog);

        let cold = resolver.resolve(&format, &parameters);
        let checks = catalog.checks.get();
        let warm = resolver.resolve(&format, &parameters);

        prop_assert_eq!(&cold, &warm);
        prop_assert_eq!(catalog.checks.get(), checks);

        let fresh_catalog = LengthCatalog::new(modulus);
        let mut fresh = OverrideResolver::new(&fresh_catalog);
        prop_assert_eq!(fresh.resolve(&format, &parameters), cold);
    }

    #[test]
    fn search_is_bounded_by_the_power_set(
        parameters in parameters_strategy(),
        modulus in 1_usize .. 7,
    ) {
        let format = format_for(&parameters, "");
        let catalog = LengthCatalog::new(modulus);
        let mut resolver = OverrideResolver::new(&catalog);

        let selected = resolver.resolve(&format, &parameters);

        let bound = (1_usize << parameters.len()) - 1;
        prop_assert!(catalog.checks.get() <= bound);
        prop_assert!(selected == format || selected.len() % modulus == 0);
    }

    #[test]
    fn generated_formats_expose_every_name(parameters in parameters_strategy()) {
        let format = format_for(&parameters, "done");
        let template = FormatTemplate::parse_strict(format.as_str()).unwrap();

        let names: Vec<&str> = template.placeholders();
        let expected: Vec<&str> = parameters.keys().map(String::as_str).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn accept_all_catalog_selects_full_substitution(
        values in prop::collection::btree_map("[a-c]", "[x-z]{1,3}", 1 .. 4),
    ) {
        let parameters: ScalarMap =
            values.iter().map(|(name, value)| (name.clone(), ScalarValue::from(value.as_str()))).collect();
        let format = format_for(&parameters, "");
        let catalog = LengthCatalog::new(1);
        let mut resolver = OverrideResolver::new(&catalog);

        let selected = resolver.resolve(&format, &parameters);

        let expected: String =
            values.values().map(|value| format!("{value} ")).collect::<Vec<_>>().concat();
        prop_assert_eq!(selected, expected);
    }
}
