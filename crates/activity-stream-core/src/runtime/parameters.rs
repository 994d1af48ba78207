// crates/activity-stream-core/src/runtime/parameters.rs
// ============================================================================
// Module: Activity Parameter Model
// Description: Placeholder extraction through a registered rule table.
// Purpose: Turn an activity's format into a concrete parameter set.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each distinct placeholder in an activity's format is looked up in a
//! dispatch table of extraction rules. A matching rule receives a parameter
//! shell pre-populated with the name and fills in the value and optional
//! hints. Names without a rule produce no parameter; the placeholder simply
//! stays literal unless the override resolver substitutes it away.
//!
//! Extraction results are cached on the activity itself: the first call to
//! [`ParameterModel::parameters`] wins for the lifetime of that instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::Activity;
use crate::core::ActivityStatus;
use crate::core::Attributes;
use crate::core::Parameter;
use crate::core::ParameterSet;
use crate::core::ParameterValue;
use crate::interfaces::ActorDirectory;
use crate::interfaces::ObjectLocator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Actor value used when the recorded actor no longer exists.
pub const DELETED_USER: &str = "Deleted user";
/// Actor value used when no actor was recorded.
pub const GUEST_USER: &str = "Guest user";
/// Class added to object parameters.
pub const OBJECT_CLASS: &str = "object";
/// Class added to titles of deleted objects.
pub const DELETED_CLASS: &str = "deleted";

// ============================================================================
// SECTION: Extraction Context
// ============================================================================

/// Collaborators available to extraction rules.
#[derive(Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Directory used to resolve the acting user.
    pub actors: &'a dyn ActorDirectory,
    /// Locator used to resolve the activity object.
    pub objects: &'a dyn ObjectLocator,
}

impl<'a> ExtractionContext<'a> {
    /// Creates a context over the given collaborators.
    #[must_use]
    pub const fn new(actors: &'a dyn ActorDirectory, objects: &'a dyn ObjectLocator) -> Self {
        Self {
            actors,
            objects,
        }
    }
}

/// Extraction rule for one placeholder name.
pub type ExtractionRule = fn(&Activity, &ExtractionContext<'_>, &mut Parameter);

// ============================================================================
// SECTION: Parameter Model
// ============================================================================

/// Dispatch table from placeholder name to extraction rule.
#[derive(Clone)]
pub struct ParameterModel {
    /// Registered rules keyed by placeholder name.
    rules: BTreeMap<String, ExtractionRule>,
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParameterModel {
    /// Creates a model with no rules.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Creates a model with the `actor`, `action`, `object`, and `title` rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_rule("actor", actor_parameter)
            .with_rule("action", action_parameter)
            .with_rule("object", object_parameter)
            .with_rule("title", title_parameter)
    }

    /// Registers `rule` for `name`, replacing any existing rule.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, rule: ExtractionRule) -> Self {
        self.register(name, rule);
        self
    }

    /// Registers `rule` for `name` and returns the rule it replaced.
    pub fn register(&mut self, name: impl Into<String>, rule: ExtractionRule) -> Option<ExtractionRule> {
        self.rules.insert(name.into(), rule)
    }

    /// Returns true when a rule exists for `name`.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Runs the rules for every distinct placeholder in the activity format.
    #[must_use]
    pub fn extract(&self, activity: &Activity, ctx: &ExtractionContext<'_>) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        for name in activity.format().placeholders() {
            if let Some(rule) = self.rules.get(name) {
                let mut parameter = Parameter::new(name);
                rule(activity, ctx, &mut parameter);
                parameters.insert(parameter);
            }
        }
        parameters
    }

    /// Returns the activity's parameters, extracting them on first use only.
    pub fn parameters<'e>(
        &self,
        activity: &'e Activity,
        ctx: &ExtractionContext<'_>,
    ) -> &'e ParameterSet {
        activity.parameters_with(|activity| self.extract(activity, ctx))
    }
}

// ============================================================================
// SECTION: Built-in Rules
// ============================================================================

/// Actor: linked display name, or a deleted/guest label.
fn actor_parameter(activity: &Activity, ctx: &ExtractionContext<'_>, parameter: &mut Parameter) {
    let actor = activity.created_by();
    if let Some(record) = actor.and_then(|id| ctx.actors.resolve_actor(id)) {
        parameter.set_link(record.reference);
        parameter.set_translate(false);
        parameter.set_value(record.display_name);
    } else if actor.is_some() {
        parameter.set_value(DELETED_USER);
    } else {
        parameter.set_value(GUEST_USER);
    }
}

/// Action: the current status label.
fn action_parameter(activity: &Activity, _ctx: &ExtractionContext<'_>, parameter: &mut Parameter) {
    let value = activity
        .status()
        .map_or(ParameterValue::Null, |status| ParameterValue::from(status.as_str()));
    parameter.set_value(value);
}

/// Object: the object type name.
fn object_parameter(activity: &Activity, _ctx: &ExtractionContext<'_>, parameter: &mut Parameter) {
    parameter.set_value(activity.name());
    let mut defaults = Attributes::new();
    defaults.add_class(OBJECT_CLASS);
    parameter.attributes_mut().merge(&defaults);
}

/// Title: untranslated title, linked while the object exists.
fn title_parameter(activity: &Activity, ctx: &ExtractionContext<'_>, parameter: &mut Parameter) {
    parameter.set_value(activity.title());
    parameter.set_translate(false);

    if activity.status() == Some(ActivityStatus::Deleted) {
        parameter.attributes_mut().add_class(DELETED_CLASS);
    } else if let Some(reference) = ctx.objects.resolve_object(activity) {
        parameter.set_link(Some(reference));
    }
}
