// crates/activity-stream-core/src/core/parameter.rs
// ============================================================================
// Module: Activity Parameters
// Description: Named rendering units extracted for template placeholders.
// Purpose: Carry display values plus link, translation, and attribute hints.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`Parameter`] is produced fresh per resolution request for one
//! placeholder name. Its value may be a scalar, a named object, or a nested
//! parameter set; only scalars (and named objects, through their display
//! name) survive flattening into the [`ScalarMap`] handed to the override
//! resolver, because the resolver performs textual substitution only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Reference;

// ============================================================================
// SECTION: Scalar Values
// ============================================================================

/// Primitive parameter value eligible for textual substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Integer(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
            Self::Text(value) => value.fmt(f),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Scalar parameter values keyed by placeholder name.
///
/// Ordered by name so substitution keys are computed canonically.
pub type ScalarMap = BTreeMap<String, ScalarValue>;

// ============================================================================
// SECTION: Structured Values
// ============================================================================

/// Activity object carried as a structured parameter value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedObject {
    /// Display name of the object, when it has one.
    pub object_name: Option<String>,
}

impl NamedObject {
    /// Creates an object with a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            object_name: Some(name.into()),
        }
    }
}

/// Value held by a parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    /// No value was extracted.
    #[default]
    Null,
    /// Primitive value.
    Scalar(ScalarValue),
    /// Activity object; flattens to its display name when it has one.
    Object(NamedObject),
    /// Nested parameter set; never flattened.
    Nested(ParameterSet),
}

impl ParameterValue {
    /// Returns the scalar form used for substitution, if any.
    #[must_use]
    pub fn as_scalar(&self) -> Option<ScalarValue> {
        match self {
            Self::Scalar(value) => Some(value.clone()),
            Self::Object(object) => object
                .object_name
                .as_ref()
                .filter(|name| !name.is_empty())
                .map(|name| ScalarValue::Text(name.clone())),
            Self::Null | Self::Nested(_) => None,
        }
    }
}

impl From<ScalarValue> for ParameterValue {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<NamedObject> for ParameterValue {
    fn from(value: NamedObject) -> Self {
        Self::Object(value)
    }
}

impl From<ParameterSet> for ParameterValue {
    fn from(value: ParameterSet) -> Self {
        Self::Nested(value)
    }
}

// ============================================================================
// SECTION: Attributes
// ============================================================================

/// Open mapping of rendering hints, merged additively.
///
/// # Invariants
/// - Each key holds distinct values in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Vec<String>>);

impl Attributes {
    /// Attribute key used for CSS classes.
    pub const CLASS: &'static str = "class";

    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` under `key` unless already present.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let values = self.0.entry(key.into()).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    /// Adds a CSS class.
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.add(Self::CLASS, class);
    }

    /// Merges every value of `other` into this map.
    pub fn merge(&mut self, other: &Self) {
        for (key, values) in &other.0 {
            for value in values {
                self.add(key.clone(), value.clone());
            }
        }
    }

    /// Returns the values stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns the CSS classes.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.get(Self::CLASS)
    }

    /// Returns true when no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over attribute keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

// ============================================================================
// SECTION: Parameter
// ============================================================================

/// Named rendering unit for one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Placeholder name, unique within its set.
    name: String,
    /// Resolved display value.
    value: ParameterValue,
    /// Whether the rendered value should itself be translated.
    translate: bool,
    /// Link target when the value is linkable.
    link: Option<Reference>,
    /// Rendering hints.
    attributes: Attributes,
}

impl Parameter {
    /// Creates an empty parameter shell for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Null,
            translate: true,
            link: None,
            attributes: Attributes::new(),
        }
    }

    /// Returns the placeholder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &ParameterValue {
        &self.value
    }

    /// Sets the value.
    pub fn set_value(&mut self, value: impl Into<ParameterValue>) {
        self.value = value.into();
    }

    /// Returns whether the rendered value is translated.
    #[must_use]
    pub const fn translate(&self) -> bool {
        self.translate
    }

    /// Sets whether the rendered value is translated.
    pub const fn set_translate(&mut self, translate: bool) {
        self.translate = translate;
    }

    /// Returns the link target.
    #[must_use]
    pub const fn link(&self) -> Option<&Reference> {
        self.link.as_ref()
    }

    /// Sets or clears the link target.
    pub fn set_link(&mut self, link: Option<Reference>) {
        self.link = link;
    }

    /// Returns the rendering hints.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the rendering hints for in-place merging.
    pub const fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

// ============================================================================
// SECTION: Parameter Set
// ============================================================================

/// Parameters keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, Parameter>);

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any previous one with the same name.
    pub fn insert(&mut self, parameter: Parameter) {
        self.0.insert(parameter.name.clone(), parameter);
    }

    /// Returns the parameter named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.get(name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Parameter> {
        self.0.values()
    }

    /// Flattens the set into the scalar values used for override resolution.
    ///
    /// Null and nested values are dropped; named objects contribute their
    /// display name.
    #[must_use]
    pub fn to_scalars(&self) -> ScalarMap {
        self.0
            .iter()
            .filter_map(|(name, parameter)| {
                parameter.value.as_scalar().map(|value| (name.clone(), value))
            })
            .collect()
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut set = Self::new();
        for parameter in iter {
            set.insert(parameter);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = btree_map::Values<'a, String, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}
