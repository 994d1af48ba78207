// crates/activity-stream-core/src/core/mod.rs
// ============================================================================
// Module: Activity Stream Core Types
// Description: Format templates, parameters, identifiers, and the activity entity.
// Purpose: Provide stable, serializable types shared by the runtime and collaborators.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what an activity *is*: the format template that shapes
//! its message, the parameters extracted for each placeholder, and the
//! append-only activity record with its field contracts. They carry no
//! collaborator dependencies; resolution and persistence live in
//! [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod activity;
pub mod format;
pub mod identifiers;
pub mod parameter;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use activity::Activity;
pub use activity::ActivityStatus;
pub use activity::ContractViolation;
pub use activity::DEFAULT_REQUIRED_FIELDS;
pub use activity::EntityState;
pub use activity::RequiredField;
pub use format::DEFAULT_FORMAT;
pub use format::FormatError;
pub use format::FormatTemplate;
pub use identifiers::ActivityId;
pub use identifiers::ActorId;
pub use identifiers::Reference;
pub use identifiers::RowId;
pub use parameter::Attributes;
pub use parameter::NamedObject;
pub use parameter::Parameter;
pub use parameter::ParameterSet;
pub use parameter::ParameterValue;
pub use parameter::ScalarMap;
pub use parameter::ScalarValue;
pub use time::Timestamp;
