// crates/activity-stream-core/src/lib.rs
// ============================================================================
// Module: Activity Stream Core Library
// Description: Public API surface for the Activity Stream core.
// Purpose: Expose activity types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Activity Stream core renders human-readable activity messages such as
//! "Alice edited Report #12" from a compact format template and a set of
//! named parameters. Integrators override wording for specific token
//! combinations through the translation catalog; the override resolver
//! discovers the most specific translatable template by searching the power
//! set of known tokens and memoizes each decision.
//!
//! The crate also owns the append-only activity entity: parameter
//! extraction, required-field validation, status derivation, and the
//! write-once package contract. Translation, identity lookup, object lookup,
//! and persistence are external collaborators reached through
//! [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::LifecycleAuditEvent;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::OverrideAuditEvent;
pub use audit::OverrideAuditEventParams;
pub use audit::StderrAuditSink;
pub use interfaces::ActivityStore;
pub use interfaces::ActorDirectory;
pub use interfaces::ActorRecord;
pub use interfaces::ObjectLocator;
pub use interfaces::StoreError;
pub use interfaces::TranslationCatalog;
pub use runtime::ActivityLifecycle;
pub use runtime::ActivityRecorder;
pub use runtime::ActivityRenderer;
pub use runtime::AffectedRecord;
pub use runtime::CommandContext;
pub use runtime::ExtractionContext;
pub use runtime::ExtractionRule;
pub use runtime::InMemoryActivityStore;
pub use runtime::InMemoryActorDirectory;
pub use runtime::InMemoryTranslationCatalog;
pub use runtime::NullObjectLocator;
pub use runtime::OverrideResolver;
pub use runtime::ParameterModel;
pub use runtime::RecordOutcome;
pub use runtime::RecordReport;
pub use runtime::RecorderConfig;
pub use runtime::RenderedMessage;
pub use runtime::RouteObjectLocator;
pub use runtime::SaveError;
pub use runtime::SubjectIdentifier;
pub use runtime::ValidationError;
