// crates/activity-stream-core/src/runtime/mod.rs
// ============================================================================
// Module: Activity Stream Runtime
// Description: Override resolution, parameter extraction, saving, and rendering.
// Purpose: Operate on core types through explicitly injected collaborators.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the behavior around activities: the memoizing
//! override resolver, the parameter extraction table, the save lifecycle,
//! the renderer that composes them, and the recorder that turns completed
//! commands into activities. In-memory collaborators live in [`store`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod lifecycle;
pub mod parameters;
pub mod recorder;
pub mod renderer;
pub mod resolver;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use lifecycle::ActivityLifecycle;
pub use lifecycle::MISSING_REQUIRED_DATA;
pub use lifecycle::SaveError;
pub use lifecycle::ValidationError;
pub use parameters::DELETED_USER;
pub use parameters::ExtractionContext;
pub use parameters::ExtractionRule;
pub use parameters::GUEST_USER;
pub use parameters::ParameterModel;
pub use recorder::ActivityRecorder;
pub use recorder::AffectedRecord;
pub use recorder::CommandContext;
pub use recorder::RecordOutcome;
pub use recorder::RecordReport;
pub use recorder::RecorderConfig;
pub use recorder::SubjectIdentifier;
pub use renderer::ActivityRenderer;
pub use renderer::RenderedMessage;
pub use resolver::OverrideResolver;
pub use resolver::substitution_key;
pub use store::InMemoryActivityStore;
pub use store::InMemoryActorDirectory;
pub use store::InMemoryTranslationCatalog;
pub use store::NullObjectLocator;
pub use store::RouteObjectLocator;
pub use store::actor_reference;
