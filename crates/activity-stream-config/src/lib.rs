// crates/activity-stream-config/src/lib.rs
// ============================================================================
// Module: Activity Stream Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for activity-stream.toml semantics.
// Dependencies: activity-stream-core, serde, toml
// ============================================================================

//! ## Overview
//! `activity-stream-config` defines the canonical configuration model for
//! Activity Stream. It provides strict, fail-closed validation and builds
//! the core collaborators (catalog, audit sink, lifecycle, recorder) from a
//! validated configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
