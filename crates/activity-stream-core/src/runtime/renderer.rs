// crates/activity-stream-core/src/runtime/renderer.rs
// ============================================================================
// Module: Activity Renderer
// Description: Activity-to-message rendering through the override resolver.
// Purpose: Compose parameter extraction, flattening, resolution, and translation.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Rendering an activity extracts (or reuses) its parameters, flattens them
//! to scalars, resolves the most specific override of its format, and
//! translates the override. The non-flattened parameters are returned
//! alongside the text for presentation layers that add links and classes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Activity;
use crate::core::ParameterSet;
use crate::interfaces::ActorDirectory;
use crate::interfaces::ObjectLocator;
use crate::interfaces::TranslationCatalog;
use crate::runtime::parameters::ExtractionContext;
use crate::runtime::parameters::ParameterModel;
use crate::runtime::resolver::OverrideResolver;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Translated message plus the parameters it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    /// Translated override text.
    pub text: String,
    /// Parameters extracted from the activity.
    pub parameters: ParameterSet,
}

/// Renders activities to translated messages.
pub struct ActivityRenderer<'a, C> {
    /// Override resolver; its cache lives as long as the renderer.
    resolver: OverrideResolver<C>,
    /// Extraction rules.
    model: ParameterModel,
    /// Actor and object collaborators.
    ctx: ExtractionContext<'a>,
}

impl<'a, C: TranslationCatalog> ActivityRenderer<'a, C> {
    /// Creates a renderer with the built-in parameter model.
    #[must_use]
    pub fn new(
        resolver: OverrideResolver<C>,
        actors: &'a dyn ActorDirectory,
        objects: &'a dyn ObjectLocator,
    ) -> Self {
        Self {
            resolver,
            model: ParameterModel::builtin(),
            ctx: ExtractionContext::new(actors, objects),
        }
    }

    /// Replaces the parameter model.
    #[must_use]
    pub fn with_model(mut self, model: ParameterModel) -> Self {
        self.model = model;
        self
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &OverrideResolver<C> {
        &self.resolver
    }

    /// Returns the activity's parameters, extracting them on first use.
    pub fn parameters<'e>(&self, activity: &'e Activity) -> &'e ParameterSet {
        self.model.parameters(activity, &self.ctx)
    }

    /// Renders `activity` to translated text.
    pub fn render(&mut self, activity: &Activity) -> String {
        let parameters = self.model.parameters(activity, &self.ctx);
        self.resolver.translate(activity.format().as_str(), parameters)
    }

    /// Renders `activity` and returns the text with its parameters.
    pub fn render_message(&mut self, activity: &Activity) -> RenderedMessage {
        let text = self.render(activity);
        RenderedMessage {
            text,
            parameters: self.parameters(activity).clone(),
        }
    }
}
