// crates/activity-stream-config/src/config.rs
// ============================================================================
// Module: Activity Stream Configuration
// Description: Configuration loading and validation for Activity Stream.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: activity-stream-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file is a valid configuration.
//! Invalid values fail closed; nothing is silently corrected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use activity_stream_core::ActivityLifecycle;
use activity_stream_core::ActivityRecorder;
use activity_stream_core::AuditSink;
use activity_stream_core::DEFAULT_FORMAT;
use activity_stream_core::DEFAULT_REQUIRED_FIELDS;
use activity_stream_core::FileAuditSink;
use activity_stream_core::FormatTemplate;
use activity_stream_core::InMemoryTranslationCatalog;
use activity_stream_core::NoopAuditSink;
use activity_stream_core::RecorderConfig;
use activity_stream_core::RequiredField;
use activity_stream_core::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "activity-stream.toml";
/// Environment variable naming the configuration path.
pub(crate) const CONFIG_ENV_VAR: &str = "ACTIVITY_STREAM_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of recorded command names.
pub(crate) const MAX_RECORDER_ACTIONS: usize = 64;
/// Maximum number of title columns.
pub(crate) const MAX_TITLE_COLUMNS: usize = 16;
/// Maximum number of catalog entries.
pub(crate) const MAX_CATALOG_ENTRIES: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Activity Stream configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityStreamConfig {
    /// Activity entity defaults.
    #[serde(default)]
    pub activity: ActivityConfig,
    /// Recorder settings.
    #[serde(default)]
    pub recorder: RecorderSection,
    /// Audit sink settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Translation catalog entries.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl ActivityStreamConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity.validate()?;
        self.recorder.validate()?;
        self.audit.validate()?;
        self.catalog.validate()?;
        Ok(())
    }

    /// Builds the translation catalog from `[catalog]` entries.
    #[must_use]
    pub fn build_catalog(&self) -> InMemoryTranslationCatalog {
        InMemoryTranslationCatalog::from_entries(
            self.catalog.entries.iter().map(|(source, text)| (source.as_str(), text.as_str())),
        )
    }

    /// Returns the recorder settings, using the configured default format.
    #[must_use]
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            actions: self.recorder.actions.clone(),
            title_columns: self.recorder.title_columns.clone(),
            format: self.activity.format(),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn AuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.audit.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path is required for file sink".to_string())
                })?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }

    /// Builds a lifecycle with the configured required fields and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit sink cannot be opened.
    pub fn build_lifecycle(&self) -> Result<ActivityLifecycle, ConfigError> {
        Ok(ActivityLifecycle::new()
            .with_required_fields(self.activity.required_fields.iter().copied())
            .with_audit(self.build_audit_sink()?))
    }

    /// Builds a recorder over the configured lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit sink cannot be opened.
    pub fn build_recorder(&self) -> Result<ActivityRecorder, ConfigError> {
        Ok(ActivityRecorder::new(self.recorder_config(), self.build_lifecycle()?))
    }
}

/// `[activity]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityConfig {
    /// Format assigned to activities that do not declare one.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Fields that must be non-empty before an activity is persisted.
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<RequiredField>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            required_fields: default_required_fields(),
        }
    }
}

impl ActivityConfig {
    /// Returns the configured default format.
    #[must_use]
    pub fn format(&self) -> FormatTemplate {
        FormatTemplate::new(self.default_format.as_str())
    }

    /// Validates activity defaults.
    fn validate(&self) -> Result<(), ConfigError> {
        FormatTemplate::parse_strict(self.default_format.as_str())
            .map_err(|err| ConfigError::Invalid(format!("activity.default_format: {err}")))?;
        let mut seen = BTreeSet::new();
        for field in &self.required_fields {
            if !seen.insert(*field) {
                return Err(ConfigError::Invalid(format!(
                    "activity.required_fields lists `{field}` more than once"
                )));
            }
        }
        Ok(())
    }
}

/// `[recorder]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RecorderSection {
    /// Command names that produce activities.
    #[serde(default = "default_recorder_actions")]
    pub actions: Vec<String>,
    /// Record columns consulted, in order, for the activity title.
    #[serde(default = "default_title_columns")]
    pub title_columns: Vec<String>,
}

impl Default for RecorderSection {
    fn default() -> Self {
        Self {
            actions: default_recorder_actions(),
            title_columns: default_title_columns(),
        }
    }
}

impl RecorderSection {
    /// Validates recorder settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_names("recorder.actions", &self.actions, MAX_RECORDER_ACTIONS)?;
        if self.title_columns.is_empty() {
            return Err(ConfigError::Invalid("recorder.title_columns must be non-empty".to_string()));
        }
        validate_names("recorder.title_columns", &self.title_columns, MAX_TITLE_COLUMNS)
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// `[audit]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (file sink only).
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for file sink".to_string()))
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for file sink".to_string()))
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Translations keyed by source string.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl CatalogConfig {
    /// Validates catalog entries.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.len() > MAX_CATALOG_ENTRIES {
            return Err(ConfigError::Invalid("catalog.entries exceeds max entries".to_string()));
        }
        if self.entries.keys().any(|source| source.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "catalog.entries keys must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default `activity.default_format`.
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Default `activity.required_fields`.
fn default_required_fields() -> Vec<RequiredField> {
    DEFAULT_REQUIRED_FIELDS.to_vec()
}

/// Default `recorder.actions`.
fn default_recorder_actions() -> Vec<String> {
    RecorderConfig::default().actions
}

/// Default `recorder.title_columns`.
fn default_title_columns() -> Vec<String> {
    RecorderConfig::default().title_columns
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a list of non-empty, unique names.
fn validate_names(field: &str, names: &[String], max: usize) -> Result<(), ConfigError> {
    if names.len() > max {
        return Err(ConfigError::Invalid(format!("{field} exceeds max entries ({max})")));
    }
    let mut seen = BTreeSet::new();
    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid(format!("{field} entries must be non-empty")));
        }
        if !seen.insert(trimmed) {
            return Err(ConfigError::Invalid(format!("{field} lists `{trimmed}` more than once")));
        }
    }
    Ok(())
}
