// crates/activity-stream-core/src/core/format.rs
// ============================================================================
// Module: Activity Format Templates
// Description: Format template type, placeholder grammar, and literal substitution.
// Purpose: Provide the single parser for `{name}` placeholders used across the crate.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A format template is an immutable string containing zero or more
//! placeholders of the form `{name}`, where `name` matches `[A-Za-z0-9_]+`.
//! Placeholder order matters for output but not for override resolution.
//!
//! Text that looks like a brace but does not satisfy the grammar (for example
//! `{not valid}` or a lone `{`) is ordinary literal text. Use
//! [`FormatTemplate::parse_strict`] at configuration boundaries where such
//! text is more likely an authoring mistake.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Format used by activities that do not declare their own.
pub const DEFAULT_FORMAT: &str = "{actor} {action} {object} {title}";

/// Opening placeholder delimiter.
const OPEN: u8 = b'{';
/// Closing placeholder delimiter.
const CLOSE: u8 = b'}';

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Strict template parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Template is empty or whitespace-only.
    #[error("format template must be non-empty")]
    Empty,
    /// An opening brace does not start a well-formed placeholder.
    #[error("malformed placeholder at byte {offset}")]
    MalformedPlaceholder {
        /// Byte offset of the opening brace.
        offset: usize,
    },
    /// A closing brace has no matching placeholder.
    #[error("unmatched closing brace at byte {offset}")]
    UnmatchedClose {
        /// Byte offset of the closing brace.
        offset: usize,
    },
}

// ============================================================================
// SECTION: Format Template
// ============================================================================

/// Immutable activity message template.
///
/// # Invariants
/// - The underlying text is never modified after construction.
/// - [`FormatTemplate::placeholders`] yields each distinct name once, in
///   order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatTemplate(String);

impl FormatTemplate {
    /// Creates a template from arbitrary text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a template, rejecting empty text and malformed braces.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the text is empty, when a `{` does not
    /// open a grammar-valid placeholder, or when a `}` is unmatched.
    pub fn parse_strict(text: impl Into<String>) -> Result<Self, FormatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        let bytes = text.as_bytes();
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                OPEN => match placeholder_at(&text, index) {
                    Some(name) => index += name.len() + 2,
                    None => return Err(FormatError::MalformedPlaceholder {
                        offset: index,
                    }),
                },
                CLOSE => {
                    return Err(FormatError::UnmatchedClose {
                        offset: index,
                    });
                }
                _ => index += 1,
            }
        }
        Ok(Self(text))
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the distinct placeholder names in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in scan_placeholders(&self.0) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FormatTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FormatTemplate {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Grammar Helpers
// ============================================================================

/// Replaces every literal `{name}` in `text` with `value`.
pub(crate) fn replace_placeholder(text: &str, name: &str, value: &str) -> String {
    text.replace(&format!("{{{name}}}"), value)
}

/// Returns true for bytes allowed inside a placeholder name.
const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Returns the placeholder name when `text[start]` opens a valid placeholder.
fn placeholder_at(text: &str, start: usize) -> Option<&str> {
    let rest = text.get(start + 1 ..)?;
    let len = rest.bytes().take_while(|byte| is_name_byte(*byte)).count();
    if len == 0 || rest.as_bytes().get(len) != Some(&CLOSE) {
        return None;
    }
    rest.get(.. len)
}

/// Iterates over every placeholder occurrence, duplicates included.
fn scan_placeholders(text: &str) -> impl Iterator<Item = &str> {
    let mut index = 0;
    std::iter::from_fn(move || {
        while let Some(offset) = text.get(index ..)?.find('{') {
            let start = index + offset;
            if let Some(name) = placeholder_at(text, start) {
                index = start + name.len() + 2;
                return Some(name);
            }
            index = start + 1;
        }
        None
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
