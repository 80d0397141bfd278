//! Validation constants and result types.

use serde::{Deserialize, Serialize};

/// Minimum title length, in characters.
pub const MIN_TITLE_CHARS: usize = 3;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Characters a title may not contain.
pub const FORBIDDEN_TITLE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum tagline length, in characters.
pub const MAX_TAGLINE_CHARS: usize = 75;

/// Whether a violation blocks saving or is informational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    /// Field or widget the rule applies to, e.g. `"title"` or `"widgets.w1"`.
    pub field: String,
    /// Machine-readable rule name, e.g. `"max_length"`.
    pub rule: String,
    /// Human-readable message for the editor UI.
    pub message: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Aggregated result of validating one Scape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScapeValidation {
    pub is_valid: bool,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
    /// Depends only on the title rules.
    pub can_save_draft: bool,
    /// Requires a savable draft, the publish-only rules, and no errors.
    pub can_publish: bool,
}

impl ScapeValidation {
    /// Error messages in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|v| v.message.as_str()).collect()
    }

    /// Whether any error was raised by `rule` on `field`.
    pub fn has_error(&self, field: &str, rule: &str) -> bool {
        self.errors.iter().any(|v| v.field == field && v.rule == rule)
    }
}
