//! One-line status shown under the generate button.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Neutral,
    Loading,
    Success,
    Error,
}

/// Outcome of the last action. Only the latest one is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

impl Status {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Loading,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}
