use serde::{Deserialize, Serialize};

/// Visual state of a field's container.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    /// Not validated yet.
    #[default]
    Neutral,
    Error,
    Success,
}

impl VisualState {
    /// CSS class applied to the container, if any.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Error => Some("error"),
            Self::Success => Some("success"),
        }
    }
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the field passed every rule.
    pub valid: bool,
    /// Message of the first failing rule, when invalid.
    pub message: Option<String>,
}

impl Verdict {
    /// A passing verdict.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing verdict carrying the user-facing message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

impl<E: std::fmt::Display> From<Result<(), E>> for Verdict {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(err) => Self::invalid(err.to_string()),
        }
    }
}
