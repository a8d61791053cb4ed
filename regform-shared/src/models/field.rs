use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

use crate::errors::FormError;

/// Identifies one input of the registration form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl FieldId {
    /// Return the element id used for this field in the page markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm-password",
        }
    }

    /// Return the CSS selector that locates the field's input element.
    #[must_use]
    pub fn selector(self) -> String {
        format!("#{}", self.as_str())
    }

    /// Human-readable label shown next to the input.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "confirm-password" => Ok(Self::ConfirmPassword),
            other => Err(FormError::UnknownField {
                id: other.to_string(),
            }),
        }
    }
}
