//! Validation logic for the registration form.
//!
//! Each `validate_*` function trims its input, applies the field's rules in
//! priority order (required, then shape or range, then derived rules) and
//! reports the first failure. The error's `Display` output is the message
//! shown to the user.

use thiserror::Error;

use crate::rules::{is_between, is_email_valid, is_password_secure, is_required, text_length};

/// Tunable bounds used by the field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Shortest accepted username, in UTF-16 code units.
    pub username_min: usize,
    /// Longest accepted username, in UTF-16 code units.
    pub username_max: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            username_min: 3,
            username_max: 25,
        }
    }
}

/// Validation errors that can occur during form validation.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("Username cannot be blank.")]
    UsernameRequired,
    #[error("Username must be between {min} and {max} characters long.")]
    UsernameLength { min: usize, max: usize },
    #[error("Email cannot be blank.")]
    EmailRequired,
    #[error("Email format is invalid. Should include \"@\"")]
    InvalidEmail,
    #[error("Password cannot be blank.")]
    PasswordRequired,
    #[error(
        "Password must be at least 8 characters that include at least 1 lowercase character, 1 uppercase characters, 1 number, and 1 special character in (!@#$%^&*)"
    )]
    PasswordNotSecure,
    #[error("Please reenter your password.")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match!")]
    PasswordsDoNotMatch,
}

/// Validates a username.
///
/// # Errors
/// [`ValidationError::UsernameRequired`] when blank,
/// [`ValidationError::UsernameLength`] when the trimmed length is outside
/// the configured bounds.
pub fn validate_username(username: &str, rules: &ValidationRules) -> Result<(), ValidationError> {
    let username = username.trim();
    if !is_required(username) {
        return Err(ValidationError::UsernameRequired);
    }

    if !is_between(text_length(username), rules.username_min, rules.username_max) {
        return Err(ValidationError::UsernameLength {
            min: rules.username_min,
            max: rules.username_max,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// # Errors
/// [`ValidationError::EmailRequired`] when blank,
/// [`ValidationError::InvalidEmail`] when it does not look like an address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if !is_required(email) {
        return Err(ValidationError::EmailRequired);
    }

    if !is_email_valid(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validates a password.
///
/// # Errors
/// [`ValidationError::PasswordRequired`] when blank,
/// [`ValidationError::PasswordNotSecure`] when a strength rule fails.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let password = password.trim();
    if !is_required(password) {
        return Err(ValidationError::PasswordRequired);
    }

    if !is_password_secure(password) {
        return Err(ValidationError::PasswordNotSecure);
    }

    Ok(())
}

/// Validates that the password confirmation matches the password.
///
/// Both values are trimmed before comparing; the comparison itself is exact
/// and case sensitive.
///
/// # Errors
/// [`ValidationError::ConfirmPasswordRequired`] when blank,
/// [`ValidationError::PasswordsDoNotMatch`] when the values differ.
pub fn validate_confirm_password(
    confirm_password: &str,
    password: &str,
) -> Result<(), ValidationError> {
    let confirm_password = confirm_password.trim();
    if !is_required(confirm_password) {
        return Err(ValidationError::ConfirmPasswordRequired);
    }

    if confirm_password != password.trim() {
        return Err(ValidationError::PasswordsDoNotMatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ValidationRules = ValidationRules {
        username_min: 3,
        username_max: 25,
    };

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("validUser", &RULES).is_ok());
        assert!(validate_username("abc", &RULES).is_ok()); // Exactly 3 characters
        assert!(validate_username(&"a".repeat(25), &RULES).is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert_eq!(
            validate_username("", &RULES),
            Err(ValidationError::UsernameRequired)
        );
        assert_eq!(
            validate_username("   ", &RULES),
            Err(ValidationError::UsernameRequired)
        );
        assert_eq!(
            validate_username("ab", &RULES),
            Err(ValidationError::UsernameLength { min: 3, max: 25 })
        );
        assert_eq!(
            validate_username(&"a".repeat(26), &RULES),
            Err(ValidationError::UsernameLength { min: 3, max: 25 })
        );
        // Trimmed length is what counts.
        assert!(validate_username("  ab  ", &RULES).is_err());
    }

    #[test]
    fn test_username_length_counts_utf16_units() {
        assert!(validate_username("a😀", &RULES).is_ok());
        assert_eq!(
            validate_username("😀", &RULES),
            Err(ValidationError::UsernameLength { min: 3, max: 25 })
        );
        assert!(validate_username(&"😀".repeat(12), &RULES).is_ok());
        assert!(validate_username(&"😀".repeat(13), &RULES).is_err());
    }

    #[test]
    fn test_username_messages() {
        assert_eq!(
            ValidationError::UsernameRequired.to_string(),
            "Username cannot be blank."
        );
        assert_eq!(
            validate_username("ab", &RULES).unwrap_err().to_string(),
            "Username must be between 3 and 25 characters long."
        );
    }

    #[test]
    fn test_username_bounds_follow_rules() {
        let rules = ValidationRules {
            username_min: 5,
            username_max: 6,
        };
        assert!(validate_username("abcd", &rules).is_err());
        assert!(validate_username("abcde", &rules).is_ok());
        assert_eq!(
            validate_username("abcdefg", &rules).unwrap_err().to_string(),
            "Username must be between 5 and 6 characters long."
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  user@example.com  ").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
        assert_eq!(
            validate_email("no-at-sign.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Email format is invalid. Should include \"@\""
        );
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Abcdef1!").is_ok());
        assert_eq!(validate_password("  "), Err(ValidationError::PasswordRequired));
        assert_eq!(
            validate_password("abcdefgh"),
            Err(ValidationError::PasswordNotSecure)
        );
        assert!(
            ValidationError::PasswordNotSecure
                .to_string()
                .starts_with("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_validate_password_with_emoji() {
        assert!(validate_password("Ab1!😀😀").is_ok());
    }

    #[test]
    fn test_validate_confirm_password() {
        assert!(validate_confirm_password("Secret1!", "Secret1!").is_ok());
        assert_eq!(
            validate_confirm_password("secret1!", "Secret1!"),
            Err(ValidationError::PasswordsDoNotMatch)
        );
        assert_eq!(
            validate_confirm_password("", "Secret1!"),
            Err(ValidationError::ConfirmPasswordRequired)
        );
        assert_eq!(
            ValidationError::ConfirmPasswordRequired.to_string(),
            "Please reenter your password."
        );
        assert_eq!(
            ValidationError::PasswordsDoNotMatch.to_string(),
            "Passwords do not match!"
        );
    }

    #[test]
    fn test_confirm_password_compares_trimmed_values() {
        assert!(validate_confirm_password(" Secret1! ", "Secret1!  ").is_ok());
    }

    #[test]
    fn test_confirm_password_does_not_check_strength() {
        // A weak password that matches is still a match; strength is the
        // password field's concern.
        assert!(validate_confirm_password("weak", "weak").is_ok());
    }
}
