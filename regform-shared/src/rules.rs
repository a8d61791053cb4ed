//! Rule predicates.
//!
//! Pure yes/no checks over a single field value. Trimming is the caller's
//! responsibility; every predicate here sees the string exactly as given.

use once_cell::sync::Lazy;
use regex::Regex;

/// Symbols accepted as the "special character" of a secure password.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Minimum length of a secure password, in UTF-16 code units.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Local part (unquoted dotted tokens or a quoted string), `@`, then either a
/// bracketed IPv4-like quad or a dotted hostname ending in a 2+ letter label.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Length of `value` in UTF-16 code units, as a browser input reports it.
///
/// Characters outside the Basic Multilingual Plane, such as most emoji,
/// count as two.
#[must_use]
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Returns `true` when `value` is not the empty string.
#[must_use]
pub fn is_required(value: &str) -> bool {
    !value.is_empty()
}

/// Returns `true` when `min <= length <= max`.
#[must_use]
pub fn is_between(length: usize, min: usize, max: usize) -> bool {
    (min..=max).contains(&length)
}

/// Returns `true` when `email` has the shape of an email address.
///
/// The check is deliberately permissive: it only looks at the overall
/// `local@domain` shape and never resolves anything.
#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns `true` when `password` has a lowercase letter, an uppercase
/// letter, a digit, a symbol from [`PASSWORD_SYMBOLS`], and at least
/// [`PASSWORD_MIN_LENGTH`] code units (see [`text_length`]).
#[must_use]
pub fn is_password_secure(password: &str) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    has_lower
        && has_upper
        && has_digit
        && has_symbol
        && text_length(password) >= PASSWORD_MIN_LENGTH
}
