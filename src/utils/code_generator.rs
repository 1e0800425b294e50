//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided codes.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Accepted shape of every short code, generated or custom.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,20}$").expect("short code regex is valid"));

/// Codes that collide with fixed route segments.
///
/// A link with one of these codes could never be reached through `GET /{code}`.
pub const RESERVED_CODES: &[&str] = &["health", "stats", "shorturls"];

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code from `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 12);
/// assert!(is_valid_code_format(&code));
/// ```
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `code` matches `^[A-Za-z0-9_-]{4,20}$`.
pub fn is_valid_code_format(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// Custom codes are taken case-as-given; no normalization is applied.
///
/// # Rules
///
/// - Length: 4-20 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] if the shape is wrong.
/// Returns [`AppError::CodeConflict`] if the code is reserved.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code_format(code) {
        return Err(AppError::invalid_code_format(
            "Shortcode must be 4 to 20 characters: letters, digits, '-' or '_'",
            json!({ "code": code, "provided_length": code.chars().count() }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::conflict(
            "Shortcode already in use",
            json!({ "code": code, "reason": "reserved" }),
        ));
    }

    Ok(())
}
