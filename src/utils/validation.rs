//! Input validation shared by the application services.
//!
//! All checks run before anything touches storage.

use crate::error::AppError;
use serde_json::json;

/// Validates that a name is not blank.
///
/// A name consisting only of whitespace counts as blank.
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the offending `field`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_name("name", "Head First Java").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(
            format!("{field} must not be blank"),
            json!({ "field": field }),
        ));
    }

    Ok(())
}

/// Validates an optional age.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the age is negative.
pub fn validate_age(age: Option<i32>) -> Result<(), AppError> {
    match age {
        Some(value) if value < 0 => Err(AppError::bad_request(
            "age must not be negative",
            json!({ "field": "age", "provided": value }),
        )),
        _ => Ok(()),
    }
}
