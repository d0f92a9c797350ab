//! Field validation shared by request payloads.

use crate::error::app_error::{AppError, AppResult};

/// Rejects empty or whitespace-only values.
pub fn required(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{} is required", field)));
    }
    Ok(())
}

/// Rejects values longer than `max` characters (Unicode scalar values).
pub fn max_chars(field: &'static str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
