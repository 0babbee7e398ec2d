//! Syntactic validation for schedule requests.
//!
//! These checks run before any registry or store round-trip so malformed
//! input fails fast without external calls.

use cron::Schedule;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};

/// Validates a standard 5-field cron expression
/// (minute hour day-of-month month day-of-week).
///
/// The `cron` crate parses the 6-field grammar with a leading seconds field,
/// so a literal `0` seconds field is prepended before parsing. Expressions
/// that are not exactly 5 fields are rejected outright.
pub fn validate_cron_expression(expression: &str) -> AppResult<()> {
    let invalid = || AppError::InvalidCronExpression {
        expression: expression.to_string(),
    };

    if expression.split_whitespace().count() != 5 {
        return Err(invalid());
    }

    format!("0 {}", expression.trim())
        .parse::<Schedule>()
        .map(|_| ())
        .map_err(|_| invalid())
}

/// Validates a comma-separated notification email list.
///
/// An empty or blank string means "no notifications" and passes. A non-empty
/// list must consist solely of syntactically valid addresses.
pub fn validate_notification_emails(raw: &str) -> AppResult<()> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    for address in raw.split(',') {
        let address = address.trim();
        if !address.validate_email() {
            return Err(AppError::InvalidEmail {
                address: address.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a comma-separated tag list: at least one non-empty tag.
pub fn validate_tags(raw: &str) -> AppResult<()> {
    if raw.split(',').any(|tag| !tag.trim().is_empty()) {
        Ok(())
    } else {
        Err(AppError::InvalidTag)
    }
}
