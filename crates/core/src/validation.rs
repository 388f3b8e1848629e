//! Input validation rules for API payloads.
//!
//! Each function returns `Ok(())` or a [`CoreError`] the API layer maps
//! to a 400 response.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum password length accepted at registration.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Minimum number of distinct characters a password must contain.
const MIN_DISTINCT_PASSWORD_CHARS: usize = 4;

/// Comments rate their target from 1 to 5 stars.
const COMMENT_RATING_RANGE: std::ops::RangeInclusive<i16> = 1..=5;

/// Destination and attraction aggregate ratings live in `0.0..=5.0`.
const PLACE_RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A comment must reference exactly one of a destination or an attraction.
pub fn validate_comment_target(
    destination_id: Option<DbId>,
    attraction_id: Option<DbId>,
) -> Result<(), CoreError> {
    match (destination_id, attraction_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(CoreError::Validation(
            "A comment must reference exactly one of destination_id or attraction_id".into(),
        )),
    }
}

pub fn validate_comment_rating(rating: i16) -> Result<(), CoreError> {
    if COMMENT_RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Comment rating must be between 1 and 5, got {rating}"
        )))
    }
}

/// Validate an aggregate rating on a destination or attraction.
pub fn validate_place_rating(rating: f64) -> Result<(), CoreError> {
    if PLACE_RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between 0.0 and 5.0, got {rating}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Itineraries
// ---------------------------------------------------------------------------

/// An itinerary item points at an attraction or names a custom location.
pub fn validate_itinerary_item_target(
    attraction_id: Option<DbId>,
    custom_location: Option<&str>,
) -> Result<(), CoreError> {
    let has_custom = custom_location.is_some_and(|s| !s.trim().is_empty());
    if attraction_id.is_some() || has_custom {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "An itinerary item needs an attraction_id or a custom_location".into(),
        ))
    }
}

/// An itinerary may not end before it starts.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end >= start {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "end_date {end} is before start_date {start}"
        )))
    }
}

pub fn validate_day_number(day_number: i32) -> Result<(), CoreError> {
    if day_number >= 1 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "day_number must be at least 1, got {day_number}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Check a password against the registration rules.
///
/// Returns every violated rule rather than stopping at the first, so the
/// caller can show them together.
pub fn password_violations(
    password: &str,
    min_length: usize,
    username: &str,
    email: &str,
) -> Vec<String> {
    let mut messages = Vec::new();

    if password.chars().count() < min_length {
        messages.push(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        messages.push("Password must not be entirely numeric".to_string());
    }

    let mut distinct: Vec<char> = password.chars().collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < MIN_DISTINCT_PASSWORD_CHARS {
        messages.push("Password is too simple".to_string());
    }

    let lowered = password.to_lowercase();
    let similar = [username, email]
        .iter()
        .any(|attr| !attr.is_empty() && lowered.contains(&attr.to_lowercase()));
    if similar {
        messages.push("Password must not contain the username or email".to_string());
    }

    messages
}

/// Validate a registration payload.
///
/// Missing fields short-circuit with a single message; password rules
/// are reported per field.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    min_length: usize,
) -> Result<(), CoreError> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(CoreError::Validation(
            "username, password and email are required".into(),
        ));
    }

    let mut fields = Vec::new();
    if !email.contains('@') {
        fields.push(("email".to_string(), vec!["Enter a valid email address".to_string()]));
    }
    let password_messages = password_violations(password, min_length, username, email);
    if !password_messages.is_empty() {
        fields.push(("password".to_string(), password_messages));
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(CoreError::FieldErrors(fields))
    }
}
