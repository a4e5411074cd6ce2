//! Request body validation.
//!
//! Bodies are parsed as loose JSON first so every shape problem maps to a
//! specific 400 message instead of an extractor rejection.

use std::fmt;

use match_core::SessionFilters;
use serde_json::Value;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not JSON.
    InvalidJson,
    /// Empty value where one is required.
    Empty(&'static str),
    /// Value too long.
    TooLong { field: &'static str, max: usize },
    /// `filters` is not an object of string arrays.
    InvalidFilters,
    /// Vote body is missing a numeric `restaurantId` or boolean `vote`.
    InvalidVote,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidJson => write!(f, "Invalid JSON"),
            ValidationError::Empty(field) => write!(f, "{} is required", field),
            ValidationError::TooLong { field, max } => {
                write!(f, "{} must be {} characters or less", field, max)
            }
            ValidationError::InvalidFilters => write!(f, "Invalid filters format"),
            ValidationError::InvalidVote => {
                write!(f, "restaurantId (number) and vote (boolean) are required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum session name length.
pub const MAX_SESSION_NAME_LENGTH: usize = 255;

/// Maximum member display name length.
pub const MAX_MEMBER_NAME_LENGTH: usize = 100;

/// Parse a request body as JSON.
pub fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)
}

fn name_field(body: &Value, max: usize) -> Result<String, ValidationError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() {
        return Err(ValidationError::Empty("Name"));
    }

    if name.chars().count() > max {
        return Err(ValidationError::TooLong { field: "Name", max });
    }

    Ok(name.to_string())
}

/// Validate and trim a session name.
pub fn session_name(body: &Value) -> Result<String, ValidationError> {
    name_field(body, MAX_SESSION_NAME_LENGTH)
}

/// Validate and trim a member display name.
pub fn member_name(body: &Value) -> Result<String, ValidationError> {
    name_field(body, MAX_MEMBER_NAME_LENGTH)
}

fn string_list(value: Option<&Value>) -> Result<Option<Vec<String>>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(ValidationError::InvalidFilters)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ValidationError::InvalidFilters),
    }
}

/// Validate optional session filters.
///
/// Returns `None` when no filter actually constrains the catalog.
pub fn session_filters(body: &Value) -> Result<Option<SessionFilters>, ValidationError> {
    let filters = match body.get("filters") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(filters)) => filters,
        Some(_) => return Err(ValidationError::InvalidFilters),
    };

    let filters = SessionFilters {
        cuisines: string_list(filters.get("cuisines"))?,
        neighborhoods: string_list(filters.get("neighborhoods"))?,
    };

    Ok(filters.normalized())
}

/// Validate a vote body, returning `(restaurant_id, vote)`.
pub fn vote_request(body: &Value) -> Result<(i64, bool), ValidationError> {
    let restaurant_id = body.get("restaurantId").and_then(Value::as_i64);
    let vote = body.get("vote").and_then(Value::as_bool);

    match (restaurant_id, vote) {
        (Some(restaurant_id), Some(vote)) => Ok((restaurant_id, vote)),
        _ => Err(ValidationError::InvalidVote),
    }
}
