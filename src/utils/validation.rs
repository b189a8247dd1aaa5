use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::error::ValidationError;
use crate::models::score::ScoreRecord;

pub const MAX_USERNAME_CHARS: usize = 255;
const HYPHENATED_UUID_LEN: usize = 36;

/// Parse a raw request body into a JSON object, or fail the submission.
pub fn parse_submission_body(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::NotAnObject),
        Err(e) => {
            tracing::debug!("Submission body is not JSON: {}", e);
            Err(ValidationError::InvalidJson)
        }
    }
}

/// Checks a submission in order, stopping at the first violation, then
/// normalises it for storage.
pub fn validate_submission(data: &Map<String, Value>) -> Result<ScoreRecord, ValidationError> {
    for field in ["user_id", "score", "username"] {
        if !data.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let user_id = match &data["user_id"] {
        Value::String(raw) => parse_user_id(raw)?,
        _ => return Err(ValidationError::UserIdNotString),
    };

    let score = match &data["score"] {
        Value::Number(number) => floor_score(number)?,
        _ => return Err(ValidationError::ScoreNotNumber),
    };

    let username = match &data["username"] {
        Value::String(raw) if raw.is_empty() => return Err(ValidationError::EmptyUsername),
        Value::String(raw) => normalize_username(raw)?,
        _ => return Err(ValidationError::UsernameNotString),
    };

    Ok(ScoreRecord {
        user_id,
        username,
        score,
    })
}

/// Only the 8-4-4-4-12 hyphenated form is accepted, in any case.
fn parse_user_id(raw: &str) -> Result<Uuid, ValidationError> {
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err(ValidationError::InvalidUserId);
    }
    Uuid::try_parse(raw).map_err(|_| ValidationError::InvalidUserId)
}

fn floor_score(number: &serde_json::Number) -> Result<u64, ValidationError> {
    if let Some(score) = number.as_u64() {
        return Ok(score);
    }
    if number.as_i64().is_some_and(|score| score < 0) {
        return Err(ValidationError::NegativeScore);
    }
    match number.as_f64() {
        Some(score) if score < 0.0 => Err(ValidationError::NegativeScore),
        // `as` saturates for values past u64::MAX
        Some(score) => Ok(score.floor() as u64),
        None => Err(ValidationError::ScoreNotNumber),
    }
}

fn normalize_username(raw: &str) -> Result<String, ValidationError> {
    let username: String = raw
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .chars()
        .take(MAX_USERNAME_CHARS)
        .collect();
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    Ok(username)
}
