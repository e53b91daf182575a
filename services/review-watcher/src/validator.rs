//! Response validation: picks the most recent status out of a payload
//!
//! The review API lists homeworks newest first, so the first entry is taken
//! as the latest. Nothing here reorders entries.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::source::{HomeworkStatus, StatusPayload, StatusRecord};

const HOMEWORKS: &str = "homeworks";
const HOMEWORK_NAME: &str = "homework_name";
const STATUS: &str = "status";

/// Extract the latest homework status from a payload
pub fn extract_latest(payload: &StatusPayload) -> Result<StatusRecord, ValidationError> {
    let homeworks = payload
        .as_value()
        .get(HOMEWORKS)
        .ok_or_else(|| ValidationError::MissingField(HOMEWORKS.to_string()))?
        .as_array()
        .ok_or(ValidationError::WrongType {
            field: HOMEWORKS,
            expected: "an array",
        })?;

    let latest = homeworks.first().ok_or(ValidationError::NoEntries)?;
    if homeworks.len() > 1 {
        tracing::debug!("{} entries in window, using the first", homeworks.len());
    }

    let entry = latest.as_object().ok_or(ValidationError::WrongType {
        field: HOMEWORKS,
        expected: "an array of objects",
    })?;

    let name = string_field(entry, HOMEWORK_NAME)?;
    let status: HomeworkStatus = string_field(entry, STATUS)?.parse()?;

    Ok(StatusRecord {
        name: name.to_string(),
        status,
    })
}

fn string_field<'a>(
    entry: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    entry
        .get(field)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?
        .as_str()
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a string",
        })
}
