//! Response validation
//!
//! Turns the raw JSON body of a poll response into a typed `PollResult`, or
//! reports exactly which part of the shape is wrong.

use serde_json::Value;

use crate::error::{BotError, Result, json_type_name};
use crate::homework::{HomeworkEntry, PollResult};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Validate a raw API response.
///
/// An empty `homeworks` array is a valid response; deciding what "nothing new"
/// means is left to the caller.
pub fn validate(raw: &Value) -> Result<PollResult> {
    let object = raw.as_object().ok_or_else(|| BotError::InvalidResponseShape {
        found: json_type_name(raw).to_string(),
    })?;

    let missing: Vec<&'static str> = [HOMEWORKS_KEY, CURRENT_DATE_KEY]
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(BotError::MissingExpectedKeys { missing });
    }

    let items = match &object[HOMEWORKS_KEY] {
        Value::Array(items) => items,
        other => {
            return Err(BotError::InvalidHomeworksType {
                found: json_type_name(other).to_string(),
            });
        }
    };

    let checkpoint = match &object[CURRENT_DATE_KEY] {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
    .ok_or_else(|| BotError::InvalidCheckpointType {
        found: describe_checkpoint(&object[CURRENT_DATE_KEY]),
    })?;

    // Only the first element is the reported submission; later non-objects are dropped
    let homeworks = match items.split_first() {
        Some((first, rest)) => std::iter::once(parse_entry(first)?)
            .chain(rest.iter().filter_map(|item| parse_entry(item).ok()))
            .collect(),
        None => Vec::new(),
    };

    Ok(PollResult { homeworks, checkpoint })
}

fn parse_entry(item: &Value) -> Result<HomeworkEntry> {
    if !item.is_object() {
        return Err(BotError::InvalidHomeworksType {
            found: format!("array of {}", json_type_name(item)),
        });
    }

    // Non-string name/status values count as missing rather than being coerced
    let field = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);
    Ok(HomeworkEntry {
        homework_name: field("homework_name"),
        status: field("status"),
    })
}

fn describe_checkpoint(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("number {}", n),
        other => json_type_name(other).to_string(),
    }
}
