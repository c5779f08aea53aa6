//! Chat message templates

use crate::error::{BotError, Result};
use crate::homework::{HomeworkEntry, HomeworkRecord};

/// Prefix of every diagnostic sent on the error path
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Render the status-change message for a homework entry.
///
/// The template is consumed verbatim downstream: no space after the period.
pub fn format_status(entry: &HomeworkEntry) -> Result<String> {
    let record = HomeworkRecord::try_from(entry)?;
    Ok(status_message(&record))
}

pub fn status_message(record: &HomeworkRecord) -> String {
    format!(
        "Изменился статус проверки работы \"{}\".{}",
        record.name,
        record.status.verdict()
    )
}

/// Render the diagnostic for a failed cycle
pub fn failure_message(err: &BotError) -> String {
    format!("{}{}", FAILURE_PREFIX, err)
}
