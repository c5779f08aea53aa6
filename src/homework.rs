//! Homework records as returned by the review API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// API code of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A homework element exactly as received. Both fields are optional here so
/// that absence is reported as `MissingStatusFields` rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkEntry {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl HomeworkEntry {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(name.into()),
            status: Some(status.into()),
        }
    }
}

/// A fully typed homework record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

impl TryFrom<&HomeworkEntry> for HomeworkRecord {
    type Error = BotError;

    fn try_from(entry: &HomeworkEntry) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        if entry.homework_name.is_none() {
            missing.push("homework_name");
        }
        if entry.status.is_none() {
            missing.push("status");
        }

        match (&entry.homework_name, &entry.status) {
            (Some(name), Some(status)) => Ok(Self {
                name: name.clone(),
                status: status.parse()?,
            }),
            _ => Err(BotError::MissingStatusFields { missing }),
        }
    }
}

/// Validated poll response: homeworks newest first plus the server checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub homeworks: Vec<HomeworkEntry>,
    pub checkpoint: i64,
}

impl PollResult {
    /// The submission to report on (first element; the API orders by recency)
    pub fn latest(&self) -> Option<&HomeworkEntry> {
        self.homeworks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }
}
