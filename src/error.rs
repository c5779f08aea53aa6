//! Error types for homework-bot
//!
//! One closed enum covers every failure a poll cycle can hit. Variants carry
//! structured context; the Russian operator-facing text is produced only by
//! `Display`, at the point where a diagnostic is logged or sent to the chat.

use thiserror::Error;

/// All error kinds the bot distinguishes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// Required credentials are absent; fatal before the first cycle
    #[error("Отсутствуют обязательные переменные окружения: {}", .missing.join(", "))]
    ConfigMissing { missing: Vec<&'static str> },

    /// Network-level failure talking to the review API
    #[error("URL недоступен: {reason}")]
    TransportFailure { reason: String },

    /// The review API rejected our token (HTTP 401)
    #[error("ENDPOINT недоступен: токен отклонён (HTTP {status})")]
    AuthRejected { status: u16 },

    /// Any other non-success HTTP status
    #[error("Сбой при запросе к ENDPOINT: HTTP {status}")]
    ServiceFailure { status: u16 },

    /// A 200 response whose body is not JSON
    #[error("С сервера приходит ответ не в формате json: {reason}")]
    MalformedBody { reason: String },

    /// Top-level response is not a JSON object
    #[error("Поступил неверный тип данных: ожидался объект, получен {found}")]
    InvalidResponseShape { found: String },

    #[error("Отсутствуют ожидаемые ключи в ответе API: {}", .missing.join(", "))]
    MissingExpectedKeys { missing: Vec<&'static str> },

    #[error("Неверный тип данных ключа homeworks: {found}")]
    InvalidHomeworksType { found: String },

    #[error("Неверный тип данных ключа current_date: {found}")]
    InvalidCheckpointType { found: String },

    /// Homework entry lacks `homework_name` and/or `status`
    #[error("Статус отсутствует: нет полей {}", .missing.join(", "))]
    MissingStatusFields { missing: Vec<&'static str> },

    #[error("Статус домашней работы не определен: {status}")]
    UnknownStatus { status: String },

    /// Chat delivery failed
    #[error("Сбой при отправке сообщения в Telegram: {reason}")]
    NotifyFailure { reason: String },
}

impl BotError {
    /// Whether this error must stop the process instead of the current cycle
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::ConfigMissing { .. })
    }

    /// Short stable name of the error kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::ConfigMissing { .. } => "config_missing",
            BotError::TransportFailure { .. } => "transport_failure",
            BotError::AuthRejected { .. } => "auth_rejected",
            BotError::ServiceFailure { .. } => "service_failure",
            BotError::MalformedBody { .. } => "malformed_body",
            BotError::InvalidResponseShape { .. } => "invalid_response_shape",
            BotError::MissingExpectedKeys { .. } => "missing_expected_keys",
            BotError::InvalidHomeworksType { .. } => "invalid_homeworks_type",
            BotError::InvalidCheckpointType { .. } => "invalid_checkpoint_type",
            BotError::MissingStatusFields { .. } => "missing_status_fields",
            BotError::UnknownStatus { .. } => "unknown_status",
            BotError::NotifyFailure { .. } => "notify_failure",
        }
    }
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// JSON type name used in shape diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_missing_lists_names() {
        let err = BotError::ConfigMissing {
            missing: vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"],
        };
        assert_eq!(
            err.to_string(),
            "Отсутствуют обязательные переменные окружения: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_cycle_errors_are_not_fatal() {
        assert!(!BotError::ServiceFailure { status: 500 }.is_fatal());
        assert!(!BotError::AuthRejected { status: 401 }.is_fatal());
        assert!(
            !BotError::NotifyFailure {
                reason: "timeout".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_service_failure_display() {
        let err = BotError::ServiceFailure { status: 503 };
        assert_eq!(err.to_string(), "Сбой при запросе к ENDPOINT: HTTP 503");
    }

    #[test]
    fn test_unknown_status_display() {
        let err = BotError::UnknownStatus {
            status: "graded".to_string(),
        };
        assert_eq!(err.to_string(), "Статус домашней работы не определен: graded");
        assert_eq!(err.kind(), "unknown_status");
    }

    #[test]
    fn test_missing_keys_display() {
        let err = BotError::MissingExpectedKeys {
            missing: vec!["homeworks"],
        };
        assert_eq!(err.to_string(), "Отсутствуют ожидаемые ключи в ответе API: homeworks");
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!([1, 2])), "array");
        assert_eq!(json_type_name(&json!({"a": 1})), "object");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!(true)), "boolean");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i64> {
            Ok(42)
        }

        fn returns_err() -> Result<i64> {
            Err(BotError::AuthRejected { status: 401 })
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
