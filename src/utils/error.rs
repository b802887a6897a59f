use crate::domain::unit::Unit;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeStreamError {
    #[error("Missing required value: {field}")]
    MissingRequiredValue { field: String },

    #[error("Invalid step magnitude for '{field}': {value}")]
    InvalidStepMagnitude { field: String, value: String },

    #[error("Boundary '{field}' out of range: start advanced by {amount} {unit} cannot be represented")]
    BoundaryOutOfRange {
        field: String,
        amount: i64,
        unit: Unit,
    },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 錯誤分類，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 範圍設定本身不合法 (缺值、零步長、邊界溢位)
    Range,
    /// 配置檔或命令列參數有誤
    Configuration,
    /// 檔案讀寫或輸出失敗
    System,
}

impl TimeStreamError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequiredValue {
            field: field.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredValue { .. }
            | Self::InvalidStepMagnitude { .. }
            | Self::BoundaryOutOfRange { .. } => ErrorCategory::Range,
            Self::InvalidConfigValue { .. } | Self::ConfigParse { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Range => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingRequiredValue { field } => {
                format!("Provide a value for '{}' and try again", field)
            }
            Self::InvalidStepMagnitude { field, .. } => format!(
                "Use a non-zero step for '{}' that the start instant can be advanced by",
                field
            ),
            Self::BoundaryOutOfRange { field, .. } => format!(
                "Use a smaller offset or a coarser unit for '{}'",
                field
            ),
            Self::InvalidConfigValue { field, .. } => {
                format!("Check the value of '{}'", field)
            }
            Self::ConfigParse { .. } => {
                "Make sure the configuration file is valid TOML".to_string()
            }
            Self::Io(_) => "Check that the file exists and is readable".to_string(),
            Self::Serialization(_) => "Retry without --json".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Range => format!("Invalid range: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeStreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_exit_codes() {
        let missing = TimeStreamError::missing("from");
        assert_eq!(missing.category(), ErrorCategory::Range);
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(missing.to_string(), "Missing required value: from");

        let parse = TimeStreamError::ConfigParse {
            message: "bad".to_string(),
        };
        assert_eq!(parse.category(), ErrorCategory::Configuration);
        assert_eq!(parse.exit_code(), 1);

        let io = TimeStreamError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.category(), ErrorCategory::System);
    }

    #[test]
    fn test_boundary_message_mentions_unit() {
        let err = TimeStreamError::BoundaryOutOfRange {
            field: "to".to_string(),
            amount: 3,
            unit: Unit::Seconds,
        };
        assert!(err.to_string().contains("3 seconds"));
        assert!(err.user_friendly_message().starts_with("Invalid range"));
        assert!(err.recovery_suggestion().contains("'to'"));
    }
}
