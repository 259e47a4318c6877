use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoulStartError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SoulStartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SoulStartError::IoError(_) | SoulStartError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            SoulStartError::ValidationError { .. } => ErrorCategory::Input,
            SoulStartError::ConfigError { .. }
            | SoulStartError::ConfigValidationError { .. }
            | SoulStartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SoulStartError::IoError(e) => format!("Could not read or write a file: {}", e),
            SoulStartError::SerializationError(e) => format!("Could not encode output: {}", e),
            SoulStartError::ConfigError { message } => format!("Configuration problem: {}", message),
            SoulStartError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SoulStartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SoulStartError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SoulStartError::IoError(_) => "Check that the devotions directory exists and is readable",
            SoulStartError::SerializationError(_) => "Try --format text",
            SoulStartError::ConfigError { .. } | SoulStartError::ConfigValidationError { .. } => {
                "Make sure the config file exists and is valid TOML"
            }
            SoulStartError::InvalidConfigValueError { .. } => {
                "Fix the value in the config file or on the command line"
            }
            SoulStartError::ValidationError { .. } => {
                "Use a date like 2025-12-25 and a mode of morning, night, both or verses"
            }
        }
    }

    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SoulStartError>;
