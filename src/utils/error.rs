use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Data,
    Configuration,
    Database,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::HttpError(_) => ErrorCategory::Network,
            AppError::IoError(_) => ErrorCategory::FileSystem,
            AppError::SerializationError(_)
            | AppError::ProcessingError { .. }
            | AppError::ValidationError { .. } => ErrorCategory::Data,
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AppError::DatabaseError { .. } => ErrorCategory::Database,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::ValidationError { .. } => ErrorSeverity::Low,
            AppError::HttpError(_) | AppError::DatabaseError { .. } => ErrorSeverity::Medium,
            AppError::SerializationError(_) | AppError::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            AppError::IoError(_)
            | AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the database URL, then retry",
            ErrorCategory::FileSystem => "Check that the path exists and is readable/writable",
            ErrorCategory::Data => "Check the input file is valid JSON in the expected shape",
            ErrorCategory::Configuration => {
                "Review the TOML configuration and required environment variables"
            }
            ErrorCategory::Database => "Verify the auth token and that the database is reachable",
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::HttpError(_) => "Could not reach the remote database".to_string(),
            AppError::IoError(e) => format!("File operation failed: {}", e),
            AppError::SerializationError(e) => format!("Invalid JSON data: {}", e),
            AppError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
