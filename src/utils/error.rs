use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please sign in first")]
    NotAuthenticated,

    #[error("Malformed persisted state under '{key}': {reason}")]
    MalformedPersistedState { key: String, reason: String },

    #[error("Invalid reorder: {message}")]
    InvalidReorder { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortalError {
    pub fn validation(field: &str, message: &str) -> Self {
        PortalError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::Validation { .. } | PortalError::InvalidReorder { .. } => {
                ErrorCategory::Validation
            }
            PortalError::DuplicateEmail
            | PortalError::InvalidCredentials
            | PortalError::NotAuthenticated => ErrorCategory::Authentication,
            PortalError::MalformedPersistedState { .. }
            | PortalError::StorageError { .. }
            | PortalError::IoError(_)
            | PortalError::SerializationError(_) => ErrorCategory::Storage,
            PortalError::ConfigError { .. } | PortalError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 壞掉的持久化資料會被重設，不影響流程
            PortalError::MalformedPersistedState { .. } => ErrorSeverity::Low,
            PortalError::Validation { .. }
            | PortalError::InvalidReorder { .. }
            | PortalError::DuplicateEmail
            | PortalError::InvalidCredentials => ErrorSeverity::Medium,
            PortalError::NotAuthenticated
            | PortalError::ConfigError { .. }
            | PortalError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            PortalError::StorageError { .. }
            | PortalError::IoError(_)
            | PortalError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PortalError::Validation { message, .. } => message.clone(),
            PortalError::DuplicateEmail
            | PortalError::InvalidCredentials
            | PortalError::NotAuthenticated => self.to_string(),
            PortalError::MalformedPersistedState { .. } => {
                "Saved data was unreadable and has been reset".to_string()
            }
            PortalError::InvalidReorder { .. } => {
                "The new service order does not match the current list".to_string()
            }
            PortalError::StorageError { .. }
            | PortalError::IoError(_)
            | PortalError::SerializationError(_) => {
                "Could not read or write local portal data".to_string()
            }
            PortalError::ConfigError { .. } | PortalError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortalError::Validation { .. } => "Correct the highlighted field and submit again",
            PortalError::DuplicateEmail => "Sign in with that email or register a different one",
            PortalError::InvalidCredentials => "Check the email and password and try again",
            PortalError::NotAuthenticated => {
                "Run `dealer-portal login --email <email> --password <password>`"
            }
            PortalError::MalformedPersistedState { .. } => "No action needed",
            PortalError::InvalidReorder { .. } => "Reload the services list and drag again",
            PortalError::StorageError { .. }
            | PortalError::IoError(_)
            | PortalError::SerializationError(_) => {
                "Check that the data directory exists and is writable"
            }
            PortalError::ConfigError { .. } | PortalError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
        }
    }
}
