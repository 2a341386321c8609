use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatientListError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to load {what}: {message}")]
    LoadError { what: String, message: String },

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl PatientListError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PatientListError::ConfigError { .. }
                | PatientListError::ConfigValidationError { .. }
                | PatientListError::InvalidConfigValueError { .. }
                | PatientListError::MissingConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PatientListError::ApiError(_) => {
                "Check that the server is reachable and the base URL is correct"
            }
            PatientListError::UnexpectedStatus { status: 401 | 403, .. } => {
                "Check the credentials or session id"
            }
            PatientListError::UnexpectedStatus { .. } => "Check the REST path and the server logs",
            PatientListError::SerializationError(_) => {
                "The server response did not match the expected list format"
            }
            PatientListError::LoadError { .. } => "Rerun with --verbose to see the failing request",
            PatientListError::IoError(_) => "Check file permissions and paths",
            _ => "Fix the configuration and try again",
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, PatientListError>;
