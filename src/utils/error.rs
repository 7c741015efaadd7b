use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with status {status}")]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Client,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Status { status, .. } if status.is_server_error() => ErrorCategory::Server,
            ApiError::Status { .. } => ErrorCategory::Client,
            ApiError::Decode(_) | ApiError::Io(_) => ErrorCategory::Data,
            ApiError::InvalidUrl(_)
            | ApiError::ConfigValidationError { .. }
            | ApiError::InvalidConfigValueError { .. }
            | ApiError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client if self.is_not_found() => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Server => ErrorSeverity::Medium,
            ErrorCategory::Client | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Human-readable `detail` from a FastAPI error body.
    ///
    /// Plain `HTTPException`s carry a string; request validation failures
    /// carry a list of `{loc, msg, type}` objects, of which the first `msg`
    /// is returned.
    pub fn detail(&self) -> Option<String> {
        let ApiError::Status {
            body: Some(body), ..
        } = self
        else {
            return None;
        };

        match body.get("detail")? {
            Value::String(message) => Some(message.clone()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }

    /// Message to show inline: the server detail when present, else `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or_else(|| fallback.to_string())
    }

    pub fn user_friendly_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail;
        }
        match self {
            ApiError::Transport(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Status { status, .. } => format!("The server rejected the request ({})", status),
            ApiError::Decode(_) => "The server returned data in an unexpected shape".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API server is running and base_url is correct",
            ErrorCategory::Server => "The server failed internally; try again later",
            ErrorCategory::Client if self.is_unauthorized() => "Log in again to obtain a fresh token",
            ErrorCategory::Client => "Check the request arguments",
            ErrorCategory::Data => "Check that the client and server API versions match",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }
}
