//! Error types for meeting repository operations.

use std::fmt;
use thiserror::Error;

/// The category of a repository error.
///
/// Callers use the code to decide whether a failed fetch or create is worth
/// retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorCode {
    /// The session is missing or expired.
    Unauthorized,
    /// The user may not read or write this group's meetings.
    Forbidden,
    /// Connection failed, timed out or could not resolve.
    NetworkError,
    /// Too many requests.
    RateLimited,
    /// The backend returned a 5xx status.
    ServerError,
    /// The response body is not a valid meeting list.
    InvalidResponse,
    /// The group or meeting does not exist.
    NotFound,
    /// The backend rejected the payload.
    BadRequest,
    /// Unexpected state inside the repository.
    InternalError,
}

impl RepositoryErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for RepositoryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised by a meeting repository.
#[derive(Debug, Error)]
pub struct RepositoryError {
    code: RepositoryErrorCode,
    message: String,
    /// The repository that raised the error (e.g. "memory", "http").
    repository: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RepositoryError {
    /// Creates an error with the given code and message.
    pub fn new(code: RepositoryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            repository: None,
            source: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::Unauthorized, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::NetworkError, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::InvalidResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::InternalError, message)
    }

    /// Sets the repository name.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> RepositoryErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref repository) = self.repository {
            write!(f, "[{}] ", repository)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response(format!("malformed meeting payload: {err}")).with_source(err)
    }
}

/// A specialized Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
