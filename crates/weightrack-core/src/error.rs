//! Shared error type across weightrack crates.

use thiserror::Error;

/// Response status codes (stable API, HTTP numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Read or update succeeded.
    Ok,
    /// Record created.
    Created,
    /// Invalid input.
    BadRequest,
    /// Unknown identifier.
    NotFound,
    /// Unexpected failure.
    Internal,
}

impl Status {
    /// Numeric code carried in responses.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Internal => 500,
        }
    }

    /// Label used for metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "200",
            Status::Created => "201",
            Status::BadRequest => "400",
            Status::NotFound => "404",
            Status::Internal => "500",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Unified error type used by core and service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Map an error to the status reported at the operation boundary.
    pub fn status(&self) -> Status {
        match self {
            TrackerError::Validation(_) | TrackerError::UnsupportedVersion => Status::BadRequest,
            TrackerError::NotFound(_) => Status::NotFound,
            TrackerError::Internal(_) => Status::Internal,
        }
    }

    /// Message shown to callers. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            TrackerError::Validation(msg) | TrackerError::NotFound(msg) => msg.clone(),
            TrackerError::UnsupportedVersion => self.to_string(),
            TrackerError::Internal(_) => "internal server error".into(),
        }
    }
}
