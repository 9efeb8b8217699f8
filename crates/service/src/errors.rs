use thiserror::Error;

/// Failures a storage backend may report.
///
/// The in-memory store only ever produces `NotFound`, `Canceled` and
/// `DeadlineExceeded`; `Backend` covers every other fault an implementation
/// might run into and is never shown to callers of the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("operation canceled")]
    Canceled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Closed set of error kinds surfaced by the item service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("empty name")]
    EmptyName,
    #[error("invalid value")]
    InvalidValue,
    #[error("not found")]
    NotFound,
    #[error("internal error")]
    Internal,
    #[error("operation canceled")]
    Canceled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::EmptyName => 1001,
            ServiceError::InvalidValue => 1002,
            ServiceError::NotFound => 1003,
            ServiceError::Internal => 1100,
            ServiceError::Canceled => 1201,
            ServiceError::DeadlineExceeded => 1202,
        }
    }

    /// Short snake_case name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::EmptyName => "empty_name",
            ServiceError::InvalidValue => "invalid_value",
            ServiceError::NotFound => "not_found",
            ServiceError::Internal => "internal",
            ServiceError::Canceled => "canceled",
            ServiceError::DeadlineExceeded => "deadline_exceeded",
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::EmptyName | ServiceError::InvalidValue)
    }
}
