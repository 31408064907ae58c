//! Error types for the client pipeline. User-facing failures are
//! [`shared::error::RequestFailure`]; everything here is diagnostic.

use shared::error::{FailureKind, RequestFailure};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("unknown scenario field '{0}'")]
    UnknownField(String),
    #[error("field '{0}' is fixed for the session")]
    ReadOnlyField(&'static str),
    #[error(transparent)]
    UnknownDisasterType(#[from] shared::domain::UnknownDisasterType),
    #[error("'{value}' is not a non-negative whole number for {field}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not reach prediction service at {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },
    #[error("prediction service at {endpoint} timed out")]
    TimedOut { endpoint: String },
    #[error("prediction service returned an unreadable body (http {status}): {reason}")]
    MalformedBody { status: u16, reason: String },
}

impl TransportError {
    /// A body that arrived but could not be read counts as a processing
    /// failure: the service did answer.
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Unreachable { .. } => FailureKind::ConnectionFailure,
            TransportError::TimedOut { .. } => FailureKind::Timeout,
            TransportError::MalformedBody { .. } => FailureKind::ProcessingFailure,
        }
    }
}

impl From<TransportError> for RequestFailure {
    fn from(err: TransportError) -> Self {
        RequestFailure::new(err.kind(), err.to_string())
    }
}

impl From<ResponseError> for RequestFailure {
    fn from(err: ResponseError) -> Self {
        RequestFailure::processing(err.to_string())
    }
}

impl From<InputRejected> for RequestFailure {
    fn from(err: InputRejected) -> Self {
        RequestFailure::processing(err.to_string())
    }
}

/// Reasons a received response is not accepted as a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseError {
    #[error("service reported status {status:?}: {detail}")]
    NotSuccessful {
        status: Option<String>,
        detail: String,
    },
    #[error("response is missing required field {0}")]
    MissingField(&'static str),
    #[error("response contains no sector estimates")]
    EmptySectorEstimates,
    #[error("sector '{name}' has invalid estimate {value}")]
    InvalidEstimate { name: String, value: f64 },
    #[error("total damage {0} is not a non-negative number")]
    InvalidTotal(f64),
    #[error("model accuracy {0} is outside 0..=100")]
    AccuracyOutOfRange(f64),
}

/// Local rejection under strict input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("event count {count} exceeds the configured maximum of {max}")]
    EventCountTooLarge { count: u64, max: u64 },
    #[error("population base must be positive")]
    EmptyPopulation,
}
