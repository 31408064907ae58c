use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-visible failure categories. Never merged into one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ConnectionFailure,
    ProcessingFailure,
    Timeout,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::ConnectionFailure => "Could not connect to the prediction service.",
            FailureKind::ProcessingFailure => {
                "The prediction service could not process this scenario."
            }
            FailureKind::Timeout => "The prediction service did not respond in time.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Diagnostic text for logs; not meant for display.
    #[serde(default, skip_serializing)]
    pub detail: String,
}

impl RequestFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
            detail: detail.into(),
        }
    }

    pub fn connection(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ConnectionFailure, detail)
    }

    pub fn processing(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ProcessingFailure, detail)
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, detail)
    }
}
