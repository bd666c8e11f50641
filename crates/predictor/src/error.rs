use std::error::Error as _;
use std::time::Duration;

use common::models::date_selection::InvalidDateError;
use common::{FailureKind, FailureReason};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Network Error: could not reach prediction service: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Timeout: prediction service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("Protocol Error (HTTP {status}): {message}")]
    Protocol { status: StatusCode, message: String },
    #[error("Decode Error: {0}")]
    Decode(String),
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
}

impl PredictionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::Network,
            Self::Timeout(_) => FailureKind::Timeout,
            Self::Protocol { .. } => FailureKind::Protocol,
            Self::Decode(_) => FailureKind::Decode,
            Self::InvalidDate(_) => FailureKind::InvalidDate,
        }
    }

    /// Sorts a transport error from reqwest into the taxonomy above.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            // reqwest wraps the serde_json error; keep its detail
            match err.source() {
                Some(cause) => Self::Decode(format!("{err}: {cause}")),
                None => Self::Decode(err.to_string()),
            }
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for PredictionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<&PredictionError> for FailureReason {
    fn from(err: &PredictionError) -> Self {
        FailureReason::new(err.kind(), err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PREDICTION_API_URL `{value}` is not a valid URL: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("PREDICTION_TIMEOUT_SECS `{0}` must be a positive whole number of seconds")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_keeps_kind_and_message() {
        let err = PredictionError::Protocol {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid date format. Use YYYY-MM-DD".to_string(),
        };
        let reason = FailureReason::from(&err);

        assert_eq!(reason.kind, FailureKind::Protocol);
        assert_eq!(
            reason.message,
            "Protocol Error (HTTP 400 Bad Request): Invalid date format. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_json_errors_are_decode_failures() {
        let err: PredictionError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FailureKind::Decode);
    }
}
