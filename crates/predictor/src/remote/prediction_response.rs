use common::{PredictionResult, StrategyStep};
use serde::Deserialize;

use crate::{error::PredictionError, traits::RemoteResponse};

/// Body of a successful `GET /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub high: f64,
    pub low: f64,
    pub avg: f64,
    pub strategy: Vec<StrategyStep>,
}

/// Body the service sends alongside 400/500 responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl RemoteResponse<PredictionResult> for PredictionResponse {
    fn to_domain(self) -> Result<PredictionResult, PredictionError> {
        for (field, value) in [("high", self.high), ("low", self.low), ("avg", self.avg)] {
            if !value.is_finite() {
                return Err(PredictionError::Decode(format!(
                    "field `{field}` is not a finite number: {value}"
                )));
            }
        }

        for (index, step) in self.strategy.iter().enumerate() {
            step.date.parse().map_err(|e| {
                PredictionError::Decode(format!("strategy entry {index}: {e}"))
            })?;
        }

        Ok(PredictionResult {
            high_price: self.high,
            low_price: self.low,
            avg_price: self.avg,
            strategy: self.strategy,
        })
    }
}

/// Best effort: pulls the service's `{"error": ...}` message out of a failed
/// response, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
