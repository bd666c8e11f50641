use std::time::Duration;

use async_trait::async_trait;
use common::{DateSelection, PredictionResult};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::{
    config::PredictorConfig,
    error::PredictionError,
    remote::prediction_response::{PredictionResponse, error_message},
    traits::{PredictionSource, RemoteResponse},
};

/// Talks to the prediction service over HTTP: one `GET /predict?date=...` per call.
#[derive(Debug, Clone)]
pub struct HttpPredictionSource {
    client: Client,
    predict_url: Url,
    timeout: Duration,
}

impl HttpPredictionSource {
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(PredictionError::Network)?;

        Ok(Self::with_client(client, config))
    }

    /// Uses a caller-built client; the request timeout is whatever that client enforces.
    pub fn with_client(client: Client, config: &PredictorConfig) -> Self {
        Self {
            client,
            predict_url: config.predict_url(),
            timeout: config.timeout,
        }
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionSource for HttpPredictionSource {
    async fn fetch(&self, date: &DateSelection) -> Result<PredictionResult, PredictionError> {
        date.parse()?;

        debug!("GET {}?date={}", self.predict_url, date);

        let response = self
            .client
            .get(self.predict_url.clone())
            .query(&[("date", date.as_str())])
            .send()
            .await
            .map_err(|e| PredictionError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| PredictionError::from_transport(e, self.timeout))?;
            let message = error_message(&body);
            warn!("Prediction service answered {} for {}: {}", status, date, message);
            return Err(PredictionError::Protocol { status, message });
        }

        let payload = response
            .json::<PredictionResponse>()
            .await
            .map_err(|e| PredictionError::from_transport(e, self.timeout))?;
        payload.to_domain()
    }
}
