use async_trait::async_trait;
use common::{DateSelection, PredictionResult};

#[cfg(test)]
use mockall::automock;

use crate::error::PredictionError;

/// Turns a raw wire payload into the domain type, rejecting anything that
/// does not have the expected shape.
pub trait RemoteResponse<T> {
    fn to_domain(self) -> Result<T, PredictionError>;
}

/// Where predictions come from. [`crate::remote::HttpPredictionSource`] in
/// production, mocks and fakes in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PredictionSource: Send + Sync {
    async fn fetch(&self, date: &DateSelection) -> Result<PredictionResult, PredictionError>;
}
