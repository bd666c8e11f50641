pub mod http_source;
pub mod prediction_response;

pub use http_source::HttpPredictionSource;
pub use prediction_response::{ErrorResponse, PredictionResponse};
