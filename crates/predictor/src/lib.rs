pub mod config;
pub mod error;
pub mod remote;
pub mod services;
pub mod traits;

pub use config::PredictorConfig;
pub use error::{ConfigError, PredictionError};
pub use remote::HttpPredictionSource;
pub use services::PredictionClient;
pub use traits::PredictionSource;
