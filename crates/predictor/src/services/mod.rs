pub mod prediction_client;

pub use prediction_client::PredictionClient;
