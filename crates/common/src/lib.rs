pub mod logger;
pub mod models;

pub use models::{
    Action, ClientSnapshot, DateSelection, FailureKind, FailureReason, PredictionResult,
    RequestEvent, RequestState, StrategyStep,
};
