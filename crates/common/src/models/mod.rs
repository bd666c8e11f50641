pub mod date_selection;
pub mod prediction;
pub mod request_state;

pub use date_selection::DateSelection;
pub use prediction::{Action, PredictionResult, StrategyStep};
pub use request_state::{ClientSnapshot, FailureKind, FailureReason, RequestEvent, RequestState};
