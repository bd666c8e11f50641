use std::fmt;

use serde::Serialize;

use super::{DateSelection, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// The endpoint could not be reached.
    Network,
    /// The service answered with a non-success status.
    Protocol,
    /// The body was not JSON, or not the expected shape.
    Decode,
    Timeout,
    InvalidDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReason {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Loaded(PredictionResult),
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestEvent {
    Started,
    Succeeded(PredictionResult),
    Failed(FailureReason),
    Reset,
    Cancelled,
}

impl RequestState {
    /// Pure transition function. Completions only land on `Loading`, so a
    /// result arriving in any other state leaves it untouched.
    pub fn apply(self, event: RequestEvent) -> RequestState {
        match (self, event) {
            (_, RequestEvent::Started) => Self::Loading,
            (Self::Loading, RequestEvent::Succeeded(result)) => Self::Loaded(result),
            (Self::Loading, RequestEvent::Failed(reason)) => Self::Failed(reason),
            (Self::Loading, RequestEvent::Cancelled) => Self::Idle,
            (Self::Loaded(_) | Self::Failed(_), RequestEvent::Reset) => Self::Idle,
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Loaded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Everything the rendering layer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientSnapshot {
    pub date: DateSelection,
    pub state: RequestState,
}

impl ClientSnapshot {
    pub fn new(date: DateSelection) -> Self {
        Self {
            date,
            state: RequestState::Idle,
        }
    }
}
