use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::DateSelection;

/// Recommended trading stance for one day, as labelled by the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Bull,
    Bear,
    Idle,
    /// Any label the service sends that we do not know about, kept verbatim.
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bull => "BULL",
            Self::Bear => "BEAR",
            Self::Idle => "IDLE",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Action {
    fn from(label: &str) -> Self {
        match label {
            "BULL" => Self::Bull,
            "BEAR" => Self::Bear,
            "IDLE" => Self::Idle,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from(label.as_str()))
    }
}

/// One row of the recommended strategy. On the wire this is a `[date, action]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(DateSelection, Action)", into = "(DateSelection, Action)")]
pub struct StrategyStep {
    pub date: DateSelection,
    pub action: Action,
}

impl StrategyStep {
    pub fn new(date: impl Into<DateSelection>, action: Action) -> Self {
        Self {
            date: date.into(),
            action,
        }
    }
}

impl From<(DateSelection, Action)> for StrategyStep {
    fn from((date, action): (DateSelection, Action)) -> Self {
        Self { date, action }
    }
}

impl From<StrategyStep> for (DateSelection, Action) {
    fn from(step: StrategyStep) -> Self {
        (step.date, step.action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "high")]
    pub high_price: f64,
    #[serde(rename = "low")]
    pub low_price: f64,
    #[serde(rename = "avg")]
    pub avg_price: f64,
    pub strategy: Vec<StrategyStep>,
}
