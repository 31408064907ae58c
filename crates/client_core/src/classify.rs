use serde::Serialize;
use shared::domain::{PredictionResult, SeverityColor};

/// Accuracy strictly above this value is reported as high confidence.
pub const CONFIDENCE_HIGH_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Urgent,
    Elevated,
    Normal,
}

impl SeverityBand {
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Urgent => "urgent",
            SeverityBand::Elevated => "elevated",
            SeverityBand::Normal => "normal",
        }
    }
}

impl From<SeverityColor> for SeverityBand {
    fn from(color: SeverityColor) -> Self {
        match color {
            SeverityColor::Red => SeverityBand::Urgent,
            SeverityColor::Orange => SeverityBand::Elevated,
            SeverityColor::Green => SeverityBand::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Unknown,
}

impl ConfidenceBand {
    pub fn from_accuracy(accuracy_percent: Option<f64>) -> Self {
        match accuracy_percent {
            None => ConfidenceBand::Unknown,
            Some(value) if value > CONFIDENCE_HIGH_THRESHOLD => ConfidenceBand::High,
            Some(_) => ConfidenceBand::Moderate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Moderate => "moderate",
            ConfidenceBand::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub severity: SeverityBand,
    pub confidence: ConfidenceBand,
}

pub fn classify(result: &PredictionResult) -> Classification {
    Classification {
        severity: result.severity_color.into(),
        confidence: ConfidenceBand::from_accuracy(result.model_accuracy_percent),
    }
}
