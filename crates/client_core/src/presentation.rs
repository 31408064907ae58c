//! Picks the one view the screen shows for a lifecycle snapshot.

use serde::Serialize;
use shared::{
    domain::{PredictionResult, ScenarioInput},
    error::FailureKind,
};

use crate::{
    classify::{classify, Classification},
    orchestrator::{LifecycleSnapshot, RequestLifecycleState},
    projection::{format_quantity, ChartSeries, ProjectionBuilder, SectorProjection},
};

pub const IDLE_PLACEHOLDER: &str = "Waiting for scenario input...";
pub const LOADING_MESSAGE: &str = "Processing...";
pub const ACCURACY_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub classification: Classification,
    /// Policy recommendation text as sent by the service.
    pub headline: String,
    pub accuracy_display: String,
    pub total_damage_display: String,
    pub population_display: String,
    pub sectors: Vec<SectorProjection>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Idle { placeholder: String },
    Loading { message: String },
    Error { kind: FailureKind, message: String },
    Result(ResultView),
}

#[derive(Debug, Clone, Default)]
pub struct PresentationController {
    projections: ProjectionBuilder,
}

impl PresentationController {
    pub fn new(projections: ProjectionBuilder) -> Self {
        Self { projections }
    }

    pub fn view(&self, snapshot: &LifecycleSnapshot, scenario: &ScenarioInput) -> View {
        match &snapshot.state {
            RequestLifecycleState::Idle => View::Idle {
                placeholder: IDLE_PLACEHOLDER.to_string(),
            },
            RequestLifecycleState::Loading => View::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            RequestLifecycleState::Error(failure) => View::Error {
                kind: failure.kind,
                message: failure.message.clone(),
            },
            RequestLifecycleState::Result(result) => {
                View::Result(self.result_view(result, scenario.population_base))
            }
        }
    }

    pub fn result_view(&self, result: &PredictionResult, population_base: u64) -> ResultView {
        ResultView {
            classification: classify(result),
            headline: result.severity_label.clone(),
            accuracy_display: result
                .model_accuracy_percent
                .map(|accuracy| format!("{accuracy:.1}%"))
                .unwrap_or_else(|| ACCURACY_UNAVAILABLE.to_string()),
            total_damage_display: format!(
                "{} units",
                format_quantity(result.total_damage_units.trunc())
            ),
            population_display: format_population(population_base),
            sectors: self.projections.project(&result.sector_estimates),
            chart: self.projections.chart_series(&result.sector_estimates),
        }
    }
}

/// Millions with one decimal, e.g. `285.0 M`.
pub fn format_population(population_base: u64) -> String {
    format!("{:.1} M", population_base as f64 / 1_000_000.0)
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
