use chrono::Utc;
use shared::{
    domain::{SectorEstimate, SeverityColor},
    error::RequestFailure,
};

use super::*;
use crate::classify::{ConfidenceBand, SeverityBand};

fn snapshot(state: RequestLifecycleState) -> LifecycleSnapshot {
    LifecycleSnapshot {
        seq: 3,
        state,
        updated_at: Utc::now(),
    }
}

fn sample_result(accuracy: Option<f64>) -> PredictionResult {
    PredictionResult {
        sector_estimates: vec![
            SectorEstimate {
                name: "Housing".into(),
                value: 120.0,
                unit: None,
            },
            SectorEstimate {
                name: "Agricultural Land".into(),
                value: 40.0,
                unit: None,
            },
        ],
        total_damage_units: 12_345.6,
        model_accuracy_percent: accuracy,
        severity_color: SeverityColor::Red,
        severity_label: "NATIONAL EMERGENCY RESPONSE".into(),
    }
}

#[test]
fn each_lifecycle_state_maps_to_exactly_one_view() {
    let controller = PresentationController::default();
    let scenario = ScenarioInput::default();

    assert_eq!(
        controller.view(&snapshot(RequestLifecycleState::Idle), &scenario),
        View::Idle {
            placeholder: IDLE_PLACEHOLDER.into()
        }
    );
    assert_eq!(
        controller.view(&snapshot(RequestLifecycleState::Loading), &scenario),
        View::Loading {
            message: LOADING_MESSAGE.into()
        }
    );
    assert_eq!(
        controller.view(
            &snapshot(RequestLifecycleState::Error(RequestFailure::connection(
                "refused"
            ))),
            &scenario
        ),
        View::Error {
            kind: FailureKind::ConnectionFailure,
            message: "Could not connect to the prediction service.".into()
        }
    );
    assert!(matches!(
        controller.view(
            &snapshot(RequestLifecycleState::Result(sample_result(None))),
            &scenario
        ),
        View::Result(_)
    ));
}

#[test]
fn result_view_carries_metrics_and_projections() {
    let controller = PresentationController::default();
    let view = controller.result_view(&sample_result(Some(85.0)), 285_000_000);

    assert_eq!(
        view.classification,
        Classification {
            severity: SeverityBand::Urgent,
            confidence: ConfidenceBand::High,
        }
    );
    assert_eq!(view.headline, "NATIONAL EMERGENCY RESPONSE");
    assert_eq!(view.accuracy_display, "85.0%");
    assert_eq!(view.total_damage_display, "12,345 units");
    assert_eq!(view.population_display, "285.0 M");
    let labels: Vec<&str> = view
        .sectors
        .iter()
        .map(|row| row.display_label.as_str())
        .collect();
    assert_eq!(labels, ["Housing: 120 (units)", "Agricultural Land: 40 (Ha)"]);
    assert_eq!(view.chart.labels, ["Housing", "Agricultural Land"]);
}

#[test]
fn missing_accuracy_shows_not_available() {
    let controller = PresentationController::default();
    let view = controller.result_view(&sample_result(None), 1_500_000);
    assert_eq!(view.accuracy_display, ACCURACY_UNAVAILABLE);
    assert_eq!(view.classification.confidence, ConfidenceBand::Unknown);
    assert_eq!(view.population_display, "1.5 M");
}

#[test]
fn views_serialize_with_a_view_tag() {
    let view = View::Error {
        kind: FailureKind::Timeout,
        message: FailureKind::Timeout.user_message().into(),
    };
    let json = serde_json::to_value(&view).expect("serialize");
    assert_eq!(json["view"], "error");
    assert_eq!(json["kind"], "timeout");
}
