use super::*;

use client_core::PresentationController;
use shared::domain::{PredictionResult, SectorEstimate, SeverityColor};

fn result_view() -> ResultView {
    let result = PredictionResult {
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
        total_damage_units: 120.0,
        model_accuracy_percent: Some(70.0),
        severity_color: SeverityColor::Orange,
        severity_label: "PROVINCIAL EMERGENCY ALERT".into(),
    };
    PresentationController::default().result_view(&result, 285_000_000)
}

#[test]
fn idle_screen_shows_placeholder_and_scenario() {
    let screen = render_screen(
        &ScenarioInput::default(),
        &View::Idle {
            placeholder: "Waiting for scenario input...".into(),
        },
    );
    assert!(screen.contains("Scenario: BANJIR | 50 events | population base 285.0 M"));
    assert!(screen.contains("Waiting for scenario input..."));
}

#[test]
fn result_screen_lists_sectors_in_order() {
    let screen = render_screen(&ScenarioInput::default(), &View::Result(result_view()));

    assert!(screen.contains("[ELEVATED] PROVINCIAL EMERGENCY ALERT"));
    assert!(screen.contains("Model accuracy: 70.0% (moderate confidence)"));
    let housing = screen.find("Housing: 120 (units)").expect("housing row");
    let land = screen.find("Agricultural Land: 40 (Ha)").expect("land row");
    assert!(housing < land);
}

#[test]
fn chart_bars_scale_to_the_largest_value() {
    let mut out = String::new();
    render_chart(&mut out, &result_view().chart);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Estimated damage");
    assert_eq!(lines[1].matches('#').count(), BAR_WIDTH);
    assert_eq!(lines[2].matches('#').count(), BAR_WIDTH / 3);
}

#[test]
fn error_screen_shows_only_the_safe_message() {
    let screen = render_screen(
        &ScenarioInput::default(),
        &View::Error {
            kind: shared::error::FailureKind::ConnectionFailure,
            message: "Could not connect to the prediction service.".into(),
        },
    );
    assert!(screen.contains("! Could not connect to the prediction service."));
}

#[test]
fn type_listing_covers_every_category() {
    assert_eq!(render_disaster_types().lines().count(), 8);
}
