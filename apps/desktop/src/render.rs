//! Plain-text rendering of the decision-support screen.

use std::fmt::Write as _;

use client_core::{
    projection::format_quantity, ChartSeries, ConfidenceBand, ResultView, SeverityBand, View,
};
use shared::domain::{DisasterType, ScenarioInput};

const TITLE: &str = "Disaster.AI - disaster risk decision support";
const RULE_WIDTH: usize = 64;
const BAR_WIDTH: usize = 40;

pub fn render_screen(scenario: &ScenarioInput, view: &View) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(
        out,
        "Scenario: {} | {} events | population base {}",
        scenario.disaster_type,
        scenario.event_count,
        client_core::presentation::format_population(scenario.population_base)
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    match view {
        View::Idle { placeholder } => {
            let _ = writeln!(out, "{placeholder}");
        }
        View::Loading { message } => {
            let _ = writeln!(out, "{message}");
        }
        View::Error { message, .. } => {
            let _ = writeln!(out, "! {message}");
        }
        View::Result(result) => render_result(&mut out, result),
    }
    out
}

fn render_result(out: &mut String, view: &ResultView) {
    let _ = writeln!(
        out,
        "[{}] {}",
        severity_tag(view.classification.severity),
        view.headline
    );
    let _ = writeln!(
        out,
        "Model accuracy: {} ({})",
        view.accuracy_display,
        confidence_text(view.classification.confidence)
    );
    let _ = writeln!(out, "Total physical damage: {}", view.total_damage_display);
    let _ = writeln!(out, "Population base: {}", view.population_display);
    let _ = writeln!(out);
    render_chart(out, &view.chart);
    let _ = writeln!(out);
    for sector in &view.sectors {
        let _ = writeln!(out, "  {}", sector.display_label);
    }
}

fn severity_tag(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::Urgent => "URGENT",
        SeverityBand::Elevated => "ELEVATED",
        SeverityBand::Normal => "NORMAL",
    }
}

fn confidence_text(band: ConfidenceBand) -> &'static str {
    match band {
        ConfidenceBand::High => "high confidence",
        ConfidenceBand::Moderate => "moderate confidence",
        ConfidenceBand::Unknown => "confidence unknown",
    }
}

/// Horizontal bars scaled to the largest value.
pub fn render_chart(out: &mut String, chart: &ChartSeries) {
    let _ = writeln!(out, "{}", chart.title);
    let label_width = chart
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.values.iter().copied().fold(0.0_f64, f64::max);

    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {label:<label_width$} | {} {}",
            "#".repeat(len),
            format_quantity(*value)
        );
    }
}

pub fn render_disaster_types() -> String {
    let mut out = String::new();
    for kind in DisasterType::ALL {
        let _ = writeln!(out, "{kind:?}: {}", kind.wire_label());
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
