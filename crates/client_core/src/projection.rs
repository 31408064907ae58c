//! Chart and table shapes derived from per-sector estimates.

use serde::Serialize;
use shared::domain::{SectorEstimate, SectorUnit};

/// Sector-name substrings that mark a land-area sector ("Lahan" is the
/// service's own wording).
pub const DEFAULT_AREA_TOKENS: &[&str] = &["Lahan", "Land"];
pub const CHART_TITLE: &str = "Estimated damage";

pub fn unit_label(unit: SectorUnit) -> &'static str {
    match unit {
        SectorUnit::Area => "Ha",
        SectorUnit::Building => "units",
    }
}

/// Decides the unit of a sector when the service did not say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRule {
    area_tokens: Vec<String>,
}

impl Default for UnitRule {
    fn default() -> Self {
        Self::new(DEFAULT_AREA_TOKENS.iter().map(|token| token.to_string()))
    }
}

impl UnitRule {
    pub fn new(area_tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            area_tokens: area_tokens
                .into_iter()
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    /// Case-sensitive substring match against any area token.
    pub fn is_area_sector(&self, sector_name: &str) -> bool {
        self.area_tokens
            .iter()
            .any(|token| sector_name.contains(token.as_str()))
    }

    pub fn unit_for(&self, estimate: &SectorEstimate) -> SectorUnit {
        match estimate.unit {
            Some(unit) => unit,
            None if self.is_area_sector(&estimate.name) => SectorUnit::Area,
            None => SectorUnit::Building,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorProjection {
    pub sector_name: String,
    pub value: f64,
    pub unit: SectorUnit,
    pub unit_label: String,
    pub display_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    rule: UnitRule,
}

impl ProjectionBuilder {
    pub fn new(rule: UnitRule) -> Self {
        Self { rule }
    }

    pub fn project(&self, estimates: &[SectorEstimate]) -> Vec<SectorProjection> {
        estimates
            .iter()
            .map(|estimate| {
                let unit = self.rule.unit_for(estimate);
                let unit_label = unit_label(unit);
                SectorProjection {
                    sector_name: estimate.name.clone(),
                    value: estimate.value,
                    unit,
                    unit_label: unit_label.to_string(),
                    display_label: format!(
                        "{}: {} ({unit_label})",
                        estimate.name,
                        format_quantity(estimate.value)
                    ),
                }
            })
            .collect()
    }

    pub fn chart_series(&self, estimates: &[SectorEstimate]) -> ChartSeries {
        ChartSeries {
            title: CHART_TITLE.to_string(),
            labels: estimates.iter().map(|e| e.name.clone()).collect(),
            values: estimates.iter().map(|e| e.value).collect(),
        }
    }
}

/// Whole numbers get thousands separators; anything else keeps two decimals.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        group_thousands(&format!("{value:.0}"))
    } else {
        let fixed = format!("{value:.2}");
        match fixed.split_once('.') {
            Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
            None => fixed,
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
#[path = "tests/projection_tests.rs"]
mod tests;
