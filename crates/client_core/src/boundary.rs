//! Acceptance checks for responses coming back from the prediction service.

use shared::{
    domain::{PredictionResult, SectorEstimate, SectorUnit, SeverityColor},
    protocol::PredictResponse,
};
use tracing::warn;

use crate::error::ResponseError;

/// Turns a raw response into a result, or explains why it cannot be shown.
pub fn validate_response(response: PredictResponse) -> Result<PredictionResult, ResponseError> {
    if !response.is_success() {
        return Err(ResponseError::NotSuccessful {
            status: response.status,
            detail: response.error.unwrap_or_default(),
        });
    }

    let estimates = response
        .sector_estimates
        .ok_or(ResponseError::MissingField("sectorEstimates"))?
        .0;
    if estimates.is_empty() {
        return Err(ResponseError::EmptySectorEstimates);
    }

    let units = response.sector_units.unwrap_or_default();
    let mut sector_estimates = Vec::with_capacity(estimates.len());
    for (name, value) in estimates {
        if !value.is_finite() || value < 0.0 {
            return Err(ResponseError::InvalidEstimate { name, value });
        }
        let unit = units.get(&name).and_then(|raw| {
            let parsed = SectorUnit::from_wire(raw);
            if parsed.is_none() {
                warn!(sector = %name, unit = %raw, "ignoring unrecognized sector unit");
            }
            parsed
        });
        sector_estimates.push(SectorEstimate { name, value, unit });
    }

    let total_damage_units = response
        .total_damage_units
        .ok_or(ResponseError::MissingField("totalDamageUnits"))?;
    if !total_damage_units.is_finite() || total_damage_units < 0.0 {
        return Err(ResponseError::InvalidTotal(total_damage_units));
    }

    if let Some(accuracy) = response.model_accuracy_percent {
        if !(0.0..=100.0).contains(&accuracy) {
            return Err(ResponseError::AccuracyOutOfRange(accuracy));
        }
    }

    let raw_color = response
        .severity_color
        .ok_or(ResponseError::MissingField("severityColor"))?;
    let severity_color = SeverityColor::from_wire(&raw_color).unwrap_or_else(|| {
        warn!(color = %raw_color, "unrecognized severity color; treating as red");
        SeverityColor::Red
    });

    let severity_label = response
        .severity_label
        .ok_or(ResponseError::MissingField("severityLabel"))?;

    Ok(PredictionResult {
        sector_estimates,
        total_damage_units,
        model_accuracy_percent: response.model_accuracy_percent,
        severity_color,
        severity_label,
    })
}

#[cfg(test)]
#[path = "tests/boundary_tests.rs"]
mod tests;
