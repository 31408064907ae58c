use std::str::FromStr;

use shared::domain::{DisasterType, ScenarioInput};
use tracing::debug;

use crate::error::ScenarioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioField {
    DisasterType,
    EventCount,
    PopulationBase,
}

impl ScenarioField {
    pub fn name(self) -> &'static str {
        match self {
            ScenarioField::DisasterType => "disasterType",
            ScenarioField::EventCount => "eventCount",
            ScenarioField::PopulationBase => "populationBase",
        }
    }
}

impl FromStr for ScenarioField {
    type Err = ScenarioError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "disastertype" | "type" | "jenisbencana" => Ok(ScenarioField::DisasterType),
            "eventcount" | "events" | "jumlahkejadian" => Ok(ScenarioField::EventCount),
            "populationbase" | "population" | "jumlahpenduduk" => {
                Ok(ScenarioField::PopulationBase)
            }
            _ => Err(ScenarioError::UnknownField(raw.to_string())),
        }
    }
}

/// Session-scoped scenario being edited.
#[derive(Debug, Clone, Default)]
pub struct ScenarioState {
    input: ScenarioInput,
}

impl ScenarioState {
    pub fn new(input: ScenarioInput) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &ScenarioInput {
        &self.input
    }

    /// Replaces one field from its textual form. Only type coercion happens
    /// here; range checks belong to the orchestrator.
    pub fn set_field(&mut self, field: ScenarioField, raw: &str) -> Result<(), ScenarioError> {
        match field {
            ScenarioField::DisasterType => {
                let kind = raw.parse::<DisasterType>()?;
                self.set_disaster_type(kind);
            }
            ScenarioField::EventCount => {
                let count = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ScenarioError::InvalidNumber {
                        field: field.name(),
                        value: raw.to_string(),
                    })?;
                self.set_event_count(count);
            }
            ScenarioField::PopulationBase => {
                return Err(ScenarioError::ReadOnlyField(field.name()));
            }
        }
        Ok(())
    }

    pub fn set_disaster_type(&mut self, kind: DisasterType) {
        debug!(field = "disasterType", value = %kind, "scenario edited");
        self.input.disaster_type = kind;
    }

    pub fn set_event_count(&mut self, count: u64) {
        debug!(field = "eventCount", value = count, "scenario edited");
        self.input.event_count = count;
    }
}

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod tests;
