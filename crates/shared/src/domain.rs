use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Population base used when nothing else is configured (national estimate for 2025).
pub const DEFAULT_POPULATION_BASE: u64 = 285_000_000;
pub const DEFAULT_EVENT_COUNT: u64 = 50;

macro_rules! disaster_types {
    ($($variant:ident => $wire:literal, [$($alias:literal),*];)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum DisasterType {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl DisasterType {
            pub const ALL: &'static [DisasterType] = &[$(DisasterType::$variant),+];

            /// Label the prediction service was trained on.
            pub fn wire_label(self) -> &'static str {
                match self {
                    $(DisasterType::$variant => $wire,)+
                }
            }

            fn aliases(self) -> &'static [&'static str] {
                match self {
                    $(DisasterType::$variant => &[stringify!($variant), $($alias),*],)+
                }
            }
        }
    };
}

disaster_types! {
    Flood => "BANJIR", ["flood"];
    Earthquake => "GEMPABUMI", ["earthquake"];
    ExtremeWeather => "CUACA EKSTREM", ["extreme-weather"];
    ForestAndLandFire => "KEBAKARAN HUTAN DAN LAHAN", ["forest-fire", "land-fire"];
    VolcanicEruption => "ERUPSI GUNUNG API", ["volcanic-eruption"];
    Landslide => "TANAH LONGSOR", ["landslide"];
    Drought => "KEKERINGAN", ["drought"];
    TidalWaveAndAbrasion => "GELOMBANG PASANG DAN ABRASI", ["tidal-wave", "abrasion"];
}

impl Default for DisasterType {
    fn default() -> Self {
        DisasterType::Flood
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown disaster type '{0}'")]
pub struct UnknownDisasterType(pub String);

impl FromStr for DisasterType {
    type Err = UnknownDisasterType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        DisasterType::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.wire_label().eq_ignore_ascii_case(needle)
                    || kind
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| UnknownDisasterType(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub disaster_type: DisasterType,
    pub event_count: u64,
    pub population_base: u64,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            disaster_type: DisasterType::default(),
            event_count: DEFAULT_EVENT_COUNT,
            population_base: DEFAULT_POPULATION_BASE,
        }
    }
}

/// Three-way risk color reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityColor {
    Red,
    Orange,
    Green,
}

impl SeverityColor {
    /// Accepts the English names and the service's native labels.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" | "merah" => Some(SeverityColor::Red),
            "orange" | "oranye" => Some(SeverityColor::Orange),
            "green" | "hijau" => Some(SeverityColor::Green),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorUnit {
    Area,
    Building,
}

impl SectorUnit {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "area" | "ha" | "hectare" | "hectares" => Some(SectorUnit::Area),
            "building" | "buildings" | "unit" | "units" => Some(SectorUnit::Building),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorEstimate {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<SectorUnit>,
}

/// A successful, boundary-validated prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub sector_estimates: Vec<SectorEstimate>,
    pub total_damage_units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_accuracy_percent: Option<f64>,
    pub severity_color: SeverityColor,
    pub severity_label: String,
}
