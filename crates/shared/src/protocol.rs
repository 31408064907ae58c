use std::{collections::HashMap, fmt, str::FromStr};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::domain::{DisasterType, ScenarioInput};

pub const SUCCESS_STATUS: &str = "success";

/// Field naming used for the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestDialect {
    /// `disasterType`, `eventCount`, `populationBase`.
    #[default]
    Camel,
    /// The service's native names: `jenis_bencana`, `jumlah_kejadian`, `jumlah_penduduk`.
    Legacy,
}

impl RequestDialect {
    fn field_names(self) -> [&'static str; 3] {
        match self {
            RequestDialect::Camel => ["disasterType", "eventCount", "populationBase"],
            RequestDialect::Legacy => ["jenis_bencana", "jumlah_kejadian", "jumlah_penduduk"],
        }
    }
}

impl FromStr for RequestDialect {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "camel" | "camelcase" => Ok(RequestDialect::Camel),
            "legacy" | "native" => Ok(RequestDialect::Legacy),
            other => Err(format!("unknown request dialect '{other}'")),
        }
    }
}

/// Flat request body sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub dialect: RequestDialect,
    pub disaster_type: DisasterType,
    pub event_count: u64,
    pub population_base: u64,
}

impl PredictRequest {
    pub fn from_scenario(scenario: &ScenarioInput, dialect: RequestDialect) -> Self {
        Self {
            dialect,
            disaster_type: scenario.disaster_type,
            event_count: scenario.event_count,
            population_base: scenario.population_base,
        }
    }
}

impl Serialize for PredictRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [disaster, events, population] = self.dialect.field_names();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(disaster, self.disaster_type.wire_label())?;
        map.serialize_entry(events, &self.event_count)?;
        map.serialize_entry(population, &self.population_base)?;
        map.end()
    }
}

/// Sector mapping that keeps the order the service sent the keys in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedEstimates(pub Vec<(String, f64)>);

impl<'de> Deserialize<'de> for OrderedEstimates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EstimatesVisitor;

        impl<'de> Visitor<'de> for EstimatesVisitor {
            type Value = OrderedEstimates;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping sector names to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, f64)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    // Later duplicates replace the earlier value but keep its position.
                    match entries.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(slot) => slot.1 = value,
                        None => entries.push((name, value)),
                    }
                }
                Ok(OrderedEstimates(entries))
            }
        }

        deserializer.deserialize_map(EstimatesVisitor)
    }
}

impl Serialize for OrderedEstimates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Raw response body. Every field is optional here; validation happens at the
/// client boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, alias = "prediksi", skip_serializing_if = "Option::is_none")]
    pub sector_estimates: Option<OrderedEstimates>,
    #[serde(default, alias = "total_kerusakan", skip_serializing_if = "Option::is_none")]
    pub total_damage_units: Option<f64>,
    #[serde(default, alias = "akurasi_model", skip_serializing_if = "Option::is_none")]
    pub model_accuracy_percent: Option<f64>,
    #[serde(default, alias = "warna_status", skip_serializing_if = "Option::is_none")]
    pub severity_color: Option<String>,
    #[serde(default, alias = "status_bencana", skip_serializing_if = "Option::is_none")]
    pub severity_label: Option<String>,
    /// Optional contract extension: explicit unit per sector name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_units: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}
