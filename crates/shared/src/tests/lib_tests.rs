use crate::{
    domain::{DisasterType, ScenarioInput, SectorUnit, SeverityColor},
    error::{FailureKind, RequestFailure},
    protocol::{PredictRequest, PredictResponse, RequestDialect},
};

#[test]
fn disaster_type_parses_wire_labels_and_aliases() {
    assert_eq!(
        "KEBAKARAN HUTAN DAN LAHAN".parse::<DisasterType>(),
        Ok(DisasterType::ForestAndLandFire)
    );
    assert_eq!("banjir".parse::<DisasterType>(), Ok(DisasterType::Flood));
    assert_eq!(
        "tidal-wave".parse::<DisasterType>(),
        Ok(DisasterType::TidalWaveAndAbrasion)
    );
    assert_eq!(
        "VolcanicEruption".parse::<DisasterType>(),
        Ok(DisasterType::VolcanicEruption)
    );
    assert!("tsunami-ish".parse::<DisasterType>().is_err());
}

#[test]
fn disaster_type_set_is_closed_at_eight() {
    assert_eq!(DisasterType::ALL.len(), 8);
    for kind in DisasterType::ALL {
        assert_eq!(kind.wire_label().parse::<DisasterType>(), Ok(*kind));
    }
}

#[test]
fn camel_request_uses_flat_camel_case_fields() {
    let request = PredictRequest::from_scenario(&ScenarioInput::default(), RequestDialect::Camel);
    let body = serde_json::to_value(&request).expect("serialize");
    assert_eq!(
        body,
        serde_json::json!({
            "disasterType": "BANJIR",
            "eventCount": 50,
            "populationBase": 285_000_000u64,
        })
    );
}

#[test]
fn legacy_request_uses_native_field_names() {
    let scenario = ScenarioInput {
        disaster_type: DisasterType::Drought,
        event_count: 3,
        population_base: 1_000,
    };
    let body = serde_json::to_value(PredictRequest::from_scenario(
        &scenario,
        RequestDialect::Legacy,
    ))
    .expect("serialize");
    assert_eq!(
        body,
        serde_json::json!({
            "jenis_bencana": "KEKERINGAN",
            "jumlah_kejadian": 3,
            "jumlah_penduduk": 1_000,
        })
    );
}

#[test]
fn response_keeps_sector_order_from_the_wire() {
    let raw = r#"{
        "status": "success",
        "sectorEstimates": {"Rumah": 10, "Lahan Pertanian": 2.5, "Fasilitas Umum": 7},
        "totalDamageUnits": 17,
        "severityColor": "Green",
        "severityLabel": "NORMAL"
    }"#;
    let response: PredictResponse = serde_json::from_str(raw).expect("parse");
    let names: Vec<&str> = response
        .sector_estimates
        .as_ref()
        .expect("estimates")
        .0
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, ["Rumah", "Lahan Pertanian", "Fasilitas Umum"]);
    assert!(response.is_success());
}

#[test]
fn response_accepts_native_field_aliases() {
    let raw = r#"{
        "status": "success",
        "prediksi": {"Rumah": 120},
        "total_kerusakan": 120,
        "status_bencana": "SIAGA DARURAT (PROVINSI)",
        "warna_status": "Oranye",
        "akurasi_model": 81.4
    }"#;
    let response: PredictResponse = serde_json::from_str(raw).expect("parse");
    assert_eq!(response.total_damage_units, Some(120.0));
    assert_eq!(response.model_accuracy_percent, Some(81.4));
    assert_eq!(response.severity_color.as_deref(), Some("Oranye"));
    assert_eq!(
        response.severity_label.as_deref(),
        Some("SIAGA DARURAT (PROVINSI)")
    );
}

#[test]
fn error_body_is_not_success() {
    let response: PredictResponse =
        serde_json::from_str(r#"{"error": "Jenis bencana tidak dikenali"}"#).expect("parse");
    assert!(!response.is_success());
    assert_eq!(
        response.error.as_deref(),
        Some("Jenis bencana tidak dikenali")
    );
}

#[test]
fn severity_color_accepts_native_labels() {
    assert_eq!(SeverityColor::from_wire("Merah"), Some(SeverityColor::Red));
    assert_eq!(SeverityColor::from_wire("orange"), Some(SeverityColor::Orange));
    assert_eq!(SeverityColor::from_wire(" Hijau "), Some(SeverityColor::Green));
    assert_eq!(SeverityColor::from_wire("Purple"), None);
}

#[test]
fn sector_unit_parses_explicit_units() {
    assert_eq!(SectorUnit::from_wire("Ha"), Some(SectorUnit::Area));
    assert_eq!(SectorUnit::from_wire("units"), Some(SectorUnit::Building));
    assert_eq!(SectorUnit::from_wire("liters"), None);
}

#[test]
fn request_failure_keeps_detail_out_of_the_message() {
    let failure = RequestFailure::processing("missing sectorEstimates");
    assert_eq!(failure.kind, FailureKind::ProcessingFailure);
    assert_eq!(
        failure.to_string(),
        "The prediction service could not process this scenario."
    );
    assert_eq!(failure.detail, "missing sectorEstimates");
}
