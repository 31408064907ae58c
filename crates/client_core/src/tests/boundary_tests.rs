use super::*;

fn parse(raw: &str) -> PredictResponse {
    serde_json::from_str(raw).expect("parse response")
}

const OK_BODY: &str = r#"{
    "status": "success",
    "sectorEstimates": {"Housing": 120, "Agricultural Land": 40},
    "totalDamageUnits": 120,
    "modelAccuracyPercent": 85,
    "severityColor": "Orange",
    "severityLabel": "PROVINCIAL EMERGENCY ALERT"
}"#;

#[test]
fn accepts_complete_success_body() {
    let result = validate_response(parse(OK_BODY)).expect("valid");
    assert_eq!(result.sector_estimates.len(), 2);
    assert_eq!(result.sector_estimates[0].name, "Housing");
    assert_eq!(result.sector_estimates[1].name, "Agricultural Land");
    assert_eq!(result.total_damage_units, 120.0);
    assert_eq!(result.model_accuracy_percent, Some(85.0));
    assert_eq!(result.severity_color, SeverityColor::Orange);
}

#[test]
fn non_success_status_is_rejected() {
    let err = validate_response(parse(r#"{"status": "error", "error": "boom"}"#))
        .expect_err("not successful");
    assert_eq!(
        err,
        ResponseError::NotSuccessful {
            status: Some("error".into()),
            detail: "boom".into()
        }
    );
}

#[test]
fn missing_status_is_rejected() {
    let err = validate_response(parse(r#"{"error": "Jenis bencana tidak dikenali"}"#))
        .expect_err("no status");
    assert!(matches!(err, ResponseError::NotSuccessful { status: None, .. }));
}

#[test]
fn empty_sector_mapping_is_rejected() {
    let err = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {}, "totalDamageUnits": 0,
            "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("empty");
    assert_eq!(err, ResponseError::EmptySectorEstimates);
}

#[test]
fn missing_required_fields_are_rejected() {
    let err = validate_response(parse(
        r#"{"status": "success", "totalDamageUnits": 0,
            "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("no estimates");
    assert_eq!(err, ResponseError::MissingField("sectorEstimates"));

    let err = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Housing": 1},
            "totalDamageUnits": 1, "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("no color");
    assert_eq!(err, ResponseError::MissingField("severityColor"));

    let err = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Housing": 1},
            "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("no total");
    assert_eq!(err, ResponseError::MissingField("totalDamageUnits"));
}

#[test]
fn negative_estimates_and_out_of_range_accuracy_are_rejected() {
    let err = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Housing": -1},
            "totalDamageUnits": 0, "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("negative");
    assert!(matches!(err, ResponseError::InvalidEstimate { .. }));

    let err = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Housing": 1},
            "totalDamageUnits": 1, "modelAccuracyPercent": 140,
            "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect_err("accuracy");
    assert_eq!(err, ResponseError::AccuracyOutOfRange(140.0));
}

#[test]
fn unknown_severity_color_fails_closed_to_red() {
    let result = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Housing": 1},
            "totalDamageUnits": 1, "severityColor": "Ungu", "severityLabel": "?"}"#,
    ))
    .expect("valid");
    assert_eq!(result.severity_color, SeverityColor::Red);
}

#[test]
fn explicit_sector_units_are_attached() {
    let result = validate_response(parse(
        r#"{"status": "success", "sectorEstimates": {"Rice Paddies": 12, "Schools": 3},
            "sectorUnits": {"Rice Paddies": "area", "Schools": "gallons"},
            "totalDamageUnits": 3, "severityColor": "Green", "severityLabel": "NORMAL"}"#,
    ))
    .expect("valid");
    assert_eq!(result.sector_estimates[0].unit, Some(SectorUnit::Area));
    assert_eq!(result.sector_estimates[1].unit, None);
}
