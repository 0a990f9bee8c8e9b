use kronos::chart::{parse_chart_json, parse_instant, Body, ZodiacSign};
use kronos::error::{ChartError, PlacementError};
use kronos::returns::{ReturnPhase, ReturnSetBuilder};

const CHART: &str = r#"[
    { "body": "Sun", "sign": "Leo", "degree": 15, "retrograde": false, "house": 5, "angle": 135 },
    { "body": "Moon", "sign": "Pisces", "degree": 2.5, "retrograde": false, "house": 12, "angle": 332.5 },
    { "body": "Jupiter", "sign": "Sagittarius", "degree": 20, "retrograde": true, "house": 9, "angle": 260 },
    { "body": "Saturn", "sign": "Capricorn", "degree": 10, "retrograde": false, "house": 10, "angle": 280 }
]"#;

#[test]
fn test_parse_bare_array() {
    let chart = parse_chart_json(CHART).unwrap();
    assert_eq!(chart.len(), 4);
    assert_eq!(chart[2].body, Body::Jupiter);
    assert_eq!(chart[2].sign, ZodiacSign::Sagittarius);
    assert!(chart[2].retrograde);
}

#[test]
fn test_parse_wrapped_document() {
    let text = format!(r#"{{ "placements": {} }}"#, CHART);
    let chart = parse_chart_json(&text).unwrap();
    assert_eq!(chart.len(), 4);
}

#[test]
fn test_planet_alias_is_accepted() {
    let text = r#"[{ "planet": "saturn", "sign": "aquarius", "degree": 10, "house": 11, "angle": 310 }]"#;
    let chart = parse_chart_json(text).unwrap();
    assert_eq!(chart[0].body, Body::Saturn);
    assert_eq!(chart[0].sign, ZodiacSign::Aquarius);
}

#[test]
fn test_bad_entry_reports_index() {
    let text = r#"[
        { "body": "Sun", "sign": "Leo", "degree": 15, "house": 5, "angle": 135 },
        { "body": "Sun", "sign": "Leo", "degree": 15, "house": 5 }
    ]"#;
    match parse_chart_json(text) {
        Err(ChartError::Placement { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(source, PlacementError::MissingField("angle"));
        }
        other => panic!("expected placement error, got {:?}", other),
    }
}

#[test]
fn test_mistyped_field_reports_index() {
    let text = r#"{ "placements": [
        { "body": "Sun", "sign": "Leo", "degree": 15, "house": 5, "angle": 135 },
        { "body": "Moon", "sign": "Pisces", "degree": 2.5, "house": 12, "angle": 332.5 },
        { "body": "Saturn", "sign": "Capricorn", "degree": "abc", "house": 10, "angle": 280 }
    ] }"#;
    match parse_chart_json(text) {
        Err(ChartError::Placement { index, source }) => {
            assert_eq!(index, 2);
            assert!(matches!(source, PlacementError::Malformed(_)));
        }
        other => panic!("expected placement error, got {:?}", other),
    }
}

#[test]
fn test_wrong_document_shape_is_rejected() {
    assert!(matches!(parse_chart_json("42"), Err(ChartError::Shape)));
    assert!(matches!(parse_chart_json(r#"{ "bodies": [] }"#), Err(ChartError::Shape)));
    assert!(matches!(parse_chart_json(r#"{ "placements": {} }"#), Err(ChartError::Shape)));
}

#[test]
fn test_unknown_body_is_rejected() {
    let text = r#"[{ "body": "Planet X", "sign": "Leo", "degree": 1, "house": 1, "angle": 121 }]"#;
    let err = parse_chart_json(text).unwrap_err();
    assert!(err.to_string().contains("Planet X"));
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(matches!(parse_chart_json("{ nope"), Err(ChartError::Json(_))));
}

#[test]
fn test_boundary_to_engine() {
    let chart = parse_chart_json(CHART).unwrap();
    let birth = parse_instant("1990-08-08").unwrap();
    let reference = parse_instant("2024-08-08").unwrap();

    let records = ReturnSetBuilder::default()
        .try_build(&chart, reference, birth)
        .unwrap();

    let planets: Vec<Body> = records.iter().map(|r| r.planet).collect();
    assert_eq!(planets, vec![Body::Sun, Body::Jupiter, Body::Saturn]);
    assert_eq!(records[0].phase, ReturnPhase::Exact);
}
