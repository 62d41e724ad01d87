//! Whole-document JSON strategy.
//!
//! Deserializes the entire payload in one pass, then projects each station
//! object into a report. Field shapes drift between API revisions, so every
//! projection is tolerant: wrong types and missing keys fall back to the
//! report defaults instead of failing the batch.

use serde_json::Value;

use super::ParseError;
use crate::report::{FlightCategory, StationReport};

/// Parse a JSON payload: an array of per-station objects, or an object
/// wrapping one under a `data` key.
pub fn parse_document(payload: &str) -> Result<Vec<StationReport>, ParseError> {
    let document: Value = serde_json::from_str(payload)?;
    let stations = station_array(&document).ok_or(ParseError::NotAnArray)?;
    Ok(stations.iter().map(project_station).collect())
}

fn station_array(document: &Value) -> Option<&Vec<Value>> {
    if let Some(array) = document.as_array() {
        return Some(array);
    }
    document.get("data").and_then(|value| value.as_array())
}

fn project_station(object: &Value) -> StationReport {
    let mut report = StationReport {
        station_id: string_field(object, "icaoId").unwrap_or_default(),
        flight_category: string_field(object, "fltCat")
            .map(|text| FlightCategory::parse(&text))
            .unwrap_or_default(),
        wind_speed_kt: number_field(object, "wspd").unwrap_or(0),
        wind_gust_kt: number_field(object, "wgst").unwrap_or(0),
        wx_string: string_field(object, "wxString").unwrap_or_default(),
        raw_text: string_field(object, "rawOb").unwrap_or_default(),
    };
    report.derive_missing_gust();
    report
}

fn string_field(object: &Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(|value| value.as_str())
        .map(|text| text.trim().to_string())
}

/// Wind values arrive as numbers, numeric strings, or null.
fn number_field(object: &Value, key: &str) -> Option<u32> {
    let value = object.get(key)?;
    if let Some(number) = value.as_u64() {
        return u32::try_from(number).ok();
    }
    if let Some(number) = value.as_f64() {
        if number >= 0.0 {
            return Some(number as u32);
        }
    }
    if let Some(text) = value.as_str() {
        return text.trim().parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_the_station_fields() {
        let payload = r#"[{
            "icaoId": "KSEA",
            "fltCat": "MVFR",
            "wspd": 12,
            "wgst": 22,
            "wxString": "-RA",
            "rawOb": "KSEA 221853Z 18012G22KT 4SM -RA BKN020"
        }]"#;
        let reports = parse_document(payload).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].station_id, "KSEA");
        assert_eq!(reports[0].flight_category, FlightCategory::Mvfr);
        assert_eq!(reports[0].wind_speed_kt, 12);
        assert_eq!(reports[0].wind_gust_kt, 22);
        assert_eq!(reports[0].wx_string, "-RA");
    }

    #[test]
    fn missing_and_null_fields_use_defaults() {
        let reports = parse_document(r#"[{"icaoId":"KSEA","wgst":null}]"#).unwrap();
        assert_eq!(reports[0].flight_category, FlightCategory::Unknown);
        assert_eq!(reports[0].wind_speed_kt, 0);
        assert_eq!(reports[0].wind_gust_kt, 0);
        assert_eq!(reports[0].raw_text, "");
    }

    #[test]
    fn numeric_strings_and_floats_are_accepted() {
        let payload = r#"[{"icaoId":"KSEA","wspd":"18","wgst":27.0}]"#;
        let reports = parse_document(payload).unwrap();
        assert_eq!(reports[0].wind_speed_kt, 18);
        assert_eq!(reports[0].wind_gust_kt, 27);
    }

    #[test]
    fn negative_and_garbage_winds_read_as_calm() {
        let payload = r#"[{"icaoId":"KSEA","wspd":-4,"wgst":"strong"}]"#;
        let reports = parse_document(payload).unwrap();
        assert_eq!(reports[0].wind_speed_kt, 0);
        assert_eq!(reports[0].wind_gust_kt, 0);
    }

    #[test]
    fn gust_falls_back_to_the_raw_observation() {
        let payload = r#"[{"icaoId":"KOKC","wspd":24,"rawOb":"KOKC 222152Z 18024G38KT 6SM"}]"#;
        let reports = parse_document(payload).unwrap();
        assert_eq!(reports[0].wind_gust_kt, 38);
    }

    #[test]
    fn data_wrapped_arrays_are_unwrapped() {
        let reports = parse_document(r#"{"data":[{"icaoId":"KSEA"}]}"#).unwrap();
        assert_eq!(reports[0].station_id, "KSEA");
    }

    #[test]
    fn non_array_documents_are_rejected() {
        assert!(matches!(
            parse_document(r#"{"error":"rate limited"}"#),
            Err(ParseError::NotAnArray)
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_document(r#"[{"icaoId":"KSEA""#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn an_empty_array_yields_no_reports() {
        assert!(parse_document("[]").unwrap().is_empty());
    }
}
