//! Plain-text classification table for the operator tools.

use metarmap_core::{classify, StationReport, WindRules};

pub fn header_row() -> String {
    format!(
        "{:<8} {:<8} {:>4} {:>4}  {:<7} {}",
        "STATION", "CATEGORY", "WIND", "GUST", "COLOR", "HAZARDS"
    )
}

/// One table row: how this report would light its slot.
pub fn classification_row(report: &StationReport, rules: &WindRules) -> String {
    let state = classify(report, rules);

    let mut hazards: Vec<&str> = Vec::new();
    if state.lightning {
        hazards.push("lightning");
    }
    if state.severe_wind {
        hazards.push("severe-wind");
    }
    if state.moderate_wind {
        hazards.push("moderate-wind");
    }
    let hazards = if hazards.is_empty() {
        "-".to_string()
    } else {
        hazards.join(",")
    };

    format!(
        "{:<8} {:<8} {:>4} {:>4}  #{:02x}{:02x}{:02x} {}",
        report.station_id,
        report.flight_category,
        report.wind_speed_kt,
        report.wind_gust_kt,
        state.base.r,
        state.base.g,
        state.base.b,
        hazards
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use metarmap_core::FlightCategory;

    #[test]
    fn rows_carry_color_and_hazard_labels() {
        let report = StationReport {
            station_id: "KSEA".to_string(),
            flight_category: FlightCategory::Vfr,
            wind_speed_kt: 12,
            wind_gust_kt: 22,
            wx_string: "TSRA".to_string(),
            ..StationReport::default()
        };
        let row = classification_row(&report, &WindRules::default());

        assert!(row.starts_with("KSEA"));
        assert!(row.contains("VFR"));
        assert!(row.contains("#00ff00"));
        assert!(row.contains("lightning"));
        assert!(row.contains("moderate-wind"));
        assert!(!row.contains("severe-wind"));
    }

    #[test]
    fn calm_stations_show_a_placeholder() {
        let report = StationReport {
            station_id: "KPDX".to_string(),
            flight_category: FlightCategory::Ifr,
            ..StationReport::default()
        };
        let row = classification_row(&report, &WindRules::default());
        assert!(row.ends_with('-'));
        assert!(row.contains("#ff0000"));
    }
}
