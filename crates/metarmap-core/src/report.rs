//! Normalized per-station weather reports.
//!
//! Both payload formats produce the same report shape. Fields the payload
//! omits stay at their zero values; a report is never rejected for missing
//! data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ceiling/visibility classification reported for a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    /// Absent from the payload or spelled in an unrecognized way.
    #[default]
    Unknown,
}

impl FlightCategory {
    /// Parse the payload spelling ("VFR", "MVFR", "IFR", "LIFR").
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "VFR" => FlightCategory::Vfr,
            "MVFR" => FlightCategory::Mvfr,
            "IFR" => FlightCategory::Ifr,
            "LIFR" => FlightCategory::Lifr,
            _ => FlightCategory::Unknown,
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Unknown => "UNKNOWN",
        };
        f.pad(label)
    }
}

/// One station's current weather, normalized from either payload format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationReport {
    /// Airport identifier as reported, e.g. "KSEA".
    pub station_id: String,
    pub flight_category: FlightCategory,
    /// Sustained wind in knots.
    pub wind_speed_kt: u32,
    /// Gust in knots; may be derived from `raw_text` when absent.
    pub wind_gust_kt: u32,
    /// Present-weather string, e.g. "-RA" or "TSRA".
    pub wx_string: String,
    /// Full raw observation text.
    pub raw_text: String,
}

impl StationReport {
    /// Strongest reported wind, sustained or gust.
    pub fn peak_wind_kt(&self) -> u32 {
        self.wind_speed_kt.max(self.wind_gust_kt)
    }

    /// Lightning nearby: a thunderstorm code in the present-weather string,
    /// or a lightning/thunderstorm token anywhere in the raw observation.
    pub fn has_lightning(&self) -> bool {
        self.wx_string.contains("TS")
            || self.raw_text.contains("LTG")
            || self.raw_text.contains("TS")
    }

    /// Whether the report carries any signal worth indicating even without
    /// a flight category.
    pub fn has_any_signal(&self) -> bool {
        self.wind_speed_kt > 0 || self.wind_gust_kt > 0 || self.has_lightning()
    }

    /// Fill the gust from the raw observation when the payload carried no
    /// structured gust field.
    pub fn derive_missing_gust(&mut self) {
        if self.wind_gust_kt == 0 {
            if let Some(gust) = derive_gust_kt(&self.raw_text) {
                self.wind_gust_kt = gust;
            }
        }
    }
}

/// Extract the gust value from a raw wind group such as `35003G15KT`.
///
/// Scans for `G` followed by two or three digits and the `KT` unit marker.
pub fn derive_gust_kt(raw: &str) -> Option<u32> {
    let bytes = raw.as_bytes();
    for (pos, &byte) in bytes.iter().enumerate() {
        if byte != b'G' {
            continue;
        }
        let digits_start = pos + 1;
        let digit_count = bytes[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if !(2..=3).contains(&digit_count) {
            continue;
        }
        let digits_end = digits_start + digit_count;
        if !raw[digits_end..].starts_with("KT") {
            continue;
        }
        if let Ok(knots) = raw[digits_start..digits_end].parse::<u32>() {
            return Some(knots);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_categories() {
        assert_eq!(FlightCategory::parse("VFR"), FlightCategory::Vfr);
        assert_eq!(FlightCategory::parse(" LIFR "), FlightCategory::Lifr);
        assert_eq!(FlightCategory::parse("vfr"), FlightCategory::Unknown);
        assert_eq!(FlightCategory::parse(""), FlightCategory::Unknown);
    }

    #[test]
    fn derives_gust_from_wind_group() {
        assert_eq!(derive_gust_kt("KSEA 221853Z 35003G15KT 10SM"), Some(15));
        assert_eq!(derive_gust_kt("KOKC 222152Z 18024G38KT 6SM"), Some(38));
        assert_eq!(derive_gust_kt("KDEN 221953Z 09012G105KT"), Some(105));
    }

    #[test]
    fn ignores_non_gust_tokens() {
        // No gust group at all.
        assert_eq!(derive_gust_kt("KSEA 221853Z 35003KT 10SM FEW250"), None);
        // G followed by too few or too many digits.
        assert_eq!(derive_gust_kt("KXYZ 12003G1KT"), None);
        assert_eq!(derive_gust_kt("KXYZ 12003G1234KT"), None);
        // Digits without the unit marker.
        assert_eq!(derive_gust_kt("KXYZ 12003G15MPS"), None);
        assert_eq!(derive_gust_kt(""), None);
    }

    #[test]
    fn gust_derivation_only_fills_missing_values() {
        let mut report = StationReport {
            raw_text: "KSEA 221853Z 35003G15KT".to_string(),
            wind_gust_kt: 22,
            ..StationReport::default()
        };
        report.derive_missing_gust();
        assert_eq!(report.wind_gust_kt, 22);

        report.wind_gust_kt = 0;
        report.derive_missing_gust();
        assert_eq!(report.wind_gust_kt, 15);
    }

    #[test]
    fn peak_wind_takes_the_stronger_value() {
        let report = StationReport {
            wind_speed_kt: 12,
            wind_gust_kt: 22,
            ..StationReport::default()
        };
        assert_eq!(report.peak_wind_kt(), 22);

        let calm = StationReport::default();
        assert_eq!(calm.peak_wind_kt(), 0);
    }

    #[test]
    fn lightning_from_wx_string_or_raw_text() {
        let thunder = StationReport {
            wx_string: "TSRA".to_string(),
            ..StationReport::default()
        };
        assert!(thunder.has_lightning());

        let remote = StationReport {
            raw_text: "KSEA 221853Z 35003KT LTG DSNT SE".to_string(),
            ..StationReport::default()
        };
        assert!(remote.has_lightning());

        let calm = StationReport {
            raw_text: "KSEA 221853Z 35003KT 10SM FEW250".to_string(),
            wx_string: "-RA".to_string(),
            ..StationReport::default()
        };
        assert!(!calm.has_lightning());
    }

    #[test]
    fn signal_detection_covers_wind_and_lightning() {
        assert!(!StationReport::default().has_any_signal());

        let windy = StationReport {
            wind_speed_kt: 8,
            ..StationReport::default()
        };
        assert!(windy.has_any_signal());

        let stormy = StationReport {
            wx_string: "TS".to_string(),
            ..StationReport::default()
        };
        assert!(stormy.has_any_signal());
    }
}
