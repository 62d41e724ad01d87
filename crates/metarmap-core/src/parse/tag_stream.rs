//! Streaming parser for the tagged-document payload format.
//!
//! The document is a flat sequence of station records. Each record opens
//! with a `<raw_text>` field and carries the remaining fields in a fixed
//! order, so a new `<raw_text>` marker is the signal that the previous
//! record is complete. The scanner holds one open field's content at a
//! time and never buffers the document.

use super::ParseError;
use crate::report::{FlightCategory, StationReport};

/// Which report field the scanner is currently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RawText,
    StationId,
    FlightCategory,
    WindSpeed,
    WindGust,
    WxString,
}

impl Field {
    fn from_marker(tag: &str) -> Option<Field> {
        match tag {
            "raw_text" => Some(Field::RawText),
            "station_id" => Some(Field::StationId),
            "flight_category" => Some(Field::FlightCategory),
            "wind_speed_kt" => Some(Field::WindSpeed),
            "wind_gust_kt" => Some(Field::WindGust),
            "wx_string" => Some(Field::WxString),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::RawText => "raw_text",
            Field::StationId => "station_id",
            Field::FlightCategory => "flight_category",
            Field::WindSpeed => "wind_speed_kt",
            Field::WindGust => "wind_gust_kt",
            Field::WxString => "wx_string",
        }
    }
}

/// Structural markers that identify the document type even when it holds
/// zero station records.
const DOCUMENT_MARKERS: [&str; 3] = ["response", "data", "METAR"];

/// Incremental scanner over the tagged payload.
///
/// Feed input in arbitrarily sized chunks with [`push`](Self::push), then
/// call [`finish`](Self::finish) to flush the final record and collect the
/// results. Unrecognized markers and text outside recognized fields are
/// skipped without error, but a document that never shows any recognized
/// markup at all (an HTML error page, say) is rejected.
#[derive(Debug, Default)]
pub struct TagStreamParser {
    /// Field currently open; content accumulates only while this is set.
    open_field: Option<Field>,
    content: String,
    /// Marker name being read between `<` and `>`.
    marker: Option<String>,
    current: StationReport,
    /// A record is in progress once any recognized field has opened.
    started: bool,
    saw_known_markup: bool,
    reports: Vec<StationReport>,
}

impl TagStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next chunk of input.
    pub fn push(&mut self, chunk: &str) {
        for ch in chunk.chars() {
            if self.marker.is_some() {
                if ch == '>' {
                    if let Some(name) = self.marker.take() {
                        self.handle_marker(&name);
                    }
                } else if let Some(marker) = self.marker.as_mut() {
                    marker.push(ch);
                }
            } else if ch == '<' {
                self.marker = Some(String::new());
            } else if self.open_field.is_some() {
                self.content.push(ch);
            }
        }
    }

    /// Flush the final record and return everything parsed.
    ///
    /// Input that ends mid-marker or mid-field is reported as truncation
    /// rather than silently committing a partial field.
    pub fn finish(mut self) -> Result<Vec<StationReport>, ParseError> {
        if self.marker.is_some() {
            return Err(ParseError::TruncatedMarkup);
        }
        if let Some(field) = self.open_field {
            return Err(ParseError::TruncatedField {
                field: field.name(),
            });
        }
        if !self.saw_known_markup {
            return Err(ParseError::UnrecognizedFormat);
        }
        if self.started {
            self.flush_current();
        }
        Ok(self.reports)
    }

    fn handle_marker(&mut self, name: &str) {
        let name = name.trim();
        if let Some(tag) = name.strip_prefix('/') {
            if self.open_field == Field::from_marker(tag.trim()) {
                if let Some(field) = self.open_field.take() {
                    self.commit(field);
                }
            }
            return;
        }

        // Attributes do not matter, only the tag name.
        let tag = name.split_whitespace().next().unwrap_or("");
        let Some(field) = Field::from_marker(tag) else {
            if DOCUMENT_MARKERS.contains(&tag) {
                self.saw_known_markup = true;
            }
            return;
        };
        self.saw_known_markup = true;

        // A field left open by malformed input commits when the next one opens.
        if let Some(open) = self.open_field.take() {
            self.commit(open);
        }
        if field == Field::RawText && self.started {
            self.flush_current();
        }
        self.open_field = Some(field);
        self.content.clear();
        self.started = true;
    }

    fn commit(&mut self, field: Field) {
        let text = std::mem::take(&mut self.content);
        let text = text.trim();
        match field {
            Field::RawText => self.current.raw_text = text.to_string(),
            Field::StationId => self.current.station_id = text.to_string(),
            Field::FlightCategory => self.current.flight_category = FlightCategory::parse(text),
            Field::WindSpeed => self.current.wind_speed_kt = parse_knots(text),
            Field::WindGust => self.current.wind_gust_kt = parse_knots(text),
            Field::WxString => self.current.wx_string = text.to_string(),
        }
    }

    fn flush_current(&mut self) {
        let mut report = std::mem::take(&mut self.current);
        report.derive_missing_gust();
        self.reports.push(report);
        self.started = false;
    }
}

/// Wind values are non-negative integers; anything else reads as calm.
fn parse_knots(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}
