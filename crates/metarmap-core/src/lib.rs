pub mod color;
pub mod panel;
pub mod parse;
pub mod registry;
pub mod report;
pub mod resolver;

pub use color::Rgb;
pub use panel::{PanelState, SlotState};
pub use parse::{parse_document, parse_payload, ParseError, TagStreamParser};
pub use registry::{standard_legend, SlotEntry, SlotRegistry, GAP_SENTINEL};
pub use report::{derive_gust_kt, FlightCategory, StationReport};
pub use resolver::{classify, hazard_sets, resolve, HazardSets, WindRules};
