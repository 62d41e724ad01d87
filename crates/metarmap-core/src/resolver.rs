//! Turns a batch of station reports into panel state and overlay targets.

use crate::color::Rgb;
use crate::panel::{PanelState, SlotState};
use crate::registry::SlotRegistry;
use crate::report::{FlightCategory, StationReport};

/// Brightness fraction for "reporting but no flight category".
const DIM_SIGNAL: f32 = 0.1;

/// Wind thresholds in knots.
///
/// Tiering compares the stronger of sustained and gust against each
/// threshold with strict `>`; a station lands in at most one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindRules {
    pub moderate_kt: u32,
    pub severe_kt: u32,
}

impl Default for WindRules {
    fn default() -> Self {
        Self {
            moderate_kt: 15,
            severe_kt: 25,
        }
    }
}

impl WindRules {
    /// The severe threshold may not sit below the moderate one.
    pub fn is_valid(&self) -> bool {
        self.severe_kt >= self.moderate_kt
    }
}

/// Slot indices scheduled for each overlay pass, rebuilt every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardSets {
    pub lightning: Vec<usize>,
    pub severe_wind: Vec<usize>,
    pub moderate_wind: Vec<usize>,
}

impl HazardSets {
    pub fn is_empty(&self) -> bool {
        self.lightning.is_empty() && self.severe_wind.is_empty() && self.moderate_wind.is_empty()
    }
}

/// Visual state for one report, independent of which slots show it.
pub fn classify(report: &StationReport, rules: &WindRules) -> SlotState {
    let peak = report.peak_wind_kt();
    let severe_wind = peak > rules.severe_kt;
    let moderate_wind = !severe_wind && peak > rules.moderate_kt;
    let lightning = report.has_lightning();

    let base = match report.flight_category {
        FlightCategory::Lifr => Rgb::MAGENTA,
        FlightCategory::Ifr => Rgb::RED,
        FlightCategory::Mvfr => Rgb::BLUE,
        FlightCategory::Vfr => Rgb::GREEN,
        FlightCategory::Unknown => {
            if report.has_any_signal() {
                Rgb::WHITE.scaled(DIM_SIGNAL)
            } else {
                Rgb::OFF
            }
        }
    };

    SlotState {
        base,
        lightning,
        severe_wind,
        moderate_wind,
    }
}

/// Apply one fetch cycle's reports to the panel.
///
/// The panel resets first, so stations missing from the batch read as off.
/// When duplicate reports name the same station, the last one wins. Returns
/// the overlay targets derived from the finished panel.
pub fn resolve(
    registry: &SlotRegistry,
    rules: &WindRules,
    reports: &[StationReport],
    panel: &mut PanelState,
) -> HazardSets {
    panel.reset_for_cycle(registry);

    for report in reports {
        let slots = registry.slots_for_station(&report.station_id);
        if slots.is_empty() {
            continue;
        }
        let state = classify(report, rules);
        for index in slots {
            panel.set(index, state);
        }
    }

    hazard_sets(panel)
}

/// Collect overlay targets from the current panel state.
///
/// A slot appears in at most one wind set; legend slots carry no hazard
/// flags and never appear.
pub fn hazard_sets(panel: &PanelState) -> HazardSets {
    let mut sets = HazardSets::default();
    for (index, slot) in panel.slots().iter().enumerate() {
        if slot.lightning {
            sets.lightning.push(index);
        }
        if slot.severe_wind {
            sets.severe_wind.push(index);
        } else if slot.moderate_wind {
            sets.moderate_wind.push(index);
        }
    }
    sets
}
