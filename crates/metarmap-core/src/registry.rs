//! Slot layout: which indicator position shows what.

use crate::color::Rgb;

/// Configuration sentinel for a physical position with no display duty.
pub const GAP_SENTINEL: &str = "NULL";

/// What one indicator position is wired to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEntry {
    /// Fixed legend color, lit at startup and never driven by weather.
    Legend { color: Rgb },
    /// Shows the named station's current state.
    Station { icao: String },
    /// Intentional hole in the layout; never matches any station.
    Gap,
}

/// Ordered mapping from slot index to duty, fixed for the process lifetime.
///
/// Legend entries occupy the prefix. A station may be wired to more than
/// one slot; `slots_for_station` returns every index in order.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    entries: Vec<SlotEntry>,
    legend_len: usize,
}

impl SlotRegistry {
    /// Build from the legend prefix and the configured station list.
    ///
    /// Station codes are trimmed and uppercased; `"NULL"` or an empty
    /// string marks a gap.
    pub fn new(legend: &[Rgb], stations: &[String]) -> Self {
        let mut entries = Vec::with_capacity(legend.len() + stations.len());
        for &color in legend {
            entries.push(SlotEntry::Legend { color });
        }
        for code in stations {
            let code = code.trim().to_ascii_uppercase();
            if code.is_empty() || code == GAP_SENTINEL {
                entries.push(SlotEntry::Gap);
            } else {
                entries.push(SlotEntry::Station { icao: code });
            }
        }
        Self {
            entries,
            legend_len: legend.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn legend_len(&self) -> usize {
        self.legend_len
    }

    pub fn entry(&self, index: usize) -> Option<&SlotEntry> {
        self.entries.get(index)
    }

    /// Legend color for a slot, when it is a legend slot.
    pub fn legend_color(&self, index: usize) -> Option<Rgb> {
        match self.entries.get(index) {
            Some(SlotEntry::Legend { color }) => Some(*color),
            _ => None,
        }
    }

    /// Every slot index wired to the given station code.
    pub fn slots_for_station(&self, code: &str) -> Vec<usize> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || code == GAP_SENTINEL {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                SlotEntry::Station { icao } if *icao == code => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Unique station codes in first-seen order; this is the fetch query.
    pub fn station_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for entry in &self.entries {
            if let SlotEntry::Station { icao } = entry {
                if !codes.iter().any(|existing| existing == icao) {
                    codes.push(icao.clone());
                }
            }
        }
        codes
    }
}

/// The standard six-entry legend: VFR, MVFR, IFR, LIFR, lightning, wind.
pub fn standard_legend() -> Vec<Rgb> {
    vec![
        Rgb::GREEN,
        Rgb::BLUE,
        Rgb::RED,
        Rgb::MAGENTA,
        Rgb::WHITE,
        Rgb::YELLOW,
    ]
}
