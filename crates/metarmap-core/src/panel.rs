//! Authoritative per-slot visual state.

use crate::color::Rgb;
use crate::registry::SlotRegistry;

/// Composite state of one slot: the steady base color plus the hazard
/// flags that schedule transient overlays on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotState {
    pub base: Rgb,
    pub lightning: bool,
    pub severe_wind: bool,
    pub moderate_wind: bool,
}

impl SlotState {
    /// No data: off, no hazards.
    pub const fn off() -> Self {
        Self {
            base: Rgb::OFF,
            lightning: false,
            severe_wind: false,
            moderate_wind: false,
        }
    }

    /// Steady color with no hazards (legend slots, status fills).
    pub const fn steady(base: Rgb) -> Self {
        Self {
            base,
            lightning: false,
            severe_wind: false,
            moderate_wind: false,
        }
    }
}

/// Current visual state for every slot on the strip.
///
/// This is the single source of truth the renderer reads from. Writers
/// replace whole slots; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    slots: Vec<SlotState>,
}

impl PanelState {
    /// Initial state: legend colors lit, everything else off.
    pub fn new(registry: &SlotRegistry) -> Self {
        let mut panel = Self {
            slots: vec![SlotState::off(); registry.len()],
        };
        panel.reset_for_cycle(registry);
        panel
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> SlotState {
        self.slots[index]
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    pub fn set(&mut self, index: usize, state: SlotState) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = state;
        }
    }

    /// Uniform status color across the whole strip.
    pub fn fill(&mut self, color: Rgb) {
        for slot in &mut self.slots {
            *slot = SlotState::steady(color);
        }
    }

    /// Start a fresh cycle: legend colors re-asserted, every other slot
    /// back to "no data". Stations absent from the next batch read as off
    /// without any bookkeeping.
    pub fn reset_for_cycle(&mut self, registry: &SlotRegistry) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = match registry.legend_color(index) {
                Some(color) => SlotState::steady(color),
                None => SlotState::off(),
            };
        }
    }
}
