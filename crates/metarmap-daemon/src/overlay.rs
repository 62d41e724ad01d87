//! Base-frame rendering and transient hazard overlays.

use std::time::Duration;

use metarmap_core::{PanelState, Rgb};

use crate::driver::LedDriver;

/// How a hazard pass paints its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStyle {
    /// Replace the slot with a fixed color.
    Flat(Rgb),
    /// Halve the slot's own color, so a lit slot dims but never goes dark.
    HalfFade,
}

/// Push the whole panel to the driver as one frame.
pub fn render_base<D: LedDriver>(panel: &PanelState, driver: &mut D) {
    for (index, slot) in panel.slots().iter().enumerate() {
        driver.set_slot(index, slot.base);
    }
    driver.present();
}

/// One hazard pass: overlay the given slots, hold, then restore.
///
/// Restoration rewrites the panel's own colors, so the pass leaves no trace
/// no matter what it painted. An empty slot list does not touch the driver
/// at all.
pub async fn render_hazard_pass<D: LedDriver>(
    panel: &PanelState,
    driver: &mut D,
    slots: &[usize],
    style: OverlayStyle,
    hold: Duration,
) {
    if slots.is_empty() {
        return;
    }

    for &index in slots {
        let color = match style {
            OverlayStyle::Flat(color) => color,
            OverlayStyle::HalfFade => panel.slot(index).base.scaled(0.5),
        };
        driver.set_slot(index, color);
    }
    driver.present();

    tokio::time::sleep(hold).await;

    for &index in slots {
        driver.set_slot(index, panel.slot(index).base);
    }
    driver.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use metarmap_core::{SlotRegistry, SlotState};

    struct RecordingDriver {
        frame: Vec<Rgb>,
        frames: Vec<Vec<Rgb>>,
    }

    impl RecordingDriver {
        fn new(len: usize) -> Self {
            Self {
                frame: vec![Rgb::OFF; len],
                frames: Vec::new(),
            }
        }
    }

    impl LedDriver for RecordingDriver {
        fn set_slot(&mut self, index: usize, color: Rgb) {
            self.frame[index] = color;
        }

        fn present(&mut self) {
            self.frames.push(self.frame.clone());
        }

        fn set_brightness(&mut self, _level: u8) {}

        fn len(&self) -> usize {
            self.frame.len()
        }
    }

    fn panel_of(colors: &[Rgb]) -> PanelState {
        let stations: Vec<String> = (0..colors.len()).map(|i| format!("K{i:03}")).collect();
        let registry = SlotRegistry::new(&[], &stations);
        let mut panel = PanelState::new(&registry);
        for (index, &color) in colors.iter().enumerate() {
            panel.set(index, SlotState::steady(color));
        }
        panel
    }

    #[tokio::test]
    async fn flat_pass_paints_then_restores() {
        let panel = panel_of(&[Rgb::GREEN, Rgb::BLUE, Rgb::RED]);
        let mut driver = RecordingDriver::new(3);

        render_hazard_pass(
            &panel,
            &mut driver,
            &[0, 2],
            OverlayStyle::Flat(Rgb::WHITE),
            Duration::ZERO,
        )
        .await;

        assert_eq!(driver.frames.len(), 2);
        assert_eq!(driver.frames[0], vec![Rgb::WHITE, Rgb::OFF, Rgb::WHITE]);
        assert_eq!(driver.frames[1], vec![Rgb::GREEN, Rgb::OFF, Rgb::RED]);
    }

    #[tokio::test]
    async fn half_fade_keeps_lit_slots_lit() {
        let panel = panel_of(&[Rgb::GREEN]);
        let mut driver = RecordingDriver::new(1);

        render_hazard_pass(
            &panel,
            &mut driver,
            &[0],
            OverlayStyle::HalfFade,
            Duration::ZERO,
        )
        .await;

        assert_eq!(driver.frames[0][0], Rgb::new(0, 127, 0));
        assert_ne!(driver.frames[0][0], Rgb::OFF);
        assert_eq!(driver.frames[1][0], Rgb::GREEN);
    }

    #[tokio::test]
    async fn empty_slot_set_is_silent() {
        let panel = panel_of(&[Rgb::GREEN]);
        let mut driver = RecordingDriver::new(1);

        render_hazard_pass(
            &panel,
            &mut driver,
            &[],
            OverlayStyle::Flat(Rgb::WHITE),
            Duration::ZERO,
        )
        .await;

        assert!(driver.frames.is_empty());
    }

    #[tokio::test]
    async fn base_render_is_a_single_frame() {
        let panel = panel_of(&[Rgb::GREEN, Rgb::MAGENTA]);
        let mut driver = RecordingDriver::new(2);

        render_base(&panel, &mut driver);
        assert_eq!(driver.frames, vec![vec![Rgb::GREEN, Rgb::MAGENTA]]);
    }
}
