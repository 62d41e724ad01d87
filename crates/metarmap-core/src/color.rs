//! Indicator colors.

/// One indicator color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    // ========== Palette ==========

    /// All channels off.
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    /// VFR conditions.
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    /// MVFR conditions.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// IFR conditions.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// LIFR conditions.
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    /// Lightning flash.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// High wind flash.
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    /// Waiting for the network link.
    pub const ORANGE: Rgb = Rgb::new(255, 128, 0);
    /// Link up, first fetch pending.
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    /// Scale every channel by `factor`, clamped to `0.0..=1.0`.
    pub fn scaled(self, factor: f32) -> Rgb {
        let factor = factor.clamp(0.0, 1.0);
        Rgb::new(
            (self.r as f32 * factor) as u8,
            (self.g as f32 * factor) as u8,
            (self.b as f32 * factor) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_halves_each_channel() {
        let half = Rgb::new(200, 100, 50).scaled(0.5);
        assert_eq!(half, Rgb::new(100, 50, 25));
    }

    #[test]
    fn scaled_clamps_factor() {
        assert_eq!(Rgb::WHITE.scaled(2.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.scaled(-1.0), Rgb::OFF);
    }

    #[test]
    fn scaled_to_zero_is_off() {
        assert_eq!(Rgb::MAGENTA.scaled(0.0), Rgb::OFF);
    }
}
