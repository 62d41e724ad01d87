//! Indicator hardware seam and the built-in drivers.

use metarmap_core::Rgb;

/// Addressable indicator strip output.
///
/// Implementations buffer `set_slot` writes until `present` pushes the
/// whole frame out, so a frame is never shown half-painted.
pub trait LedDriver {
    /// Buffer one slot's color.
    fn set_slot(&mut self, index: usize, color: Rgb);
    /// Push the buffered frame to the device.
    fn present(&mut self);
    /// Scale all output; 255 is full brightness.
    fn set_brightness(&mut self, level: u8);
    /// Number of addressable slots.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders the strip as a line of truecolor blocks on stdout.
pub struct ConsoleDriver {
    frame: Vec<Rgb>,
    brightness: u8,
}

impl ConsoleDriver {
    pub fn new(len: usize) -> Self {
        Self {
            frame: vec![Rgb::OFF; len],
            brightness: 255,
        }
    }
}

impl LedDriver for ConsoleDriver {
    fn set_slot(&mut self, index: usize, color: Rgb) {
        if let Some(slot) = self.frame.get_mut(index) {
            *slot = color;
        }
    }

    fn present(&mut self) {
        let mut line = String::with_capacity(self.frame.len() * 24);
        for color in &self.frame {
            let scaled = color.scaled(self.brightness as f32 / 255.0);
            line.push_str(&format!(
                "\x1b[48;2;{};{};{}m  ",
                scaled.r, scaled.g, scaled.b
            ));
        }
        line.push_str("\x1b[0m");
        println!("{line}");
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn len(&self) -> usize {
        self.frame.len()
    }
}

/// Discards every frame; for headless runs and smoke tests.
pub struct NullDriver {
    len: usize,
}

impl NullDriver {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl LedDriver for NullDriver {
    fn set_slot(&mut self, _index: usize, _color: Rgb) {}

    fn present(&mut self) {}

    fn set_brightness(&mut self, _level: u8) {}

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_driver_ignores_out_of_range_slots() {
        let mut driver = ConsoleDriver::new(2);
        driver.set_slot(5, Rgb::RED);
        assert_eq!(driver.len(), 2);
        assert!(!driver.is_empty());
    }

    #[test]
    fn null_driver_reports_its_size() {
        let driver = NullDriver::new(0);
        assert!(driver.is_empty());
    }
}
