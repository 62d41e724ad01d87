//! Daemon configuration: one TOML file plus environment overrides.
//!
//! ```toml
//! [panel]
//! stations = ["KSEA", "KBFI", "NULL", "KPDX"]
//! show_legend = true
//!
//! [source]
//! base_url = "https://aviationweather.gov"
//! format = "json"
//!
//! [display]
//! brightness = 128
//! tick_ms = 5000
//! fetch_every_ticks = 60
//!
//! [hazards]
//! wind_fade = true
//! severe_kt = 25
//! ```
//!
//! Every key is optional; omitted sections take the defaults below.
//! `METARMAP_URL` overrides `source.base_url` for quick redirection to a
//! test server.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use metarmap_awc::PayloadFormat;
use metarmap_core::{standard_legend, SlotRegistry, WindRules};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub panel: PanelConfig,
    pub source: SourceConfig,
    pub display: DisplayConfig,
    pub hazards: HazardConfig,
}

/// Slot layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// One station per slot after the legend; `"NULL"` leaves a gap.
    pub stations: Vec<String>,
    /// Light the six-entry legend prefix.
    pub show_legend: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            stations: Vec::new(),
            show_legend: true,
        }
    }
}

/// Upstream data API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub format: PayloadFormat,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://aviationweather.gov".to_string(),
            format: PayloadFormat::Json,
            connect_timeout_ms: 10_000,
            read_timeout_ms: 10_000,
        }
    }
}

/// Render cadence and output scaling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Output scale, 255 is full brightness.
    pub brightness: u8,
    /// Base tick driving overlay replay and the fetch counter.
    pub tick_ms: u64,
    /// Refresh weather data every N ticks.
    pub fetch_every_ticks: u32,
    /// Wait after a failed fetch before the quick retry.
    pub retry_delay_ms: u64,
    /// Dwell of each hazard overlay pass.
    pub overlay_hold_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            brightness: 128,
            tick_ms: 5_000,
            fetch_every_ticks: 60,
            retry_delay_ms: 15_000,
            overlay_hold_ms: 700,
        }
    }
}

/// Hazard overlay behavior and wind thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub lightning: bool,
    pub wind: bool,
    /// Fade moderate-wind slots to half brightness instead of blinking
    /// them dark.
    pub wind_fade: bool,
    pub moderate_kt: u32,
    pub severe_kt: u32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        let rules = WindRules::default();
        Self {
            lightning: true,
            wind: true,
            wind_fade: true,
            moderate_kt: rules.moderate_kt,
            severe_kt: rules.severe_kt,
        }
    }
}

impl HazardConfig {
    pub fn wind_rules(&self) -> WindRules {
        WindRules {
            moderate_kt: self.moderate_kt,
            severe_kt: self.severe_kt,
        }
    }
}

impl Config {
    /// Load from a TOML file, or start from defaults when no path is
    /// given, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: Config = match path {
            Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
            None => Config::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("METARMAP_URL") {
            if !url.trim().is_empty() {
                self.source.base_url = url;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rules = self.hazards.wind_rules();
        if !rules.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "severe_kt ({}) must not sit below moderate_kt ({})",
                rules.severe_kt, rules.moderate_kt
            )));
        }
        if self.display.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be nonzero".to_string()));
        }
        if self.display.fetch_every_ticks == 0 {
            return Err(ConfigError::Invalid(
                "fetch_every_ticks must be nonzero".to_string(),
            ));
        }
        // Three overlay passes must fit inside one tick.
        if self.display.overlay_hold_ms.saturating_mul(3) > self.display.tick_ms {
            return Err(ConfigError::Invalid(format!(
                "overlay_hold_ms ({}) is too long for tick_ms ({})",
                self.display.overlay_hold_ms, self.display.tick_ms
            )));
        }
        Ok(())
    }

    /// Registry built from the configured layout.
    pub fn registry(&self) -> SlotRegistry {
        let legend = if self.panel.show_legend {
            standard_legend()
        } else {
            Vec::new()
        };
        SlotRegistry::new(&legend, &self.panel.stations)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.display.tick_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.display.retry_delay_ms)
    }

    pub fn overlay_hold(&self) -> Duration {
        Duration::from_millis(self.display.overlay_hold_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.source.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.source.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source.format, PayloadFormat::Json);
        assert_eq!(config.hazards.wind_rules(), WindRules::default());
        assert_eq!(config.display.brightness, 128);
    }

    #[test]
    fn partial_files_keep_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r#"
            [panel]
            stations = ["ksea", "NULL", "KPDX"]

            [source]
            format = "xml"

            [hazards]
            severe_kt = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.source.format, PayloadFormat::Xml);
        assert_eq!(config.source.base_url, "https://aviationweather.gov");
        assert_eq!(config.hazards.severe_kt, 30);
        assert_eq!(config.hazards.moderate_kt, 15);
        assert_eq!(config.display.tick_ms, 5_000);

        let registry = config.registry();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.station_codes(), vec!["KSEA", "KPDX"]);
    }

    #[test]
    fn legend_can_be_disabled() {
        let config: Config = toml::from_str("[panel]\nshow_legend = false").unwrap();
        assert_eq!(config.registry().legend_len(), 0);
    }

    #[test]
    fn inverted_wind_thresholds_are_rejected() {
        let config: Config =
            toml::from_str("[hazards]\nmoderate_kt = 30\nsevere_kt = 20").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_overlay_hold_is_rejected() {
        let config: Config =
            toml::from_str("[display]\ntick_ms = 1000\noverlay_hold_ms = 400").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let config: Config = toml::from_str("[display]\nfetch_every_ticks = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn env_var_overrides_the_base_url() {
        std::env::set_var("METARMAP_URL", "http://localhost:9090");
        let config = Config::load(None).unwrap();
        std::env::remove_var("METARMAP_URL");
        assert_eq!(config.source.base_url, "http://localhost:9090");
    }
}
