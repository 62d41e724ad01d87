//! The display control loop.
//!
//! One loop owns the panel, the driver, and the upstream source. Every tick
//! it replays hazard overlays; on its own slower cadence it refreshes the
//! weather data. Connectivity is shown on the strip itself: orange while
//! waiting for the link, cyan once the link is up and the first fetch is
//! pending.

use async_trait::async_trait;
use tokio::time::{interval, sleep, MissedTickBehavior};

use metarmap_awc::{AwcClient, FetchError};
use metarmap_core::{
    parse_payload, resolve, HazardSets, PanelState, Rgb, SlotRegistry, StationReport, WindRules,
};

use crate::config::Config;
use crate::driver::LedDriver;
use crate::overlay::{render_base, render_hazard_pass, OverlayStyle};

/// Where the loop currently stands. `Connecting` and `Fetching` resolve
/// within a single tick; the others persist across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    ConnectedIdle,
    Fetching,
    RetryBackoff,
}

/// Upstream weather data, behind a seam so the loop runs against fakes.
#[async_trait]
pub trait WeatherSource {
    /// Bounded reachability check.
    async fn probe(&self) -> Result<(), FetchError>;
    /// One observation fetch for the given stations.
    async fn fetch(&self, stations: &[String]) -> Result<String, FetchError>;
}

#[async_trait]
impl WeatherSource for AwcClient {
    async fn probe(&self) -> Result<(), FetchError> {
        AwcClient::probe(self).await
    }

    async fn fetch(&self, stations: &[String]) -> Result<String, FetchError> {
        AwcClient::fetch(self, stations).await
    }
}

/// Drives one indicator strip for the life of the process.
pub struct DisplayLoop<S, D> {
    config: Config,
    rules: WindRules,
    registry: SlotRegistry,
    panel: PanelState,
    hazards: HazardSets,
    source: S,
    driver: D,
    phase: Phase,
    ticks_since_fetch: u32,
    fetched_once: bool,
}

impl<S: WeatherSource, D: LedDriver> DisplayLoop<S, D> {
    pub fn new(config: Config, source: S, driver: D) -> Self {
        let registry = config.registry();
        let panel = PanelState::new(&registry);
        let rules = config.hazards.wind_rules();
        Self {
            config,
            rules,
            registry,
            panel,
            hazards: HazardSets::default(),
            source,
            driver,
            phase: Phase::Disconnected,
            ticks_since_fetch: 0,
            fetched_once: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn hazards(&self) -> &HazardSets {
        &self.hazards
    }

    /// Run forever at the configured tick.
    pub async fn run(mut self) {
        self.driver.set_brightness(self.config.display.brightness);
        let mut ticker = interval(self.config.tick());
        // Overlay holds and retry sleeps run inside a tick; don't burst
        // catch-up ticks afterwards.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One control-loop iteration. Public so tests can step the loop
    /// without real time.
    pub async fn tick(&mut self) {
        if self.phase == Phase::Disconnected {
            self.try_connect().await;
            return;
        }

        self.replay_hazards().await;

        self.ticks_since_fetch = self.ticks_since_fetch.saturating_add(1);
        if self.fetch_due() {
            self.run_fetch_cycle().await;
        }
    }

    fn fetch_due(&self) -> bool {
        !self.fetched_once || self.ticks_since_fetch >= self.config.display.fetch_every_ticks
    }

    async fn try_connect(&mut self) {
        self.phase = Phase::Connecting;
        self.show_status(Rgb::ORANGE);
        match self.source.probe().await {
            Ok(()) => {
                tracing::info!("Weather source reachable");
                self.show_status(Rgb::CYAN);
                self.phase = Phase::ConnectedIdle;
                self.fetched_once = false;
                self.ticks_since_fetch = 0;
            }
            Err(err) => {
                tracing::warn!("Weather source unreachable: {}", err);
                self.phase = Phase::Disconnected;
            }
        }
    }

    /// Paint a uniform status color. Status frames carry no hazards.
    fn show_status(&mut self, color: Rgb) {
        self.panel.fill(color);
        self.hazards = HazardSets::default();
        render_base(&self.panel, &mut self.driver);
    }

    async fn run_fetch_cycle(&mut self) {
        self.phase = Phase::Fetching;
        let stations = self.registry.station_codes();
        match self.source.fetch(&stations).await {
            Ok(payload) => match parse_payload(&payload) {
                Ok(reports) => self.apply_reports(&reports),
                Err(err) => {
                    tracing::warn!("Discarding unparseable payload: {}", err);
                    self.enter_retry_backoff().await;
                }
            },
            Err(err) if err.is_connect() => {
                tracing::warn!("Lost connection to weather source: {}", err);
                self.phase = Phase::Disconnected;
            }
            Err(err) => {
                tracing::warn!("Fetch failed: {}", err);
                self.enter_retry_backoff().await;
            }
        }
    }

    fn apply_reports(&mut self, reports: &[StationReport]) {
        for report in reports {
            tracing::debug!(
                "{}: {} wind {} gust {} kt",
                report.station_id,
                report.flight_category,
                report.wind_speed_kt,
                report.wind_gust_kt
            );
        }

        self.hazards = resolve(&self.registry, &self.rules, reports, &mut self.panel);
        self.ticks_since_fetch = 0;
        self.fetched_once = true;
        self.phase = Phase::ConnectedIdle;
        render_base(&self.panel, &mut self.driver);

        tracing::info!(
            "Cycle complete: {} reports, {} lightning / {} severe wind / {} moderate wind slots",
            reports.len(),
            self.hazards.lightning.len(),
            self.hazards.severe_wind.len(),
            self.hazards.moderate_wind.len()
        );
    }

    /// A failed exchange: keep the shown state, wait out the retry delay,
    /// and leave the fetch counter alone so the next tick tries again.
    async fn enter_retry_backoff(&mut self) {
        self.phase = Phase::RetryBackoff;
        sleep(self.config.retry_delay()).await;
    }

    async fn replay_hazards(&mut self) {
        let hold = self.config.overlay_hold();
        if self.config.hazards.lightning {
            render_hazard_pass(
                &self.panel,
                &mut self.driver,
                &self.hazards.lightning,
                OverlayStyle::Flat(Rgb::WHITE),
                hold,
            )
            .await;
        }
        if self.config.hazards.wind {
            render_hazard_pass(
                &self.panel,
                &mut self.driver,
                &self.hazards.severe_wind,
                OverlayStyle::Flat(Rgb::YELLOW),
                hold,
            )
            .await;
            let moderate_style = if self.config.hazards.wind_fade {
                OverlayStyle::HalfFade
            } else {
                OverlayStyle::Flat(Rgb::OFF)
            };
            render_hazard_pass(
                &self.panel,
                &mut self.driver,
                &self.hazards.moderate_wind,
                moderate_style,
                hold,
            )
            .await;
        }
    }
}
