//! Report-Schleife
//!
//! Wartet auf den Host, blinkt die Start-Sequenz und sendet dann endlos
//! alle `update_interval_secs` ein 3-Byte Paket mit Temperatur und Feuchte.
//!
//! Die Schleife kennt nur die Traits aus [`crate::traits`] und einen
//! asynchronen `DelayNs`. Auf dem ESP32 ist das `embassy_time::Delay`,
//! in Tests ein Mock der jede Pause mitschreibt.

use core::convert::Infallible;
use core::fmt;

use embedded_hal_async::delay::DelayNs;
use rgb::RGB8;

use crate::traits::{HostLink, Indicator, LinkError, Sensor, SensorError};
use crate::types::{Mode, OFF, Packet, STARTUP_SEQUENCE, STATUS_COLOR};

/// Wie lange auf den Host gewartet wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectWait {
    /// Endlos warten
    Forever,
    /// Nach so vielen Poll-Pausen aufgeben
    Polls(u32),
}

/// Laufzeit-Parameter der Schleife
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Pause zwischen zwei Reports
    pub update_interval_secs: u32,
    /// Abstand zwischen zwei Verbindungs-Checks
    pub connect_poll_secs: u32,
    pub connect_wait: ConnectWait,
    /// Haltezeit jeder Farbe der Start-Sequenz
    pub startup_flash_ms: u32,
    /// Haltezeit der Status-Farbe nach einem Paket (0 = sofort aus)
    pub status_flash_ms: u32,
    pub status_color: RGB8,
    pub mode: Mode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 5,
            connect_poll_secs: 1,
            connect_wait: ConnectWait::Forever,
            startup_flash_ms: 200,
            status_flash_ms: 0,
            status_color: STATUS_COLOR,
            mode: Mode::NoHeatHighPrecision,
        }
    }
}

/// Fehler der Report-Schleife
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Sensor antwortet nicht oder liefert kaputte Daten (fatal)
    SensorUnavailable(SensorError),
    /// Schreiben zum Host fehlgeschlagen (Zyklus wird übersprungen)
    LinkWriteFailed(LinkError),
    /// Host hat sich innerhalb von `ConnectWait::Polls` nicht verbunden
    ConnectionNeverEstablished,
}

impl From<SensorError> for ReportError {
    fn from(err: SensorError) -> Self {
        ReportError::SensorUnavailable(err)
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::SensorUnavailable(err) => write!(f, "sensor unavailable: {err}"),
            ReportError::LinkWriteFailed(err) => write!(f, "{err}"),
            ReportError::ConnectionNeverEstablished => f.write_str("host never connected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    AwaitingConnection,
    Connected,
}

/// Ergebnis eines einzelnen Zyklus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    Sent(Packet),
    /// Paket gebaut, aber Schreiben zum Host fehlgeschlagen
    Skipped(Packet),
}

/// Besitzt alle Hardware-Handles für die gesamte Laufzeit
pub struct ReportLoop<I, S, L, D> {
    indicator: I,
    sensor: S,
    link: L,
    delay: D,
    config: ReportConfig,
    state: LinkState,
    skipped_cycles: u32,
}

impl<I, S, L, D> ReportLoop<I, S, L, D>
where
    I: Indicator,
    S: Sensor,
    L: HostLink,
    D: DelayNs,
{
    pub fn new(indicator: I, sensor: S, link: L, delay: D, config: ReportConfig) -> Self {
        Self {
            indicator,
            sensor,
            link,
            delay,
            config,
            state: LinkState::AwaitingConnection,
            skipped_cycles: 0,
        }
    }

    /// Komplette Programm-Logik
    ///
    /// Kehrt nur mit einem Fehler zurück: `SensorUnavailable` oder
    /// `ConnectionNeverEstablished` (nur mit `ConnectWait::Polls`).
    pub async fn run(&mut self) -> Result<Infallible, ReportError> {
        self.wait_for_host().await?;
        self.signal_connected().await;
        self.configure_sensor()?;

        loop {
            self.cycle().await?;
        }
    }

    /// Pollt `is_connected()` bis der Host da ist
    ///
    /// Gibt die Anzahl der Poll-Pausen zurück.
    pub async fn wait_for_host(&mut self) -> Result<u32, ReportError> {
        let poll_ms = self.config.connect_poll_secs.saturating_mul(1_000);
        let mut waits = 0;

        while !self.link.is_connected() {
            if let ConnectWait::Polls(max) = self.config.connect_wait {
                if waits >= max {
                    error!("Host did not connect after {} polls", waits);
                    return Err(ReportError::ConnectionNeverEstablished);
                }
            }
            self.delay.delay_ms(poll_ms).await;
            waits += 1;
        }

        self.state = LinkState::Connected;
        info!("Host connected after {} polls", waits);
        Ok(waits)
    }

    /// Start-Sequenz: Rot → Grün → Blau → aus
    pub async fn signal_connected(&mut self) {
        for color in STARTUP_SEQUENCE {
            self.show(color);
            self.delay.delay_ms(self.config.startup_flash_ms).await;
        }
        self.show(OFF);
    }

    pub fn configure_sensor(&mut self) -> Result<(), ReportError> {
        self.sensor.configure(self.config.mode)?;
        info!("Sensor configured: {}", self.config.mode);
        Ok(())
    }

    /// Ein Zyklus: messen → Paket senden → Status blinken → schlafen
    pub async fn cycle(&mut self) -> Result<CycleOutcome, ReportError> {
        let reading = self.sensor.read()?;
        let packet = Packet::from_reading(reading);
        debug!("{} -> {}", reading, packet);

        let outcome = match self.link.write(&packet.to_bytes()) {
            Ok(()) => {
                self.flash_status().await;
                CycleOutcome::Sent(packet)
            }
            Err(err) => {
                warn!("Skipping cycle: {}", ReportError::LinkWriteFailed(err));
                self.skipped_cycles += 1;
                CycleOutcome::Skipped(packet)
            }
        };

        let interval_ms = self.config.update_interval_secs.saturating_mul(1_000);
        self.delay.delay_ms(interval_ms).await;
        Ok(outcome)
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Zyklen bei denen das Schreiben zum Host fehlschlug
    pub fn skipped_cycles(&self) -> u32 {
        self.skipped_cycles
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Gibt die Hardware-Handles zurück (z.B. um nach einem Fehler die LED zu setzen)
    pub fn into_parts(self) -> (I, S, L, D) {
        (self.indicator, self.sensor, self.link, self.delay)
    }

    async fn flash_status(&mut self) {
        self.show(self.config.status_color);
        if self.config.status_flash_ms > 0 {
            self.delay.delay_ms(self.config.status_flash_ms).await;
        }
        self.show(OFF);
    }

    fn show(&mut self, color: RGB8) {
        if let Err(err) = self.indicator.set_color(color) {
            error!("Failed to write to LED: {}", err);
        }
    }
}
