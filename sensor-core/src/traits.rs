//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::fmt;

use rgb::RGB8;

use crate::types::{Mode, Reading};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Fehler-Typ für Sensor-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Treiber meldet einen Fehler (NACK, Arbitration, falsche Prüfsumme)
    I2c,
}

/// Fehler-Typ für die Host-Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    WriteFailed,
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LED write failed")
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::I2c => f.write_str("sensor did not respond on I2C"),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("host link write failed")
    }
}

/// Trait für die RGB-Status-LED
///
/// # Implementierungen
/// - **Production:** RmtIndicator (ESP32 RMT Peripheral, WS2812)
/// - **Testing:** MockIndicator (in-memory Mock)
pub trait Indicator {
    /// Setzt die LED sofort auf die Farbe
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError>;
}

/// Trait für den Temperatur-/Feuchte-Sensor
pub trait Sensor {
    /// Wählt den Messmodus (einmal beim Start)
    fn configure(&mut self, mode: Mode) -> Result<(), SensorError>;

    /// Blockiert bis eine Messung vorliegt
    fn read(&mut self) -> Result<Reading, SensorError>;
}

/// Trait für den Datenkanal zum Host
pub trait HostLink {
    /// Ist ein Host verbunden?
    fn is_connected(&mut self) -> bool;

    /// Schreibt die Bytes roh auf den Kanal
    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError>;
}
