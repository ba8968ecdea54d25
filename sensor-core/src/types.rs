//! Core Types für den Klima-Sensor
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

use crate::logic::round_to_byte;

/// Marker-Byte am Anfang jedes Pakets
pub const PACKET_MARKER: u8 = 0xFF;

/// Größter Datenwert, damit kein Datenbyte wie ein Marker aussieht
pub const DATA_MAX: u8 = PACKET_MARKER - 1;

/// Paketlänge auf der Leitung (Marker + Temperatur + Feuchte)
pub const PACKET_LEN: usize = 3;

/// Status-Farbe: blinkt nach jedem gesendeten Paket (MTD Blau)
pub const STATUS_COLOR: RGB8 = RGB8 {
    r: 0,
    g: 47,
    b: 135,
};

/// LED aus
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Start-Sequenz nach Host-Verbindung: Rot → Grün → Blau
pub const STARTUP_SEQUENCE: [RGB8; 3] = [
    RGB8 { r: 255, g: 0, b: 0 },
    RGB8 { r: 0, g: 255, b: 0 },
    RGB8 { r: 0, g: 0, b: 255 },
];

/// Ein Messwert des Sensors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Temperatur in °C
    pub temperature: f32,
    /// Relative Luftfeuchte in %
    pub humidity: f32,
}

/// 3-Byte Report-Paket: `[0xFF, temperatur, feuchte]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    pub temperature: u8,
    pub humidity: u8,
}

impl Packet {
    /// Rundet beide Werte und baut das Paket
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use sensor_core::{Packet, Reading};
    /// let packet = Packet::from_reading(Reading { temperature: 21.2, humidity: 55.7 });
    /// assert_eq!(packet.to_bytes(), [0xFF, 21, 56]);
    /// ```
    pub fn from_reading(reading: Reading) -> Self {
        Self {
            temperature: round_to_byte(reading.temperature),
            humidity: round_to_byte(reading.humidity),
        }
    }

    pub fn to_bytes(self) -> [u8; PACKET_LEN] {
        [PACKET_MARKER, self.temperature, self.humidity]
    }
}

/// SHT4x Messmodus
///
/// Der Kiosk misst nur mit hoher Präzision und ohne Heizer. Die Heizer-Modi
/// des Chips sind für Entfeuchtung gedacht und werden hier nicht angeboten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    NoHeatHighPrecision,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::NoHeatHighPrecision => "No heater, high precision",
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Reading {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Reading {{ temperature: {} C, humidity: {}% }}",
            self.temperature,
            self.humidity
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Packet {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Packet [{=u8:#x}, {}, {}]",
            PACKET_MARKER,
            self.temperature,
            self.humidity
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_marker_first() {
        let packet = Packet::from_reading(Reading {
            temperature: 0.0,
            humidity: 0.0,
        });
        assert_eq!(packet.to_bytes(), [PACKET_MARKER, 0, 0]);
    }

    #[test]
    fn test_default_mode_is_high_precision() {
        assert_eq!(Mode::default(), Mode::NoHeatHighPrecision);
        assert_eq!(Mode::default().name(), "No heater, high precision");
    }

    #[test]
    fn test_startup_sequence_order() {
        assert_eq!(STARTUP_SEQUENCE[0], RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(STARTUP_SEQUENCE[1], RGB8 { r: 0, g: 255, b: 0 });
        assert_eq!(STARTUP_SEQUENCE[2], RGB8 { r: 0, g: 0, b: 255 });
    }
}
