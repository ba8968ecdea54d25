//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::types::{DATA_MAX, PACKET_LEN, PACKET_MARKER, Packet};

/// Rundet einen Messwert auf die nächste ganze Zahl und klemmt ihn auf `0..=254`
///
/// Rundung: kaufmännisch (x.5 rundet auf). Werte unter 0 werden 0, NaN wird 0.
/// 255 ist für das Marker-Byte reserviert, größere Werte werden 254.
///
/// # Beispiele
///
/// ```
/// # use sensor_core::round_to_byte;
/// assert_eq!(round_to_byte(23.4), 23);
/// assert_eq!(round_to_byte(23.5), 24);
/// assert_eq!(round_to_byte(-3.2), 0);
/// assert_eq!(round_to_byte(300.0), 254);
/// ```
pub fn round_to_byte(value: f32) -> u8 {
    // `as u8` sättigt (NaN → 0)
    (libm::roundf(value) as u8).min(DATA_MAX)
}

/// Skaliert eine Farbe mit einem Helligkeitswert (255 = volle Helligkeit)
pub fn scale_brightness(color: RGB8, brightness: u8) -> RGB8 {
    let scale = |channel: u8| ((channel as u16 * brightness as u16) / 255) as u8;
    RGB8 {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

/// Umrechnung für die Anzeige auf Host-Seite
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Sucht im empfangenen Puffer das letzte vollständige Paket
///
/// Jede Position mit Marker-Byte, hinter der noch zwei Bytes folgen, zählt
/// als Paketanfang. Datenbytes sind höchstens 254, ein 0xFF ist also immer
/// ein Marker. Gibt `None` zurück, solange kein vollständiges Paket da ist.
///
/// # Beispiele
///
/// ```
/// # use sensor_core::{Packet, decode_latest};
/// let buffer = [0xFF, 21, 56, 0xFF, 22, 57, 0xFF];
/// assert_eq!(decode_latest(&buffer), Some(Packet { temperature: 22, humidity: 57 }));
/// ```
pub fn decode_latest(buffer: &[u8]) -> Option<Packet> {
    buffer
        .windows(PACKET_LEN)
        .rev()
        .find(|window| window[0] == PACKET_MARKER)
        .map(|window| Packet {
            temperature: window[1],
            humidity: window[2],
        })
}

/// Dezimalzahl aus einer Build-Zeit-Variable lesen, sonst `default`
///
/// Leere oder ungültige Werte (auch 0) fallen auf `default` zurück.
///
/// ```
/// # use sensor_core::parse_secs;
/// assert_eq!(parse_secs(Some("10"), 5), 10);
/// assert_eq!(parse_secs(None, 5), 5);
/// ```
pub const fn parse_secs(value: Option<&str>, default: u32) -> u32 {
    let bytes = match value {
        Some(value) => value.as_bytes(),
        None => return default,
    };
    if bytes.is_empty() {
        return default;
    }

    let mut result: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            return default;
        }
        result = match result.checked_mul(10) {
            Some(value) => value,
            None => return default,
        };
        result = match result.checked_add((digit - b'0') as u32) {
            Some(value) => value,
            None => return default,
        };
        i += 1;
    }

    if result == 0 { default } else { result }
}
