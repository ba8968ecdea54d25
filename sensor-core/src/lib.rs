//! Sensor Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Pure Functions, die SHT4x-Anbindung
//! (`sht4x-rjw` über `embedded-hal`) und die Report-Schleife.

#![no_std]

// Muss zuerst kommen, damit die Makros in allen Modulen sichtbar sind
#[macro_use]
mod fmt;

pub mod logic;
pub mod report;
pub mod sht4x;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use logic::{
    celsius_to_fahrenheit, decode_latest, parse_secs, round_to_byte, scale_brightness,
};
pub use report::{ConnectWait, CycleOutcome, LinkState, ReportConfig, ReportError, ReportLoop};
pub use sht4x::Sht4x;
pub use traits::{HostLink, Indicator, LedError, LinkError, Sensor, SensorError};
pub use types::{
    DATA_MAX, Mode, OFF, PACKET_LEN, PACKET_MARKER, Packet, Reading, STARTUP_SEQUENCE,
    STATUS_COLOR,
};
