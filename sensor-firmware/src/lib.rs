// Library-Root: Hardware-Implementierungen und Tasks
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von sensor-core
pub use sensor_core::{
    HostLink, Indicator, LedError, LinkError, Mode, Packet, Reading, ReportConfig, ReportError,
    ReportLoop, Sensor, SensorError, Sht4x,
};
