// Hardware Abstraction Layer (HAL) Module
//
// Implementierungen der sensor-core Traits für die ESP32-C6 Hardware.
// Der SHT4x-Treiber selbst lebt in sensor-core (nur embedded-hal).

pub mod host_link;
pub mod indicator;

pub use host_link::UsbHostLink;
pub use indicator::{LED_BUFFER_SIZE, RmtIndicator};
