// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use rgb::RGB8;
use sensor_core::{ConnectWait, Mode, ReportConfig, STATUS_COLOR, parse_secs};

// ============================================================================
// Report Konfiguration
// ============================================================================

/// Standard-Intervall zwischen zwei Reports in Sekunden
pub const DEFAULT_UPDATE_INTERVAL_SECS: u32 = 5;

/// Intervall zwischen zwei Reports in Sekunden
/// Kann zur Build-Zeit über UPDATE_INTERVAL_SECS (.env) überschrieben werden
pub const UPDATE_INTERVAL_SECS: u32 =
    parse_secs(option_env!("UPDATE_INTERVAL_SECS"), DEFAULT_UPDATE_INTERVAL_SECS);

/// Abstand zwischen zwei Verbindungs-Checks in Sekunden
pub const CONNECT_POLL_SECS: u32 = 1;

/// Haltezeit jeder Farbe der Start-Sequenz in Millisekunden
pub const STARTUP_FLASH_MS: u32 = 200;

/// Haltezeit der Status-Farbe nach einem Paket in Millisekunden
/// 0 = setzen und sofort wieder aus
pub const STATUS_FLASH_MS: u32 = 0;

/// Parameter für die Report-Schleife
pub const REPORT_CONFIG: ReportConfig = ReportConfig {
    update_interval_secs: UPDATE_INTERVAL_SECS,
    connect_poll_secs: CONNECT_POLL_SECS,
    connect_wait: ConnectWait::Forever,
    startup_flash_ms: STARTUP_FLASH_MS,
    status_flash_ms: STATUS_FLASH_MS,
    status_color: STATUS_COLOR,
    mode: Mode::NoHeatHighPrecision,
};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die RGB LED (WS2812/Neopixel)
pub const LED_GPIO_PIN: u8 = 8;

/// Helligkeits-Level für die LED (0-255)
/// 51 ≈ 20 % Helligkeit
pub const LED_BRIGHTNESS: u8 = 51;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = 1;

/// Farbe nach einem fatalen Fehler (Sensor weg, Host nie verbunden)
pub const FAULT_COLOR: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

// ============================================================================
// Sensor Konfiguration
// ============================================================================

/// GPIO-Pin für I2C SDA
pub const SENSOR_SDA_GPIO_PIN: u8 = 6;

/// GPIO-Pin für I2C SCL
pub const SENSOR_SCL_GPIO_PIN: u8 = 7;

/// I2C Bus-Frequenz in kHz
pub const SENSOR_I2C_FREQ_KHZ: u32 = 400;
