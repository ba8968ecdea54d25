// RGB Status-LED über RMT Peripheral (WS2812/Neopixel)
//
// Implementiert den Indicator-Trait aus sensor-core für die Onboard-LED.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use sensor_core::{Indicator, LedError, scale_brightness};
use smart_leds_trait::SmartLedsWrite;

// Buffer-Größe für 1 LED (3 Farben * 8 Bits + 1 Reset)
pub const LED_BUFFER_SIZE: usize = 25;

/// Real Hardware Indicator
///
/// Nutzt ESP32 RMT Peripheral um die WS2812 LED anzusteuern.
/// Jede Farbe wird vor dem Schreiben auf `brightness` skaliert.
///
/// Hinweis: Der Buffer muss länger leben als der Indicator, daher wird er im
/// Task erstellt und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtIndicator<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    brightness: u8,
}

impl<'a> RmtIndicator<'a> {
    /// Erstellt einen neuen RmtIndicator
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `brightness`: Helligkeit 0-255
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(1) Macro)
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        brightness: u8,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LED_BUFFER_SIZE],
    ) -> Self {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> =
            Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz)).unwrap();

        // SmartLED Adapter erstellen
        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Self { led, brightness }
    }
}

impl<'a> Indicator for RmtIndicator<'a> {
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError> {
        let scaled = scale_brightness(color, self.brightness);
        self.led
            .write([scaled].into_iter())
            .map_err(|_| LedError::WriteFailed)
    }
}
