// Report Task - Sensor lesen, Pakete an den Host senden, LED blinken
use defmt::{error, info};
use embassy_time::{Delay, Duration, Timer};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal_smartled::smart_led_buffer;
use sensor_core::{HostLink, Indicator, ReportLoop, Sensor, Sht4x};

use crate::config::{
    FAULT_COLOR, LED_BRIGHTNESS, REPORT_CONFIG, RMT_CLOCK_MHZ, SENSOR_I2C_FREQ_KHZ,
};
use crate::hal::{RmtIndicator, UsbHostLink};

/// Report Logic - Fehlerbehandlung um die Report-Schleife
///
/// Läuft die Report-Schleife aus sensor-core. Kehrt diese mit einem Fehler
/// zurück (Sensor nicht erreichbar), wird der Fehler geloggt, die LED rot
/// gesetzt und der Task parkt für immer. Es gibt keinen Neustart-Versuch.
///
/// Die Schleife selbst ist in sensor-core und wird dort mit Mocks getestet.
/// Diese Funktion hängt an `embassy_time` und läuft nur auf dem Target.
pub async fn report_logic<I, S, L>(mut report: ReportLoop<I, S, L, Delay>) -> !
where
    I: Indicator,
    S: Sensor,
    L: HostLink,
{
    info!(
        "Report loop: interval {}s, mode {}",
        report.config().update_interval_secs,
        report.config().mode
    );

    let err = match report.run().await {
        Ok(never) => match never {},
        Err(err) => err,
    };
    error!("Report loop stopped: {}", err);

    // Fehler sichtbar machen statt still zu hängen
    let (mut indicator, _, _, _) = report.into_parts();
    if indicator.set_color(FAULT_COLOR).is_err() {
        error!("Failed to write to LED");
    }

    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

/// Report Task - Embassy Task
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// `report_logic()` auf.
///
/// # Parameter
/// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `i2c0`: I2C0 Peripheral für den SHT4x
/// - `sda`, `scl`: I2C Pins
/// - `usb_device`: USB-Serial-JTAG Peripheral für den Host-Kanal
#[embassy_executor::task]
pub async fn report_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO6<'static>,
    scl: esp_hal::peripherals::GPIO7<'static>,
    usb_device: esp_hal::peripherals::USB_DEVICE<'static>,
) {
    // Buffer für SmartLED Daten erstellen (1 LED)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(1);
    let indicator = RmtIndicator::new(
        gpio8,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        LED_BRIGHTNESS,
        &mut rmt_buffer,
    );

    // I2C Bus für den Sensor (blocking, Messung dauert nur ~10 ms)
    let i2c = I2c::new(
        i2c0,
        I2cConfig::default().with_frequency(Rate::from_khz(SENSOR_I2C_FREQ_KHZ)),
    )
    .unwrap()
    .with_sda(sda)
    .with_scl(scl);

    let sensor = Sht4x::new(i2c, esp_hal::delay::Delay::new());

    let link = UsbHostLink::new(usb_device);

    let report = ReportLoop::new(indicator, sensor, link, Delay, REPORT_CONFIG);
    report_logic(report).await
}
