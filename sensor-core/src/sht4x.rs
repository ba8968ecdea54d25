//! Sensirion SHT4x Sensor
//!
//! Dünne Hülle um den `sht4x-rjw` Treiber (blocking, `embedded-hal` 1.0).
//! Der Treiber kümmert sich um Kommando, Wartezeit, CRC-Prüfung und
//! Umrechnung. Hier wird nur auf das `Sensor` Trait abgebildet, damit die
//! Report-Schleife nichts vom konkreten Chip weiß.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use sht4x_rjw::blocking::SHT4x;

use crate::traits::{Sensor, SensorError};
use crate::types::{Mode, Reading};

pub struct Sht4x<I2C: I2c, D> {
    driver: SHT4x<I2C>,
    delay: D,
    mode: Mode,
}

impl<I2C: I2c, D: DelayNs> Sht4x<I2C, D> {
    /// Sensor an Adresse 0x44, hohe Präzision, Heizer aus
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            driver: SHT4x::new(i2c, Default::default()),
            delay,
            mode: Mode::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Einzelmessung, Feuchte auf 0..=100 % begrenzt
    pub fn measure(&mut self) -> Result<Reading, SensorError> {
        let measurement = self
            .driver
            .measure(&mut self.delay)
            .map_err(|_| SensorError::I2c)?;
        Ok(Reading {
            temperature: measurement.celsius() as f32,
            humidity: (measurement.humidity() as f32).clamp(0.0, 100.0),
        })
    }
}

impl<I2C: I2c, D: DelayNs> Sensor for Sht4x<I2C, D> {
    fn configure(&mut self, mode: Mode) -> Result<(), SensorError> {
        // Der Treiber misst immer mit seiner Standard-Konfiguration
        self.mode = mode;
        Ok(())
    }

    fn read(&mut self) -> Result<Reading, SensorError> {
        self.measure()
    }
}
