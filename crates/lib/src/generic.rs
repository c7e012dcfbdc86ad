//! a generic `SHT3x` sensor. works for `SHT30`, `SHT31` and `SHT35`.

use embedded_hal::delay::DelayNs;

use crate::bus::TwoWire;
use crate::codec::{Codec, WORD_LEN};
use crate::commands::{self, Repeatability, Reset};
use crate::error::{ErrorFlags, Fault, Result};
use crate::status::Status;
use crate::{BUS_CLOCK_HZ, signal_to_celsius, signal_to_fahrenheit, signal_to_rh};

/// Whether checksum trailers of measurements are verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumMode {
    #[default]
    Enforce,
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn convert(self, code: u16) -> f32 {
        match self {
            TemperatureUnit::Celsius => signal_to_celsius(code),
            TemperatureUnit::Fahrenheit => signal_to_fahrenheit(code),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub checksum: ChecksumMode,
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// in `unit`.
    pub temperature: f32,
    pub unit: TemperatureUnit,
    /// relative humidity, in %.
    pub humidity: f32,
}

/// One sensor on a blocking two-wire bus.
///
/// Every fault a call runs into is also kept until [`Sensor::drain_errors`] is called.
pub struct Sensor<B, D> {
    codec: Codec<B>,
    delay: D,
    config: Config,
    last: Option<Measurement>,
}

impl<B: TwoWire, D: DelayNs> Sensor<B, D> {
    pub fn new(bus: B, delay: D, addr: u8) -> Self {
        Self {
            codec: Codec::new(bus, addr),
            delay,
            config: Config::default(),
            last: None,
        }
    }

    /// Brings the bus up at [`BUS_CLOCK_HZ`] and sends the general call reset command
    /// word (`0x0006`) to this sensor's own address.
    ///
    /// # Errors
    ///
    /// Will error if the reset could not be sent. The bus stays usable either way.
    pub fn begin(&mut self) -> Result<()> {
        self.codec.begin(BUS_CLOCK_HZ);
        info!("sht3x @ {:#x}: bus up at {} Hz", self.codec.address(), BUS_CLOCK_HZ);
        self.reset(Reset::GeneralCall.command())
    }

    pub fn address(&self) -> u8 {
        self.codec.address()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn configure(&mut self, config: Config) {
        self.config = config;
    }

    /// The last successful measurement.
    pub fn measurement(&self) -> Option<Measurement> {
        self.last
    }

    /// Probes the sensor's address.
    pub fn is_connected(&mut self) -> bool {
        match self.codec.probe() {
            Ok(()) => true,
            Err(_) => {
                self.codec.record(Fault::NotConnected);
                false
            }
        }
    }

    /// Only [`commands::SOFT_RESET`] and [`commands::GENERAL_CALL_RESET`] are accepted.
    ///
    /// # Errors
    ///
    /// Will error with [`Fault::WrongCommand`], without touching the bus, for any other
    /// command, and if the bus fails.
    pub fn reset(&mut self, command: u16) -> Result<()> {
        if Reset::from_command(command).is_none() {
            return Err(self.codec.fail(Fault::WrongCommand));
        }
        // special command, only ACKs, so no return data
        self.codec.write_command(command)
    }

    /// Runs a single shot measurement.
    ///
    /// `command` must be one of the non-stretching single shot commands, see
    /// [`Repeatability::command`]. On failure the previous measurement is kept.
    ///
    /// # Errors
    ///
    /// Will error with [`Fault::WrongCommand`] for any other command, on bus failures,
    /// and on a checksum mismatch while checksums are enforced.
    pub fn measure(&mut self, command: u16) -> Result<Measurement> {
        let Some(repeatability) = Repeatability::from_command(command) else {
            return Err(self.codec.fail(Fault::WrongCommand));
        };

        self.codec.write_command(command)?;
        self.delay.delay_ms(repeatability.conversion_time_ms());

        // datasheet section 4.5: T msb, T lsb, T crc, RH msb, RH lsb, RH crc
        let data = self.codec.read_bytes::<{ 2 * WORD_LEN }>()?;
        let (temp, humidity) = data.split_at(WORD_LEN);
        let temp = self.codec.word(temp, self.config.checksum)?;
        let humidity = self.codec.word(humidity, self.config.checksum)?;

        let measurement = Measurement {
            temperature: self.config.unit.convert(temp),
            unit: self.config.unit,
            humidity: signal_to_rh(humidity),
        };
        self.last = Some(measurement);
        Ok(measurement)
    }

    /// # Errors
    ///
    /// Will error if the bus fails.
    pub fn clear_status(&mut self) -> Result<()> {
        self.codec.write_command(commands::CLEAR_STATUS)
    }

    /// The status register, or [`Status::INVALID`] (`0xFFFF`) if it could not be read.
    pub fn read_status(&mut self) -> u16 {
        self.try_read_status().unwrap_or(Status::INVALID).bits()
    }

    /// Like [`Sensor::read_status`], but says why the read failed.
    ///
    /// The status checksum is always verified, whatever the configured [`ChecksumMode`].
    ///
    /// # Errors
    ///
    /// Will error if the bus fails or the checksum does not match.
    pub fn try_read_status(&mut self) -> Result<Status> {
        self.codec.write_command(commands::READ_STATUS)?;
        let data = self.codec.read_bytes::<WORD_LEN>()?;
        let status = self.codec.word(&data, ChecksumMode::Enforce)?;
        Ok(Status::from_bits(status))
    }

    /// Every fault seen since the last call, then starts over with none.
    pub fn drain_errors(&mut self) -> ErrorFlags {
        self.codec.drain_errors()
    }

    pub fn release(self) -> (B, D) {
        (self.codec.release(), self.delay)
    }
}
