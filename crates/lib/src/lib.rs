//! Blocking single-shot driver for the Sensirion `SHT3x` (`SHT30`, `SHT31`, `SHT35`)
//! humidity and temperature sensors.
//!
//! [Datasheet SHT3x-DIS](https://sensirion.com/media/documents/213E6A3B/63A5A569/Datasheet_SHT3x_DIS.pdf)
//!
//! The driver is generic over a [`TwoWire`] bus and an [`embedded_hal::delay::DelayNs`].
//! Any `embedded_hal::i2c::I2c` can be used as a bus through [`HalBus`].
//!
//! Every operation returns its outcome directly and also ORs any fault it hit into
//! an accumulator, which [`Sensor::drain_errors`] hands back and clears.
#![cfg_attr(not(test), no_std)]

pub(crate) mod fmt;

pub mod bus;
mod codec;
pub mod commands;
mod error;
pub mod generic;
pub mod model_addrs;
pub mod models;
mod status;

#[cfg(test)]
mod testing;

use crc::{Algorithm, Crc};

pub use bus::{EndTransmission, HalBus, TwoWire};
pub use commands::{Repeatability, Reset};
pub use error::{ErrorFlags, Fault, Result};
pub use generic::{ChecksumMode, Config, Measurement, Sensor, TemperatureUnit};
pub use models::{Sht30, Sht31, Sht35};
pub use status::Status;

/// The bus clock the sensor is driven at.
pub const BUS_CLOCK_HZ: u32 = 100_000;

// SHT3x section 4.12
/// The CRC-8 algorithm Sensirion uses for every 16-bit word it sends or receives.
pub const CRC_8_SENSIRION: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_SENSIRION);

/// Checksum of a data word, as sent in the trailer byte after it.
pub fn checksum(bytes: &[u8]) -> u8 {
    CRC.checksum(bytes)
}

// section 4.13, equation 1
/// Relative humidity in percent. Codes near the top of the range may come out slightly above 100.
pub fn signal_to_rh(data: u16) -> f32 {
    f32::from(data) * (100.0 / 65535.0)
}

// section 4.13, equation 2
pub fn signal_to_celsius(data: u16) -> f32 {
    f32::from(data) * (175.0 / 65535.0) - 45.0
}

// section 4.13, equation 3
pub fn signal_to_fahrenheit(data: u16) -> f32 {
    f32::from(data) * (315.0 / 65535.0) - 49.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc() {
        let sum = checksum(&[0xBE, 0xEF]);

        assert_eq!(sum, 0x92);
    }

    #[test]
    fn crc_matches_bitwise_definition() {
        fn reference(data: &[u8]) -> u8 {
            let mut crc = 0xFFu8;
            for byte in data {
                crc ^= byte;
                for _ in 0..8 {
                    crc = if crc & 0x80 != 0 {
                        (crc << 1) ^ 0x31
                    } else {
                        crc << 1
                    };
                }
            }
            crc
        }

        for word in [0x0000u16, 0x0001, 0x6A65, 0x8000, 0xBEEF, 0xFFFF] {
            let bytes = word.to_be_bytes();
            assert_eq!(checksum(&bytes), reference(&bytes), "word {word:#06x}");
        }
    }

    #[test]
    fn crc_of_empty_span_is_init() {
        assert_eq!(checksum(&[]), 0xFF);
    }

    #[test]
    fn signal() {
        let code = 0x6A65;
        let expected_c = f64::from(code) * 175.0 / 65535.0 - 45.0;
        let expected_f = f64::from(code) * 315.0 / 65535.0 - 49.0;
        let expected_rh = f64::from(code) * 100.0 / 65535.0;

        assert!((f64::from(signal_to_celsius(code)) - expected_c).abs() < 1e-3);
        assert!((f64::from(signal_to_fahrenheit(code)) - expected_f).abs() < 1e-3);
        assert!((f64::from(signal_to_rh(code)) - expected_rh).abs() < 1e-3);
    }

    #[test]
    fn signal_range_ends() {
        assert_eq!(signal_to_rh(0), 0.0);
        assert!((signal_to_rh(u16::MAX) - 100.0).abs() < 1e-3);
        assert!((signal_to_celsius(0) + 45.0).abs() < 1e-3);
        assert!((signal_to_celsius(u16::MAX) - 130.0).abs() < 1e-3);
        assert!((signal_to_fahrenheit(u16::MAX) - 266.0).abs() < 1e-3);
    }
}
