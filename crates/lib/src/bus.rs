//! The two-wire bus the driver talks through.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use heapless::Vec;

/// Bytes a single transmission or request can carry.
pub const BUFFER_LENGTH: usize = 32;

/// Why a transmission could not be completed.
///
/// [`HalBus`] only produces the NACK variants and `Other`; `DataTooLong` and `Timeout`
/// are there for other [`TwoWire`] implementations that report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndTransmission {
    /// More data was queued than fits in the transmit buffer.
    DataTooLong,
    /// The address was not acknowledged.
    AddressNack,
    /// A data byte was not acknowledged.
    DataNack,
    Other,
    Timeout,
}

impl EndTransmission {
    /// The classic two-wire status code. `0` means success and is never returned here.
    pub const fn code(self) -> u8 {
        match self {
            EndTransmission::DataTooLong => 1,
            EndTransmission::AddressNack => 2,
            EndTransmission::DataNack => 3,
            EndTransmission::Other => 4,
            EndTransmission::Timeout => 5,
        }
    }
}

impl From<ErrorKind> for EndTransmission {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => EndTransmission::AddressNack,
            ErrorKind::NoAcknowledge(_) => EndTransmission::DataNack,
            _ => EndTransmission::Other,
        }
    }
}

/// A transaction-oriented two-wire bus master.
///
/// Writes are queued between [`begin_transmission`](TwoWire::begin_transmission) and
/// [`end_transmission`](TwoWire::end_transmission); reads are fetched in one go by
/// [`request_from`](TwoWire::request_from) and then drained byte by byte.
pub trait TwoWire {
    fn begin(&mut self);

    fn set_clock(&mut self, hz: u32);

    fn begin_transmission(&mut self, address: u8);

    /// Queues `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Sends whatever was queued. With nothing queued this only probes the address.
    fn end_transmission(&mut self) -> Result<(), EndTransmission>;

    /// Reads up to `count` bytes from `address`, returning how many arrived.
    fn request_from(&mut self, address: u8, count: usize) -> usize;

    /// Next received byte, if any are left.
    fn read(&mut self) -> Option<u8>;
}

/// [`TwoWire`] on top of any blocking `embedded-hal` I2C bus.
///
/// The bus frequency is whatever the HAL bus was built with; [`TwoWire::set_clock`]
/// only records the rate asked for.
pub struct HalBus<I2C> {
    i2c: I2C,
    clock_hz: Option<u32>,
    address: u8,
    tx: Vec<u8, BUFFER_LENGTH>,
    rx: Vec<u8, BUFFER_LENGTH>,
    rx_pos: usize,
}

impl<I2C: I2c> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            clock_hz: None,
            address: 0,
            tx: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
        }
    }

    /// The clock rate last asked for via [`TwoWire::set_clock`].
    pub fn requested_clock(&self) -> Option<u32> {
        self.clock_hz
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> TwoWire for HalBus<I2C> {
    fn begin(&mut self) {
        self.tx.clear();
        self.rx.clear();
        self.rx_pos = 0;
    }

    fn set_clock(&mut self, hz: u32) {
        self.clock_hz = Some(hz);
    }

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let room = self.tx.capacity() - self.tx.len();
        let n = bytes.len().min(room);
        // cannot fail: `n` is at most the room left
        let _ = self.tx.extend_from_slice(&bytes[..n]);
        n
    }

    fn end_transmission(&mut self) -> Result<(), EndTransmission> {
        // some HALs refuse zero-length writes, so an address probe reads one byte instead
        let result = if self.tx.is_empty() {
            self.i2c.read(self.address, &mut [0])
        } else {
            self.i2c.write(self.address, &self.tx)
        };
        self.tx.clear();
        result.map_err(|e| EndTransmission::from(e.kind()))
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let count = count.min(BUFFER_LENGTH);
        self.rx.clear();
        self.rx_pos = 0;
        // cannot fail: `count` is at most the capacity
        let _ = self.rx.resize(count, 0);

        match self.i2c.read(address, &mut self.rx) {
            Ok(()) => count,
            Err(e) => {
                error!("i2c read from {:#x} failed: {}", address, EndTransmission::from(e.kind()).code());
                self.rx.clear();
                0
            }
        }
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.rx.get(self.rx_pos).copied()?;
        self.rx_pos += 1;
        Some(byte)
    }
}
