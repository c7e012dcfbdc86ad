//! Bus transactions: 16-bit commands out, checksummed words back.

use byteorder::{BigEndian, ByteOrder};

use crate::bus::TwoWire;
use crate::checksum;
use crate::error::{ErrorFlags, Fault, Result};
use crate::generic::ChecksumMode;

/// Bytes per word on the wire: 2 data bytes and their checksum.
pub(crate) const WORD_LEN: usize = 3;

/// Talks to one sensor address and records every fault it hits.
pub(crate) struct Codec<B> {
    bus: B,
    address: u8,
    errors: ErrorFlags,
}

impl<B: TwoWire> Codec<B> {
    pub(crate) fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            errors: ErrorFlags::NONE,
        }
    }

    pub(crate) fn address(&self) -> u8 {
        self.address
    }

    pub(crate) fn release(self) -> B {
        self.bus
    }

    pub(crate) fn record(&mut self, fault: Fault) {
        self.errors.record(fault);
    }

    /// Records `fault` and hands it back, for use in `Err(...)` position.
    pub(crate) fn fail(&mut self, fault: Fault) -> Fault {
        self.record(fault);
        fault
    }

    pub(crate) fn drain_errors(&mut self) -> ErrorFlags {
        self.errors.drain()
    }

    pub(crate) fn begin(&mut self, clock_hz: u32) {
        self.bus.begin();
        self.bus.set_clock(clock_hz);
    }

    /// An empty transmission: succeeds if the address is acknowledged.
    pub(crate) fn probe(&mut self) -> Result<()> {
        self.bus.begin_transmission(self.address);
        self.end_transmission()
    }

    /// Sends `command` MSB first.
    ///
    /// A short write is recorded but only a failed transmission fails the call.
    pub(crate) fn write_command(&mut self, command: u16) -> Result<()> {
        let mut buf = [0; 2];
        BigEndian::write_u16(&mut buf, command);
        debug!("sht3x @ {:#x}: command {:#x}", self.address, command);

        self.bus.begin_transmission(self.address);
        let written = self.bus.write(&buf);
        if written != buf.len() {
            warn!("only {} of {} command bytes accepted", written, buf.len());
            self.record(Fault::WriteLength);
        }
        self.end_transmission()
    }

    fn end_transmission(&mut self) -> Result<()> {
        self.bus.end_transmission().map_err(|e| {
            error!("sht3x @ {:#x}: transmission failed ({})", self.address, e.code());
            self.fail(Fault::EndTransmission)
        })
    }

    /// Reads exactly `N` bytes, in the order they arrived.
    pub(crate) fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let received = self.bus.request_from(self.address, N);
        if received < N {
            warn!("requested {} bytes, got {}", N, received);
            return Err(self.fail(Fault::RequestLength));
        }

        let mut buf = [0; N];
        for byte in &mut buf {
            *byte = self.bus.read().ok_or_else(|| self.fail(Fault::RequestLength))?;
        }
        Ok(buf)
    }

    /// The word in a 3-byte `[msb, lsb, crc]` group, checked unless `mode` says otherwise.
    pub(crate) fn word(&mut self, group: &[u8], mode: ChecksumMode) -> Result<u16> {
        let (data, sum) = (&group[..2], group[2]);

        if mode == ChecksumMode::Enforce {
            let calc_sum = checksum(data);
            if sum != calc_sum {
                warn!(
                    "checksum did not match (ours: {:#x} != sensor's: {:#x})",
                    calc_sum,
                    sum
                );
                return Err(self.fail(Fault::Checksum));
            }
        }

        Ok(BigEndian::read_u16(data))
    }
}
