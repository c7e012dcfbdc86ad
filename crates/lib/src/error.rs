use core::fmt;
use core::ops::{BitOr, BitOrAssign};

pub type Result<T> = core::result::Result<T, Fault>;

/// Why a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The bus did not take every byte of a command.
    WriteLength,
    /// The bus reported a failure while completing a transmission.
    EndTransmission,
    /// The sensor sent fewer bytes than were requested.
    RequestLength,
    /// A word did not match its checksum trailer.
    Checksum,
    NotConnected,
    WrongSensorId,
    Timeout,
    /// The command is not one the operation accepts. Nothing was sent.
    WrongCommand,
}

impl Fault {
    pub const fn flag(self) -> ErrorFlags {
        match self {
            Fault::EndTransmission => ErrorFlags::END_TRANSMISSION,
            Fault::RequestLength => ErrorFlags::REQUEST_LENGTH,
            Fault::WriteLength => ErrorFlags::WRITE_LENGTH,
            Fault::WrongSensorId => ErrorFlags::WRONG_SENSOR_ID,
            Fault::Timeout => ErrorFlags::TIMEOUT,
            Fault::NotConnected => ErrorFlags::NOT_CONNECTED,
            Fault::Checksum => ErrorFlags::CHECKSUM,
            Fault::WrongCommand => ErrorFlags::WRONG_COMMAND,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Fault::WriteLength => "bus accepted fewer command bytes than written",
            Fault::EndTransmission => "bus transmission failed",
            Fault::RequestLength => "sensor returned fewer bytes than requested",
            Fault::Checksum => "checksum mismatch",
            Fault::NotConnected => "sensor not connected",
            Fault::WrongSensorId => "unexpected sensor id",
            Fault::Timeout => "sensor response timed out",
            Fault::WrongCommand => "command not valid for this operation",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Fault {}

/// Every fault seen since the accumulator was last drained, one bit per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags(u16);

impl ErrorFlags {
    pub const NONE: Self = Self(0);
    pub const END_TRANSMISSION: Self = Self(1 << 1);
    pub const REQUEST_LENGTH: Self = Self(1 << 2);
    pub const WRITE_LENGTH: Self = Self(1 << 3);
    pub const WRONG_SENSOR_ID: Self = Self(1 << 4);
    pub const TIMEOUT: Self = Self(1 << 5);
    pub const NOT_CONNECTED: Self = Self(1 << 6);
    pub const CHECKSUM: Self = Self(1 << 7);
    pub const WRONG_COMMAND: Self = Self(1 << 8);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn record(&mut self, fault: Fault) {
        *self |= fault.flag();
    }

    /// Hands back the accumulated flags and clears them.
    pub(crate) fn drain(&mut self) -> Self {
        core::mem::take(self)
    }
}

impl BitOr for ErrorFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ErrorFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Fault> for ErrorFlags {
    fn from(fault: Fault) -> Self {
        fault.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Fault; 8] = [
        Fault::WriteLength,
        Fault::EndTransmission,
        Fault::RequestLength,
        Fault::Checksum,
        Fault::NotConnected,
        Fault::WrongSensorId,
        Fault::Timeout,
        Fault::WrongCommand,
    ];

    #[test]
    fn flags_are_independent_bits() {
        let mut seen = 0u16;
        for fault in ALL {
            let bits = fault.flag().bits();
            assert_eq!(bits.count_ones(), 1, "{fault:?}");
            assert_eq!(seen & bits, 0, "{fault:?} overlaps");
            seen |= bits;
        }
    }

    #[test]
    fn record_accumulates() {
        let mut flags = ErrorFlags::default();
        flags.record(Fault::Checksum);
        flags.record(Fault::RequestLength);
        flags.record(Fault::Checksum);

        assert!(flags.contains(ErrorFlags::CHECKSUM | ErrorFlags::REQUEST_LENGTH));
        assert!(!flags.contains(ErrorFlags::WRONG_COMMAND));
        assert_eq!(flags.bits(), 0x0084);
    }

    #[test]
    fn drain_resets() {
        let mut flags = ErrorFlags::default();
        flags.record(Fault::WrongCommand);

        assert_eq!(flags.drain(), ErrorFlags::WRONG_COMMAND);
        assert!(flags.is_empty());
        assert_eq!(flags.drain(), ErrorFlags::NONE);
    }
}
