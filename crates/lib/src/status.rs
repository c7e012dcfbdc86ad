/// The sensor's status register (datasheet table 17).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u16);

impl Status {
    /// What [`crate::Sensor::read_status`] returns when the register could not be read.
    pub const INVALID: Self = Self(0xFFFF);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    const fn bit(self, n: u8) -> bool {
        self.0 & (1 << n) != 0
    }

    /// At least one alert is pending.
    pub const fn alert_pending(self) -> bool {
        self.bit(15)
    }

    pub const fn heater_on(self) -> bool {
        self.bit(13)
    }

    pub const fn humidity_alert(self) -> bool {
        self.bit(11)
    }

    pub const fn temperature_alert(self) -> bool {
        self.bit(10)
    }

    /// A reset (hard, soft or supply fail) happened since the status was last cleared.
    pub const fn reset_detected(self) -> bool {
        self.bit(4)
    }

    /// The last command was not processed (invalid, or failed its checksum).
    pub const fn command_failed(self) -> bool {
        self.bit(1)
    }

    /// Checksum of the last write transfer failed.
    pub const fn write_checksum_failed(self) -> bool {
        self.bit(0)
    }
}

impl From<u16> for Status {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}
