//! bus addresses, selected by the ADDR pin. same for `SHT30`, `SHT31` and `SHT35`.

/// ADDR pin connected to VSS (default)
pub const ADDR_PIN_LOW: u8 = 0x44;
/// ADDR pin connected to VDD
pub const ADDR_PIN_HIGH: u8 = 0x45;
