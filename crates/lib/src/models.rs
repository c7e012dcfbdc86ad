//! The `SHT3x` models. They share one command set, so each is a thin wrapper over
//! [`Sensor`].

use embedded_hal::delay::DelayNs;

use crate::bus::TwoWire;
use crate::generic::Sensor;

macro_rules! make_sensor {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        pub struct $name<B, D>(Sensor<B, D>);

        impl<B: TwoWire, D: DelayNs> $name<B, D> {
            pub fn new(bus: B, delay: D, addr: u8) -> Self {
                Self(Sensor::new(bus, delay, addr))
            }

            pub fn into_inner(self) -> Sensor<B, D> {
                self.0
            }
        }

        impl<B, D> core::ops::Deref for $name<B, D> {
            type Target = Sensor<B, D>;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<B, D> core::ops::DerefMut for $name<B, D> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

make_sensor!(Sht30, "the `SHT30` temperature-and-humidity sensor (±2 %RH, ±0.2 °C)");
make_sensor!(Sht31, "the `SHT31` temperature-and-humidity sensor (±2 %RH, ±0.2 °C)");
make_sensor!(Sht35, "the `SHT35` temperature-and-humidity sensor (±1.5 %RH, ±0.1 °C)");
