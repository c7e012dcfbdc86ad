#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::binary_info::{EntryAddr, rp_cargo_version, rp_program_build_attribute, rp_program_name};
use embassy_rp::config::Config;
use embassy_rp::i2c;
use embassy_time::{Delay, Timer};
use sht3x::model_addrs::ADDR_PIN_LOW;
use sht3x::{BUS_CLOCK_HZ, HalBus, Repeatability, Sht31};

use {defmt_rtt as _, panic_probe as _};

#[used]
#[unsafe(link_section = ".bi_entries")]
pub static PICOTOOL_ENTRIES: [EntryAddr; 3] = [
    rp_program_name!(c"sht31"),
    rp_cargo_version!(),
    rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Config::default());

    info!("Hello, World!");

    let mut config = i2c::Config::default();
    config.frequency = BUS_CLOCK_HZ;
    // SCL on GP5, SDA on GP4
    let bus = HalBus::new(i2c::I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, config));
    info!("initialised i2c bus!");

    let mut sensor = Sht31::new(bus, Delay, ADDR_PIN_LOW);
    if let Err(e) = sensor.begin() {
        warn!("general call reset failed: {}", e);
    }

    if !sensor.is_connected() {
        warn!("no sensor answering at {:#x}", ADDR_PIN_LOW);
    }
    info!("status: {:#x}", sensor.read_status());
    if sensor.clear_status().is_err() {
        warn!("couldnt clear status");
    }

    loop {
        match sensor.measure(Repeatability::High.command()) {
            Ok(m) => info!("{} {}, {} %RH", m.temperature, m.unit, m.humidity),
            Err(e) => warn!("measurement failed: {}", e),
        }

        let errors = sensor.drain_errors();
        if !errors.is_empty() {
            warn!("errors since last round: {:#x}", errors.bits());
        }

        Timer::after_secs(2).await;
    }
}
