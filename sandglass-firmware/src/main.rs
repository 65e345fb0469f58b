//! Sandglass - Sand Timer Firmware
//!
//! Firmware for an RP2040 hourglass: an MPU-6050 tells which way up the
//! device is, a rotary encoder sets the duration, and an IS31FL3731 15x7
//! LED matrix shows the duration or the draining sand.
//!
//! All timer behavior lives in `sandglass-core`; this binary brings up the
//! peripherals and feeds the timer from a single polling loop.

#![no_std]
#![no_main]

mod board;
mod channels;
mod tasks;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sandglass_core::sensing::AccelSample;
use sandglass_core::traits::{EncoderCounter, MotionSensor};
use sandglass_core::{SandTimer, TimerConfig};
use sandglass_drivers::encoder::PolledEncoder;
use sandglass_drivers::matrix::Is31fl3731Wing;
use sandglass_drivers::motion::{Mpu6050, Mpu6050Config};
use sandglass_hal::SharedI2c;

use crate::board::Board;
use crate::channels::SharedEncoder;
use crate::tasks::now_ms;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sandglass firmware starting...");

    let board = Board::new(embassy_rp::init(Default::default()));
    info!("Peripherals initialized");

    let config = TimerConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid timer configuration: {:?}", e);
        halt();
    }

    let bus = RefCell::new(board.i2c);
    let mut delay = Delay;

    let mut motion = Mpu6050::new(SharedI2c::new(&bus), Mpu6050Config::default());
    if let Err(e) = motion.init(&mut delay) {
        error!("Failed to initialize MPU-6050: {:?}", e);
        halt();
    }
    info!("MPU-6050 initialized");

    let mut display = Is31fl3731Wing::new(SharedI2c::new(&bus));
    if let Err(e) = display.init(&mut delay) {
        error!("Failed to initialize IS31FL3731: {:?}", e);
        halt();
    }
    info!("IS31FL3731 initialized");

    let encoder = PolledEncoder::new(board.encoder_a, board.encoder_b);
    spawner.spawn(tasks::encoder_task(encoder)).unwrap();

    // Seed reading so the first pass sees no spurious flip or turn
    let seed = match motion.read() {
        Ok(sample) => sample,
        Err(e) => {
            warn!("Seed read failed: {:?}", e);
            AccelSample::default()
        }
    };
    let mut encoder = SharedEncoder;
    let timer = SandTimer::new(config, seed, encoder.position(), now_ms());
    info!("Seed orientation {:?}", timer.orientation());

    tasks::run_timer(timer, &mut motion, &mut encoder, &mut display, seed).await
}

/// Park after a fatal bring-up error
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
