//! Encoder sampling task
//!
//! Samples the encoder phases on a fixed ticker and publishes the count
//! for the timer loop.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use sandglass_drivers::encoder::PolledEncoder;
use sandglass_hal_rp2040::RpInput;

use crate::channels::ENCODER_POSITION;

/// Sampling period; fast enough for a hand-turned detented encoder
const POLL_INTERVAL_US: u64 = 500;

/// Encoder task - decodes quadrature edges into a shared count
#[embassy_executor::task]
pub async fn encoder_task(mut encoder: PolledEncoder<RpInput<'static>, RpInput<'static>>) {
    info!("Encoder task started");

    let mut ticker = Ticker::every(Duration::from_micros(POLL_INTERVAL_US));

    loop {
        ticker.next().await;

        if encoder.poll() != 0 {
            ENCODER_POSITION.store(encoder.count(), Ordering::Relaxed);
        }
    }
}
