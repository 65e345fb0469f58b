//! Timer loop
//!
//! One pass per iteration: read the accelerometer and encoder, step the
//! timer, push whatever it asks the display to show. The loop yields after
//! every pass so the encoder task keeps sampling.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Instant;

use sandglass_core::sensing::AccelSample;
use sandglass_core::time::{elapsed_ms, Millis};
use sandglass_core::traits::{EncoderCounter, MatrixDisplay, MotionSensor};
use sandglass_core::{DisplayUpdate, Inputs, SandTimer};

/// Heartbeat log interval
const HEARTBEAT_MS: u32 = 5_000;

/// Milliseconds since boot, wrapping
pub fn now_ms() -> Millis {
    Instant::now().as_millis() as Millis
}

/// Run the timer forever
///
/// `sample` is the seed reading; it is reused whenever a read fails, which
/// leaves the orientation where it was.
pub async fn run_timer<M, E, D>(
    mut timer: SandTimer,
    motion: &mut M,
    encoder: &mut E,
    display: &mut D,
    mut sample: AccelSample,
) -> !
where
    M: MotionSensor,
    E: EncoderCounter,
    D: MatrixDisplay,
{
    info!("Timer loop started in {:?}", timer.mode());

    let mut last_heartbeat = now_ms();

    loop {
        match motion.read() {
            Ok(s) => sample = s,
            Err(e) => warn!("Motion read failed: {:?}", e),
        }

        let now = now_ms();
        let tick = timer.tick(Inputs {
            sample,
            encoder_position: encoder.position(),
            now_ms: now,
        });

        if let Some((from, to)) = tick.transition {
            info!("Mode {:?} -> {:?}", from, to);
        }

        if tick.restarted {
            info!("Countdown restarted");
        }

        if let Some(duration) = tick.adjusted {
            let (minutes, seconds) = duration.minutes_seconds();
            debug!("Duration set to {} min {} s", minutes, seconds);
        }

        let pushed = match &tick.display {
            DisplayUpdate::Unchanged => Ok(()),
            DisplayUpdate::Clear => display.clear(),
            DisplayUpdate::Show(frame) => display.push(frame),
        };
        if let Err(e) = pushed {
            warn!("Display update failed: {:?}", e);
            timer.invalidate_display();
        }

        if elapsed_ms(now, last_heartbeat) >= HEARTBEAT_MS {
            last_heartbeat = now;
            trace!(
                "Heartbeat: mode={:?} orientation={:?} idle={}",
                timer.mode(),
                timer.orientation(),
                timer.is_idle(now)
            );
        }

        yield_now().await;
    }
}
