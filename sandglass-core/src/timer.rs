//! Timer controller
//!
//! The controller is the single owner of all timer state. Once per loop
//! iteration it:
//! - Classifies the latest acceleration sample
//! - Debounces the dial
//! - Derives events and steps the mode state machine
//! - Decides what, if anything, the display should show
//!
//! It performs no I/O itself; the firmware reads the peripherals, calls
//! [`SandTimer::tick`], and pushes the returned display update.

use crate::config::TimerConfig;
use crate::duration::TimerDuration;
use crate::input::DialInput;
use crate::render::{PixelBuffer, Progress, Rotation, SandRenderer};
use crate::sensing::{AccelSample, ActivityTracker, Orientation, OrientationClassifier};
use crate::state::{Event, Mode, ModeKind};
use crate::time::{elapsed_ms, Millis};

/// Everything sampled at the start of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    /// Latest accelerometer reading
    pub sample: AccelSample,
    /// Raw encoder count
    pub encoder_position: i32,
    /// Current time
    pub now_ms: Millis,
}

/// What the display should do after this iteration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayUpdate {
    /// Leave the current picture
    Unchanged,
    /// Turn every pixel off
    Clear,
    /// Show a new frame
    Show(PixelBuffer),
}

/// Result of one loop iteration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Mode change, if any, as (from, to)
    pub transition: Option<(ModeKind, ModeKind)>,
    /// New duration, if the dial changed it
    pub adjusted: Option<TimerDuration>,
    /// Display action
    pub display: DisplayUpdate,
    /// A running countdown was turned over and started again
    pub restarted: bool,
}

impl Tick {
    fn idle() -> Self {
        Self {
            transition: None,
            adjusted: None,
            display: DisplayUpdate::Unchanged,
            restarted: false,
        }
    }
}

/// The sand timer
pub struct SandTimer {
    config: TimerConfig,
    mode: Mode,
    duration: TimerDuration,
    classifier: OrientationClassifier,
    activity: ActivityTracker,
    dial: DialInput,
    renderer: SandRenderer,
    /// Time of the last countdown frame
    last_frame_ms: Option<Millis>,
    /// Duration readout currently on the display
    shown: Option<(TimerDuration, Rotation)>,
    /// The sleeping display has to be blanked again
    clear_pending: bool,
}

impl SandTimer {
    /// Create the timer from one seed reading of each input
    ///
    /// The seed establishes the orientation and dial baselines, so the
    /// first [`tick`](Self::tick) does not mistake the initial attitude for
    /// a flip or the initial count for a turn.
    pub fn new(
        config: TimerConfig,
        first_sample: AccelSample,
        encoder_position: i32,
        now: Millis,
    ) -> Self {
        let mut classifier =
            OrientationClassifier::new(config.accel_threshold, Orientation::default());
        let orientation = classifier.classify(first_sample);

        Self {
            mode: Mode::default(),
            duration: TimerDuration::initial(&config.duration),
            classifier,
            activity: ActivityTracker::new(orientation, now, config.idle_timeout_ms),
            dial: DialInput::new(encoder_position, config.dial_min_change),
            renderer: SandRenderer::new(&config),
            last_frame_ms: None,
            shown: None,
            clear_pending: false,
            config,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selected duration
    pub fn duration(&self) -> TimerDuration {
        self.duration
    }

    /// Last classified orientation
    pub fn orientation(&self) -> Orientation {
        self.classifier.current()
    }

    /// Active configuration
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Check if the timer has seen no activity for the idle timeout
    pub fn is_idle(&self, now: Millis) -> bool {
        self.activity.is_idle(now)
    }

    /// Forget what the display is showing
    ///
    /// Call this when pushing an update failed. The next tick sends a full
    /// update for the current mode instead of assuming the last one landed.
    pub fn invalidate_display(&mut self) {
        self.shown = None;
        self.last_frame_ms = None;
        self.clear_pending = true;
    }

    /// Run one loop iteration
    pub fn tick(&mut self, inputs: Inputs) -> Tick {
        let orientation = self.classifier.classify(inputs.sample);
        let rotation = Rotation::for_facing_up(orientation.is_facing_up());
        let before = self.mode.kind();

        let mut tick = Tick::idle();
        let step = Step {
            now: inputs.now_ms,
            orientation,
            rotation,
            position: inputs.encoder_position,
        };

        match self.mode {
            Mode::Sleep => self.tick_sleep(&step, &mut tick),
            Mode::AdjustDuration => self.tick_adjust(&step, &mut tick),
            Mode::Countdown { started_at } => {
                self.tick_countdown(&step, started_at, &mut tick)
            }
        }

        let after = self.mode.kind();
        if before != after {
            tick.transition = Some((before, after));
        }

        tick
    }

    fn tick_sleep(&mut self, step: &Step, tick: &mut Tick) {
        if self.clear_pending {
            self.clear_pending = false;
            tick.display = DisplayUpdate::Clear;
        }

        // A flip counts as activity and ends the idle period
        self.activity.on_tick(step.orientation, step.now);

        if !self.activity.is_idle(step.now) {
            self.apply(Event::Woke, step, tick);
        } else if self.dial.has_moved(step.position) {
            // Left uncommitted: the first adjust pass turns it into a step
            self.apply(Event::DialTurned, step, tick);
        }
    }

    fn tick_adjust(&mut self, step: &Step, tick: &mut Tick) {
        if self.dial.has_moved(step.position) {
            self.activity.touch(step.now);

            let delta = self.dial.consume(step.position);
            let adjusted = self.duration.adjust(delta, &self.config.duration);
            if adjusted != self.duration {
                self.duration = adjusted;
                tick.adjusted = Some(adjusted);
            }
        }

        if self.shown != Some((self.duration, step.rotation)) {
            tick.display = DisplayUpdate::Show(self.show_duration(step.rotation));
        }

        if self.activity.on_tick(step.orientation, step.now) {
            let event = Event::Flipped {
                vertical: step.orientation.is_vertical(),
                at: step.now,
            };
            self.apply(event, step, tick);
        } else if self.activity.is_idle(step.now) {
            self.apply(Event::IdleTimeout, step, tick);
        }
    }

    fn tick_countdown(&mut self, step: &Step, started_at: Millis, tick: &mut Tick) {
        if self.dial.has_moved(step.position) {
            // Left uncommitted: the first adjust pass turns it into a step
            self.apply(Event::DialTurned, step, tick);
            return;
        }

        let mut started_at = started_at;
        if self.activity.on_tick(step.orientation, step.now) {
            let event = Event::Flipped {
                vertical: step.orientation.is_vertical(),
                at: step.now,
            };
            self.apply(event, step, tick);

            match self.mode.countdown_start() {
                Some(restarted_at) => started_at = restarted_at,
                None => return,
            }
        }

        let due = self
            .last_frame_ms
            .map_or(true, |last| elapsed_ms(step.now, last) > self.config.frame_interval_ms);
        if !due {
            return;
        }
        self.last_frame_ms = Some(step.now);

        let elapsed = elapsed_ms(step.now, started_at);
        tick.display = DisplayUpdate::Show(self.renderer.countdown_frame(
            elapsed,
            self.duration,
            step.rotation,
        ));

        if Progress::new(elapsed, self.duration).is_complete() {
            if self.activity.is_idle(step.now) {
                self.apply(Event::IdleTimeout, step, tick);
            }
        } else {
            // Running sand keeps the device awake
            self.activity.touch(step.now);
        }
    }

    /// Step the state machine and run the entry actions of the new mode
    fn apply(&mut self, event: Event, step: &Step, tick: &mut Tick) {
        let next = self.mode.transition(event);
        if next == self.mode {
            return;
        }
        tick.restarted =
            self.mode.kind() == ModeKind::Countdown && next.kind() == ModeKind::Countdown;
        self.mode = next;
        self.clear_pending = false;

        match next {
            Mode::Sleep => {
                self.shown = None;
                tick.display = DisplayUpdate::Clear;
            }
            Mode::AdjustDuration => {
                self.activity.touch(step.now);
                tick.display = DisplayUpdate::Show(self.show_duration(step.rotation));
            }
            Mode::Countdown { .. } => {
                self.activity.touch(step.now);
                self.shown = None;
                self.last_frame_ms = None;
                tick.display = DisplayUpdate::Clear;
            }
        }
    }

    fn show_duration(&mut self, rotation: Rotation) -> PixelBuffer {
        self.shown = Some((self.duration, rotation));
        self.renderer.duration_frame(self.duration, rotation)
    }
}

/// Per-iteration values shared by the mode handlers
struct Step {
    now: Millis,
    orientation: Orientation,
    rotation: Rotation,
    position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f32 = 9.8;
    const UP: AccelSample = AccelSample::new(0.0, G, 0.0);
    const SIDE_DOWN: AccelSample = AccelSample::new(G, 0.0, 0.0);

    fn inputs(sample: AccelSample, encoder_position: i32, now_ms: Millis) -> Inputs {
        Inputs {
            sample,
            encoder_position,
            now_ms,
        }
    }

    #[test]
    fn test_seed_prevents_spurious_flip() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        let tick = timer.tick(inputs(SIDE_DOWN, 0, 10));
        assert_eq!(tick.transition, None);
        assert_eq!(timer.mode(), Mode::AdjustDuration);
    }

    #[test]
    fn test_first_adjust_tick_draws_duration() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        let tick = timer.tick(inputs(SIDE_DOWN, 0, 10));
        assert!(matches!(tick.display, DisplayUpdate::Show(_)));

        // Nothing changed, nothing to redraw
        let tick = timer.tick(inputs(SIDE_DOWN, 0, 20));
        assert_eq!(tick.display, DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_rotation_change_redraws_duration() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        timer.tick(inputs(SIDE_DOWN, 0, 10));

        // SideDown is not facing up; SideUp is
        let side_up = AccelSample::new(-G, 0.0, 0.0);
        let tick = timer.tick(inputs(side_up, 0, 20));
        assert!(matches!(tick.display, DisplayUpdate::Show(_)));
        assert_eq!(timer.mode(), Mode::AdjustDuration);
    }

    #[test]
    fn test_countdown_frames_are_throttled() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        timer.tick(inputs(UP, 0, 100));
        assert_eq!(timer.mode(), Mode::Countdown { started_at: 100 });

        let first = timer.tick(inputs(UP, 0, 101));
        assert!(matches!(first.display, DisplayUpdate::Show(_)));

        // Exactly one interval later is not yet due
        let early = timer.tick(inputs(UP, 0, 121));
        assert_eq!(early.display, DisplayUpdate::Unchanged);

        let due = timer.tick(inputs(UP, 0, 122));
        assert!(matches!(due.display, DisplayUpdate::Show(_)));
    }

    #[test]
    fn test_adjustment_reported() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        let tick = timer.tick(inputs(SIDE_DOWN, 4, 10));
        assert_eq!(tick.adjusted, Some(TimerDuration::from_quarters(3)));
        assert_eq!(timer.duration().minutes(), 0.75);
    }

    #[test]
    fn test_failed_push_redraws_duration() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        assert!(matches!(timer.tick(inputs(SIDE_DOWN, 0, 10)).display, DisplayUpdate::Show(_)));
        timer.invalidate_display();

        let tick = timer.tick(inputs(SIDE_DOWN, 0, 20));
        assert!(matches!(tick.display, DisplayUpdate::Show(_)));
        assert_eq!(timer.tick(inputs(SIDE_DOWN, 0, 30)).display, DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_failed_push_redraws_countdown_immediately() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        timer.tick(inputs(UP, 0, 100));
        assert!(matches!(timer.tick(inputs(UP, 0, 101)).display, DisplayUpdate::Show(_)));
        timer.invalidate_display();

        // Within the frame interval, but the last frame may not have landed
        let tick = timer.tick(inputs(UP, 0, 105));
        assert!(matches!(tick.display, DisplayUpdate::Show(_)));
    }

    #[test]
    fn test_failed_push_clears_sleeping_display_again() {
        let config = TimerConfig::default();
        let timeout = config.idle_timeout_ms;
        let mut timer = SandTimer::new(config, SIDE_DOWN, 0, 0);
        timer.tick(inputs(SIDE_DOWN, 0, 10));
        let tick = timer.tick(inputs(SIDE_DOWN, 0, timeout + 1));
        assert_eq!(tick.display, DisplayUpdate::Clear);
        assert!(matches!(timer.mode(), Mode::Sleep));

        timer.invalidate_display();
        let tick = timer.tick(inputs(SIDE_DOWN, 0, timeout + 2));
        assert_eq!(tick.display, DisplayUpdate::Clear);
        assert_eq!(tick.transition, None);
        assert_eq!(timer.tick(inputs(SIDE_DOWN, 0, timeout + 3)).display, DisplayUpdate::Unchanged);
    }

    #[test]
    fn test_turning_over_reports_restart() {
        let mut timer = SandTimer::new(TimerConfig::default(), SIDE_DOWN, 0, 0);
        let tick = timer.tick(inputs(UP, 0, 100));
        assert!(!tick.restarted);

        let down = AccelSample::new(0.0, -G, 0.0);
        let tick = timer.tick(inputs(down, 0, 500));
        assert!(tick.restarted);
        assert_eq!(tick.transition, None);
        assert_eq!(timer.mode(), Mode::Countdown { started_at: 500 });
    }
}
