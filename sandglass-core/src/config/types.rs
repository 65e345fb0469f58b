//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Acceleration (m/s²) an axis must exceed before it decides the orientation
pub const DEFAULT_ACCEL_THRESHOLD: f32 = 8.0;

/// No activity for this long puts the timer to sleep
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 10_000;

/// Encoder counts needed before the dial registers a step
pub const DEFAULT_DIAL_MIN_CHANGE: u32 = 4;

/// Minimum time between two countdown frames
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 20;

/// Full on/off cycle of the completion blink
pub const DEFAULT_BLINK_PERIOD_MS: u32 = 1_000;

/// Milliseconds in one quarter minute, the duration resolution
pub const MS_PER_QUARTER: u32 = 15_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Acceleration threshold is zero, negative or not a number
    InvalidThreshold,
    /// Duration bounds are zero or inverted
    InvalidDurationRange,
    /// Initial duration lies outside the bounds
    InitialDurationOutOfRange,
    /// Duration step is zero
    ZeroStep,
    /// Dial debounce must be at least one count
    ZeroDialChange,
    /// Frame interval or blink period is too short
    InvalidInterval,
}

/// Intensity values used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    /// Sand ramp, indexed by the per-pixel texture phase
    pub sand: [u8; 5],
    /// Hourglass throat overlay
    pub indent: u8,
    /// Duration text
    pub text: u8,
    /// Completion blink ("on" half)
    pub blink: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sand: [10, 20, 30, 40, 50],
            indent: 1,
            text: 40,
            blink: 40,
        }
    }
}

/// Duration limits, in quarter minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DurationLimits {
    /// Shortest selectable duration (1 = 0:15)
    pub min_quarters: u8,
    /// Longest selectable duration (20 = 5:00)
    pub max_quarters: u8,
    /// Change per dial step (1 = 0.25 min)
    pub step_quarters: u8,
    /// Duration selected at power-on (2 = 0:30)
    pub initial_quarters: u8,
}

impl Default for DurationLimits {
    fn default() -> Self {
        Self {
            min_quarters: 1,
            max_quarters: 20,
            step_quarters: 1,
            initial_quarters: 2,
        }
    }
}

/// Timer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Orientation threshold (m/s², 1 g ≈ 9.8)
    pub accel_threshold: f32,
    /// Idle time before sleeping (ms)
    pub idle_timeout_ms: u32,
    /// Encoder counts per dial step
    pub dial_min_change: u32,
    /// Selectable durations
    pub duration: DurationLimits,
    /// Countdown animation refresh (ms)
    pub frame_interval_ms: u32,
    /// Completion blink period (ms)
    pub blink_period_ms: u32,
    /// Renderer intensities
    pub palette: Palette,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            accel_threshold: DEFAULT_ACCEL_THRESHOLD,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            dial_min_change: DEFAULT_DIAL_MIN_CHANGE,
            duration: DurationLimits::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            blink_period_ms: DEFAULT_BLINK_PERIOD_MS,
            palette: Palette::default(),
        }
    }
}

impl TimerConfig {
    /// Check the configuration for values the timer cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.accel_threshold.is_finite() || self.accel_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }

        let d = &self.duration;
        if d.min_quarters == 0 || d.min_quarters > d.max_quarters {
            return Err(ConfigError::InvalidDurationRange);
        }
        if d.initial_quarters < d.min_quarters || d.initial_quarters > d.max_quarters {
            return Err(ConfigError::InitialDurationOutOfRange);
        }
        if d.step_quarters == 0 {
            return Err(ConfigError::ZeroStep);
        }

        if self.dial_min_change == 0 {
            return Err(ConfigError::ZeroDialChange);
        }

        if self.frame_interval_ms == 0 || self.blink_period_ms < 2 {
            return Err(ConfigError::InvalidInterval);
        }

        Ok(())
    }
}
