mod animatable;
mod snapshot;
mod timing;

use std::time::Duration;

use crate::error::InvalidReason;

pub use animatable::Animatable;
pub use snapshot::StateSnapshot;
pub use timing::{TimingFunction, UnknownEasing};

/// Default duration when a descriptor does not set one, in milliseconds
pub const DEFAULT_DURATION_MS: f32 = 300.0;

/// Timing parameters for a single reveal transition
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay between the trigger firing and the transition starting, in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Check the timing parameters.
    ///
    /// A zero duration is rejected rather than treated as an instant jump;
    /// use `Orchestrator::settle_now` for that.
    pub fn check(&self) -> Result<(), InvalidReason> {
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(InvalidReason::Delay(self.delay_ms));
        }
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(InvalidReason::Duration(self.duration_ms));
        }
        Ok(())
    }

    pub(crate) fn delay_duration(&self) -> Duration {
        millis(self.delay_ms)
    }

    pub(crate) fn run_duration(&self) -> Duration {
        millis(self.duration_ms)
    }
}

/// Whole-nanosecond duration for a validated millisecond value
fn millis(ms: f32) -> Duration {
    Duration::from_nanos((f64::from(ms) * 1_000_000.0).round() as u64)
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS, TimingFunction::EaseOut)
    }
}
