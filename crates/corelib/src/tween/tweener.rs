//! Scalar tween driver.
//!
//! A [`Tweener`] never stores the value it animates. The caller hands the
//! target in on every [`Tweener::update`], or the `World` resolves it from an
//! entity handle each tick, so a tween can outlive its target safely.

use super::easing::TweenMethod;
use crate::time::GameTime;

/// Lifecycle of a tween.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TweenState {
    /// Never started, or stopped.
    #[default]
    Idle,
    Running,
    /// Reached its end value; re-arm with `start`.
    Finished,
}

/// What a single `update` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    /// Not running; the target was not touched.
    Inactive,
    /// Wrote an intermediate value.
    Running,
    /// Wrote the end value and finished on this call.
    Completed,
}

/// Time-driven interpolation of one float.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tweener {
    method: TweenMethod,
    start_value: f32,
    end_value: f32,
    duration: f32,
    start_time: f32,
    state: TweenState,
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new(TweenMethod::Linear, 0.0, 0.0, 1.0)
    }
}

impl Tweener {
    pub fn new(method: TweenMethod, start_value: f32, end_value: f32, duration: f32) -> Self {
        Self {
            method,
            start_value,
            end_value,
            duration,
            start_time: 0.0,
            state: TweenState::Idle,
        }
    }

    #[inline]
    pub fn start_value(&self) -> f32 {
        self.start_value
    }

    #[inline]
    pub fn end_value(&self) -> f32 {
        self.end_value
    }

    /// Duration in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn method(&self) -> TweenMethod {
        self.method
    }

    /// Game time captured by the last `start`.
    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == TweenState::Running
    }

    pub fn set_start_value(&mut self, value: f32) {
        self.start_value = value;
    }

    pub fn set_end_value(&mut self, value: f32) {
        self.end_value = value;
    }

    /// Applies from the next update on; the captured start time is kept.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    /// Applies from the next update on; the captured start time is kept.
    pub fn set_method(&mut self, method: TweenMethod) {
        self.method = method;
    }

    /// Arm the tween at `time.total`. Restarts a running or finished tween.
    pub fn start(&mut self, time: &GameTime) {
        self.start_time = time.total;
        self.state = TweenState::Running;
        log::debug!(
            "Tween started at t={:.3}: {} -> {} over {:.3}s ({})",
            self.start_time,
            self.start_value,
            self.end_value,
            self.duration,
            self.method
        );
    }

    /// Stop without touching the target.
    pub fn stop(&mut self) {
        self.state = TweenState::Idle;
    }

    /// Elapsed time since start, clamped to `[0, duration]`.
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.start_time).clamp(0.0, self.duration.max(0.0))
    }

    /// Normalized progress in `[0, 1]`; `1.0` for non-positive durations.
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed(now) / self.duration
        }
    }

    /// Value this tween would write at `now`, without changing state.
    pub fn sample(&self, now: f32) -> f32 {
        if now >= self.start_time + self.duration {
            self.end_value
        } else {
            self.method
                .tween(self.start_value, self.end_value, self.elapsed(now), self.duration)
        }
    }

    /// Advance and write into `target`. Once the duration has elapsed the
    /// end value is written exactly and later calls do nothing until the
    /// tween is started again.
    pub fn update(&mut self, time: &GameTime, target: &mut f32) -> TweenStatus {
        if self.state != TweenState::Running {
            return TweenStatus::Inactive;
        }

        *target = self.sample(time.total);

        if time.total >= self.start_time + self.duration {
            self.state = TweenState::Finished;
            log::debug!("Tween finished at t={:.3}", time.total);
            TweenStatus::Completed
        } else {
            TweenStatus::Running
        }
    }
}
