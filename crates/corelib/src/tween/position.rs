//! Position tween: three scalar channels driven in lock-step.

use glam::Vec3;

use super::easing::TweenMethod;
use super::tweener::{TweenState, TweenStatus, Tweener};
use crate::time::GameTime;

/// Animates a 3-component position. All axes share one method, one duration
/// and one start time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenPosition {
    x: Tweener,
    y: Tweener,
    z: Tweener,
}

impl TweenPosition {
    pub fn new(method: TweenMethod, start: Vec3, end: Vec3, duration: f32) -> Self {
        Self {
            x: Tweener::new(method, start.x, end.x, duration),
            y: Tweener::new(method, start.y, end.y, duration),
            z: Tweener::new(method, start.z, end.z, duration),
        }
    }

    pub fn start_value(&self) -> Vec3 {
        Vec3::new(self.x.start_value(), self.y.start_value(), self.z.start_value())
    }

    pub fn end_value(&self) -> Vec3 {
        Vec3::new(self.x.end_value(), self.y.end_value(), self.z.end_value())
    }

    pub fn set_start_value(&mut self, value: Vec3) {
        self.x.set_start_value(value.x);
        self.y.set_start_value(value.y);
        self.z.set_start_value(value.z);
    }

    pub fn set_end_value(&mut self, value: Vec3) {
        self.x.set_end_value(value.x);
        self.y.set_end_value(value.y);
        self.z.set_end_value(value.z);
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.x.duration()
    }

    pub fn set_duration(&mut self, duration: f32) {
        for axis in self.axes_mut() {
            axis.set_duration(duration);
        }
    }

    #[inline]
    pub fn method(&self) -> TweenMethod {
        self.x.method()
    }

    pub fn set_method(&mut self, method: TweenMethod) {
        for axis in self.axes_mut() {
            axis.set_method(method);
        }
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.x.state()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.x.is_active()
    }

    pub fn start(&mut self, time: &GameTime) {
        for axis in self.axes_mut() {
            axis.start(time);
        }
    }

    pub fn stop(&mut self) {
        for axis in self.axes_mut() {
            axis.stop();
        }
    }

    /// Position this tween would write at `now`.
    pub fn sample(&self, now: f32) -> Vec3 {
        Vec3::new(self.x.sample(now), self.y.sample(now), self.z.sample(now))
    }

    /// Advance all axes and write into `position`.
    pub fn update(&mut self, time: &GameTime, position: &mut Vec3) -> TweenStatus {
        let status = self.x.update(time, &mut position.x);
        self.y.update(time, &mut position.y);
        self.z.update(time, &mut position.z);
        status
    }

    fn axes_mut(&mut self) -> [&mut Tweener; 3] {
        [&mut self.x, &mut self.y, &mut self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_half_way_along_x() {
        let mut tw = TweenPosition::new(TweenMethod::Linear, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
        let mut pos = Vec3::ZERO;
        tw.start(&GameTime::at(0.0));
        assert_eq!(tw.update(&GameTime::at(1.0), &mut pos), TweenStatus::Running);
        assert_eq!(pos, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn all_axes_finish_together() {
        let end = Vec3::new(1.0, -2.0, 3.5);
        let mut tw = TweenPosition::new(TweenMethod::QuarticEaseInOut, Vec3::ONE, end, 0.5);
        let mut pos = Vec3::ZERO;
        tw.start(&GameTime::at(2.0));
        assert_eq!(tw.update(&GameTime::at(2.5), &mut pos), TweenStatus::Completed);
        assert_eq!(pos, end);
        assert_eq!(tw.state(), TweenState::Finished);

        let before = pos;
        assert_eq!(tw.update(&GameTime::at(3.0), &mut pos), TweenStatus::Inactive);
        assert_eq!(pos, before);
    }

    #[test]
    fn lands_on_end_at_fractional_times() {
        let end = Vec3::new(10.0, -3.3, 0.7);
        for (t0, d) in [(0.7, 0.2), (1.3, 0.3), (16.7, 0.3), (123.456, 0.2)] {
            let mut tw = TweenPosition::new(TweenMethod::Linear, Vec3::ZERO, end, d);
            let mut pos = Vec3::ZERO;
            tw.start(&GameTime::at(t0));
            assert_eq!(tw.update(&GameTime::at(t0 + d), &mut pos), TweenStatus::Completed);
            assert_eq!(pos, end, "t0={t0} d={d}");
        }
    }

    #[test]
    fn vector_accessors_round_trip() {
        let mut tw = TweenPosition::default();
        tw.set_start_value(Vec3::new(1.0, 2.0, 3.0));
        tw.set_end_value(Vec3::new(4.0, 5.0, 6.0));
        tw.set_duration(3.0);
        tw.set_method(TweenMethod::BounceEaseOut);
        assert_eq!(tw.start_value(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(tw.end_value(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(tw.duration(), 3.0);
        assert_eq!(tw.method(), TweenMethod::BounceEaseOut);
    }
}
