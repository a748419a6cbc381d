//! Per-frame time snapshot handed to update passes.

/// Timing values for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameTime {
    /// Time since the clock started.
    pub total: f32,
    /// Time since the previous frame.
    pub delta: f32,
}

impl GameTime {
    #[inline]
    pub const fn new(total: f32, delta: f32) -> Self {
        Self { total, delta }
    }

    /// Snapshot at `total` with no frame delta.
    #[inline]
    pub const fn at(total: f32) -> Self {
        Self { total, delta: 0.0 }
    }
}

/// Accumulates frame deltas into [`GameTime`] snapshots.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameClock {
    now: GameTime,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative deltas are treated as zero.
    pub fn tick(&mut self, dt: f32) -> GameTime {
        let dt = dt.max(0.0);
        self.now = GameTime::new(self.now.total + dt, dt);
        self.now
    }

    #[inline]
    pub fn now(&self) -> GameTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate() {
        let mut clock = GameClock::new();
        clock.tick(0.5);
        let t = clock.tick(0.25);
        assert_eq!(t, GameTime::new(0.75, 0.25));
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = GameClock::new();
        clock.tick(1.0);
        let t = clock.tick(-3.0);
        assert_eq!(t.total, 1.0);
        assert_eq!(t.delta, 0.0);
    }
}
