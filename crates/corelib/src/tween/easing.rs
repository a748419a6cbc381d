//! Easing curves and the process-wide tween function table.
//!
//! Every entry maps `(start, end, time, duration)` to a value. Endpoints are
//! exact: `time <= 0` yields `start`, `time >= duration` yields `end`, and
//! the curve is only evaluated strictly inside the interval.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Signature shared by all tween functions.
pub type TweenFunction = fn(start: f32, end: f32, time: f32, duration: f32) -> f32;

/// Returned when a method name does not match any [`TweenMethod`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown tween method '{0}'")]
pub struct ParseTweenMethodError(pub String);

/// Declares the method enum and the function table from one ordered list,
/// so the table can never drift from the enum ordinals.
macro_rules! tween_methods {
    ($($variant:ident => $func:ident),* $(,)?) => {
        /// Closed set of tween methods, ordered as in the function table.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum TweenMethod {
            $($variant),*
        }

        impl TweenMethod {
            /// Every method in table order.
            pub const ALL: [TweenMethod; TweenMethod::COUNT] = [$(TweenMethod::$variant),*];

            /// Number of methods (table size). Not a selectable method.
            pub const COUNT: usize = [$(stringify!($variant)),*].len();

            /// Variant name, also accepted by `FromStr`.
            pub fn name(self) -> &'static str {
                match self {
                    $(TweenMethod::$variant => stringify!($variant)),*
                }
            }
        }

        static TWEEN_FUNCTIONS: [TweenFunction; TweenMethod::COUNT] = [$($func as TweenFunction),*];
    };
}

tween_methods! {
    Linear => linear,
    QuadraticEaseOut => quadratic_ease_out,
    QuadraticEaseIn => quadratic_ease_in,
    QuadraticEaseInOut => quadratic_ease_in_out,
    QuadraticEaseOutIn => quadratic_ease_out_in,
    ExponentialEaseOut => exponential_ease_out,
    ExponentialEaseIn => exponential_ease_in,
    ExponentialEaseInOut => exponential_ease_in_out,
    ExponentialEaseOutIn => exponential_ease_out_in,
    CubicEaseOut => cubic_ease_out,
    CubicEaseIn => cubic_ease_in,
    CubicEaseInOut => cubic_ease_in_out,
    CubicEaseOutIn => cubic_ease_out_in,
    QuarticEaseOut => quartic_ease_out,
    QuarticEaseIn => quartic_ease_in,
    QuarticEaseInOut => quartic_ease_in_out,
    QuarticEaseOutIn => quartic_ease_out_in,
    QuinticEaseOut => quintic_ease_out,
    QuinticEaseIn => quintic_ease_in,
    QuinticEaseInOut => quintic_ease_in_out,
    QuinticEaseOutIn => quintic_ease_out_in,
    CircularEaseOut => circular_ease_out,
    CircularEaseIn => circular_ease_in,
    CircularEaseInOut => circular_ease_in_out,
    CircularEaseOutIn => circular_ease_out_in,
    SineEaseOut => sine_ease_out,
    SineEaseIn => sine_ease_in,
    SineEaseInOut => sine_ease_in_out,
    SineEaseOutIn => sine_ease_out_in,
    ElasticEaseOut => elastic_ease_out,
    ElasticEaseIn => elastic_ease_in,
    ElasticEaseInOut => elastic_ease_in_out,
    ElasticEaseOutIn => elastic_ease_out_in,
    BounceEaseOut => bounce_ease_out,
    BounceEaseIn => bounce_ease_in,
    BounceEaseInOut => bounce_ease_in_out,
    BounceEaseOutIn => bounce_ease_out_in,
    BackEaseOut => back_ease_out,
    BackEaseIn => back_ease_in,
    BackEaseInOut => back_ease_in_out,
    BackEaseOutIn => back_ease_out_in,
}

impl TweenMethod {
    /// Table entry for this method.
    #[inline]
    pub fn function(self) -> TweenFunction {
        TWEEN_FUNCTIONS[self as usize]
    }

    /// Evaluate this method at `time` within `[0, duration]`.
    #[inline]
    pub fn tween(self, start: f32, end: f32, time: f32, duration: f32) -> f32 {
        (self.function())(start, end, time, duration)
    }
}

impl Default for TweenMethod {
    fn default() -> Self {
        TweenMethod::Linear
    }
}

impl fmt::Display for TweenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TweenMethod {
    type Err = ParseTweenMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TweenMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTweenMethodError(s.to_owned()))
    }
}

// Shaping

#[inline]
fn shape(start: f32, end: f32, time: f32, duration: f32, curve: impl Fn(f32) -> f32) -> f32 {
    if time <= 0.0 {
        return start;
    }
    if time >= duration {
        return end;
    }
    start + (end - start) * curve(time / duration)
}

/// `first` over the first half, `second` over the second half.
#[inline]
fn halves(p: f32, first: fn(f32) -> f32, second: fn(f32) -> f32) -> f32 {
    if p < 0.5 {
        0.5 * first(2.0 * p)
    } else {
        0.5 + 0.5 * second(2.0 * p - 1.0)
    }
}

macro_rules! family {
    ($out:ident, $in_:ident, $in_out:ident, $out_in:ident; $ease_in:ident, $ease_out:ident) => {
        fn $out(start: f32, end: f32, time: f32, duration: f32) -> f32 {
            shape(start, end, time, duration, $ease_out)
        }
        fn $in_(start: f32, end: f32, time: f32, duration: f32) -> f32 {
            shape(start, end, time, duration, $ease_in)
        }
        fn $in_out(start: f32, end: f32, time: f32, duration: f32) -> f32 {
            shape(start, end, time, duration, |p| halves(p, $ease_in, $ease_out))
        }
        fn $out_in(start: f32, end: f32, time: f32, duration: f32) -> f32 {
            shape(start, end, time, duration, |p| halves(p, $ease_out, $ease_in))
        }
    };
}

fn linear(start: f32, end: f32, time: f32, duration: f32) -> f32 {
    shape(start, end, time, duration, |p| p)
}

family!(quadratic_ease_out, quadratic_ease_in, quadratic_ease_in_out, quadratic_ease_out_in; quad_in, quad_out);
family!(exponential_ease_out, exponential_ease_in, exponential_ease_in_out, exponential_ease_out_in; expo_in, expo_out);
family!(cubic_ease_out, cubic_ease_in, cubic_ease_in_out, cubic_ease_out_in; cubic_in, cubic_out);
family!(quartic_ease_out, quartic_ease_in, quartic_ease_in_out, quartic_ease_out_in; quart_in, quart_out);
family!(quintic_ease_out, quintic_ease_in, quintic_ease_in_out, quintic_ease_out_in; quint_in, quint_out);
family!(circular_ease_out, circular_ease_in, circular_ease_in_out, circular_ease_out_in; circ_in, circ_out);
family!(sine_ease_out, sine_ease_in, sine_ease_in_out, sine_ease_out_in; sine_in, sine_out);
family!(elastic_ease_out, elastic_ease_in, elastic_ease_in_out, elastic_ease_out_in; elastic_in, elastic_out);
family!(bounce_ease_out, bounce_ease_in, bounce_ease_in_out, bounce_ease_out_in; bounce_in, bounce_out);
family!(back_ease_out, back_ease_in, back_ease_in_out, back_ease_out_in; back_in, back_out);

// Curves on normalized progress p in (0, 1).

fn quad_in(p: f32) -> f32 {
    p * p
}

fn quad_out(p: f32) -> f32 {
    p * (2.0 - p)
}

fn expo_in(p: f32) -> f32 {
    2.0_f32.powf(10.0 * (p - 1.0))
}

fn expo_out(p: f32) -> f32 {
    1.0 - 2.0_f32.powf(-10.0 * p)
}

fn cubic_in(p: f32) -> f32 {
    p * p * p
}

fn cubic_out(p: f32) -> f32 {
    (p - 1.0).powi(3) + 1.0
}

fn quart_in(p: f32) -> f32 {
    p.powi(4)
}

fn quart_out(p: f32) -> f32 {
    1.0 - (p - 1.0).powi(4)
}

fn quint_in(p: f32) -> f32 {
    p.powi(5)
}

fn quint_out(p: f32) -> f32 {
    (p - 1.0).powi(5) + 1.0
}

fn circ_in(p: f32) -> f32 {
    1.0 - (1.0 - p * p).max(0.0).sqrt()
}

fn circ_out(p: f32) -> f32 {
    ((2.0 - p) * p).max(0.0).sqrt()
}

fn sine_in(p: f32) -> f32 {
    1.0 - (p * FRAC_PI_2).cos()
}

fn sine_out(p: f32) -> f32 {
    (p * FRAC_PI_2).sin()
}

const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_SHIFT: f32 = ELASTIC_PERIOD / 4.0;

fn elastic_in(p: f32) -> f32 {
    let q = p - 1.0;
    -(2.0_f32.powf(10.0 * q) * ((q - ELASTIC_SHIFT) * 2.0 * PI / ELASTIC_PERIOD).sin())
}

fn elastic_out(p: f32) -> f32 {
    2.0_f32.powf(-10.0 * p) * ((p - ELASTIC_SHIFT) * 2.0 * PI / ELASTIC_PERIOD).sin() + 1.0
}

fn bounce_out(p: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if p < 1.0 / D1 {
        N1 * p * p
    } else if p < 2.0 / D1 {
        let p = p - 1.5 / D1;
        N1 * p * p + 0.75
    } else if p < 2.5 / D1 {
        let p = p - 2.25 / D1;
        N1 * p * p + 0.9375
    } else {
        let p = p - 2.625 / D1;
        N1 * p * p + 0.984375
    }
}

fn bounce_in(p: f32) -> f32 {
    1.0 - bounce_out(1.0 - p)
}

const BACK_OVERSHOOT: f32 = 1.70158;

fn back_in(p: f32) -> f32 {
    p * p * ((BACK_OVERSHOOT + 1.0) * p - BACK_OVERSHOOT)
}

fn back_out(p: f32) -> f32 {
    let q = p - 1.0;
    q * q * ((BACK_OVERSHOOT + 1.0) * q + BACK_OVERSHOOT) + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_method() {
        assert_eq!(TweenMethod::COUNT, 41);
        assert_eq!(TweenMethod::ALL.len(), TWEEN_FUNCTIONS.len());
        for (i, m) in TweenMethod::ALL.iter().enumerate() {
            assert_eq!(*m as usize, i);
        }
    }

    #[test]
    fn endpoints_are_exact_for_every_method() {
        let cases = [(0.0, 1.0, 1.0), (0.1, 0.3, 0.7), (-5.0, 12.5, 3.0), (42.0, -7.25, 0.016)];
        for method in TweenMethod::ALL {
            for &(start, end, duration) in &cases {
                assert_eq!(method.tween(start, end, 0.0, duration), start, "{method} at 0");
                assert_eq!(method.tween(start, end, duration, duration), end, "{method} at d");
            }
        }
    }

    #[test]
    fn never_extrapolates_past_duration() {
        for method in TweenMethod::ALL {
            assert_eq!(method.tween(2.0, 8.0, 10.0, 1.0), 8.0);
            assert_eq!(method.tween(2.0, 8.0, -1.0, 1.0), 2.0);
        }
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(TweenMethod::Linear.tween(2.0, 6.0, 0.5, 1.0), 4.0);
        assert_eq!(TweenMethod::Linear.tween(0.0, 10.0, 1.5, 3.0), 5.0);
    }

    #[test]
    fn symmetric_families_hit_midpoint() {
        for method in [
            TweenMethod::QuadraticEaseInOut,
            TweenMethod::CubicEaseOutIn,
            TweenMethod::SineEaseInOut,
            TweenMethod::ExponentialEaseInOut,
        ] {
            let mid = method.tween(0.0, 10.0, 0.5, 1.0);
            assert!((mid - 5.0).abs() < 1e-4, "{method} mid = {mid}");
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        let slow = TweenMethod::CubicEaseIn.tween(0.0, 1.0, 0.25, 1.0);
        let fast = TweenMethod::CubicEaseOut.tween(0.0, 1.0, 0.25, 1.0);
        assert!(slow < 0.25, "ease-in at 0.25 was {slow}");
        assert!(fast > 0.25, "ease-out at 0.25 was {fast}");
    }

    #[test]
    fn back_out_overshoots() {
        let v = TweenMethod::BackEaseOut.tween(0.0, 1.0, 0.8, 1.0);
        assert!(v > 1.0, "BackEaseOut should overshoot, got {v}");
    }

    #[test]
    fn bounce_out_stays_in_range() {
        for i in 1..100 {
            let v = TweenMethod::BounceEaseOut.tween(0.0, 1.0, i as f32 / 100.0, 1.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("linear".parse::<TweenMethod>(), Ok(TweenMethod::Linear));
        assert_eq!(
            "ElasticEaseOutIn".parse::<TweenMethod>(),
            Ok(TweenMethod::ElasticEaseOutIn)
        );
        for method in TweenMethod::ALL {
            assert_eq!(method.to_string().parse::<TweenMethod>(), Ok(method));
        }
        assert!("wobble".parse::<TweenMethod>().is_err());
    }
}
