//! Easing curves applied to the elapsed fraction of a transition.
//!
//! A reveal transition measures progress as `elapsed / duration`, clamped to
//! `0.0..=1.0`. The timing function maps that fraction to an interpolation
//! factor:
//!
//! - [`TimingFunction::Linear`] - progress maps 1:1
//! - [`TimingFunction::EaseIn`] - accelerates out of the start state
//! - [`TimingFunction::EaseOut`] - decelerates into the target state
//! - [`TimingFunction::EaseInOut`] - slow at both ends
//! - [`TimingFunction::CubicBezier`] - CSS-style `cubic-bezier(x1, y1, x2, y2)`
//! - [`TimingFunction::Custom`] - any `Fn(f32) -> f32`
//!
//! Curves are only ever evaluated strictly inside the transition window. The
//! orchestrator returns the exact target state once the window has elapsed,
//! so curves that do not land on `1.0` cannot leave an element short of its
//! target.
//!
//! ```ignore
//! let slide = Transition::new(500.0, "easeInOut".parse()?);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Timing function that controls the animation curve
#[derive(Clone, Default)]
pub enum TimingFunction {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// User supplied curve
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the curve at fraction `t`. Input is clamped to `0.0..=1.0`;
    /// the output may leave that range for curves that overshoot.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                let s = solve_bezier_x(t, *x1, *x2);
                bezier_axis(s, *y1, *y2)
            }
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Error returned when an easing name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing '{0}'")]
pub struct UnknownEasing(pub String);

impl FromStr for TimingFunction {
    type Err = UnknownEasing;

    /// Accepts the camelCase names used by web animation libraries as well
    /// as their kebab-case CSS spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(TimingFunction::Linear),
            "easeIn" | "ease-in" => Ok(TimingFunction::EaseIn),
            "easeOut" | "ease-out" => Ok(TimingFunction::EaseOut),
            "easeInOut" | "ease-in-out" => Ok(TimingFunction::EaseInOut),
            other => Err(UnknownEasing(other.to_string())),
        }
    }
}

/// One axis of a cubic bezier with endpoints fixed at 0 and 1.
fn bezier_axis(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate equals `x`.
/// Newton-Raphson first, bisection if the slope flattens out.
fn solve_bezier_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(s, x1, x2) - x;
        if err.abs() < 1e-6 {
            return s;
        }
        let slope = bezier_axis_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(s, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(TimingFunction::Linear.evaluate(-1.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_ease_curves_hit_endpoints() {
        for timing in [
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
        ] {
            assert_eq!(timing.evaluate(0.0), 0.0, "{:?}", timing);
            assert_eq!(timing.evaluate(1.0), 1.0, "{:?}", timing);
        }
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert!(TimingFunction::EaseIn.evaluate(0.5) < 0.5);
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
        assert!((TimingFunction::EaseInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_bezier_linear_equivalent() {
        let curve = TimingFunction::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for t in [0.1, 0.3, 0.5, 0.9] {
            assert!((curve.evaluate(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cubic_bezier_ease() {
        // CSS `ease`
        let curve = TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0);
        assert!(curve.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.4), 0.0);
        assert_eq!(step.evaluate(0.6), 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert!(matches!(
            "easeInOut".parse::<TimingFunction>(),
            Ok(TimingFunction::EaseInOut)
        ));
        assert!(matches!(
            "ease-out".parse::<TimingFunction>(),
            Ok(TimingFunction::EaseOut)
        ));
        assert!(matches!(
            "linear".parse::<TimingFunction>(),
            Ok(TimingFunction::Linear)
        ));
        let err = "wobble".parse::<TimingFunction>().unwrap_err();
        assert_eq!(err, UnknownEasing("wobble".into()));
        assert_eq!(err.to_string(), "unknown easing 'wobble'");
    }
}
