//! Blend curves and blend definitions.
//!
//! A curve maps normalized blend time to an incoming-camera weight in [0,1].
//! Presets cover the common shapes; `Custom` is cubic-bezier timing with the
//! x-bezier inverted by binary search.

use serde::{Deserialize, Serialize};

/// Time-ratio -> weight mapping for a blend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BlendCurve {
    /// Instantaneous switch; weight is 1 for the whole (zero-length) blend.
    Cut,
    Linear,
    EaseInOut,
    /// Eased departure, linear arrival.
    EaseIn,
    /// Linear departure, eased arrival.
    EaseOut,
    /// Abrupt departure, eased arrival.
    HardIn,
    /// Eased departure, abrupt arrival.
    HardOut,
    /// Cubic-bezier timing with control points (x1,y1) and (x2,y2).
    Custom { p1: (f32, f32), p2: (f32, f32) },
}

impl BlendCurve {
    /// Evaluate the curve at normalized time `t`. Output is clamped to [0,1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let w = match self {
            BlendCurve::Cut => 1.0,
            BlendCurve::Linear => t,
            BlendCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
            BlendCurve::EaseIn => bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
            BlendCurve::EaseOut => bezier_ease(t, 0.0, 0.0, 0.58, 1.0),
            BlendCurve::HardIn => bezier_ease(t, 0.0, 0.0, 0.8, 0.0),
            BlendCurve::HardOut => bezier_ease(t, 0.2, 1.0, 1.0, 1.0),
            BlendCurve::Custom { p1, p2 } => bezier_ease(t, p1.0, p1.1, p2.0, p2.1),
        };
        w.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_cut(&self) -> bool {
        matches!(self, BlendCurve::Cut)
    }
}

impl Default for BlendCurve {
    fn default() -> Self {
        BlendCurve::EaseInOut
    }
}

/// Curve + duration pair resolved for a specific camera transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendDefinition {
    pub curve: BlendCurve,
    /// Seconds; <= 0 means cut.
    pub duration: f32,
}

impl BlendDefinition {
    pub fn new(curve: BlendCurve, duration: f32) -> Self {
        Self { curve, duration }
    }

    pub fn cut() -> Self {
        Self {
            curve: BlendCurve::Cut,
            duration: 0.0,
        }
    }

    #[inline]
    pub fn is_cut(&self) -> bool {
        self.duration <= 0.0 || self.curve.is_cut()
    }
}

impl Default for BlendDefinition {
    fn default() -> Self {
        Self {
            curve: BlendCurve::EaseInOut,
            duration: 2.0,
        }
    }
}

/// Cubic Bezier basis function.
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Fast path: Bezier(0,0,1,1) is exactly linear -> eased t == t
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for curve in [
            BlendCurve::Linear,
            BlendCurve::EaseInOut,
            BlendCurve::EaseIn,
            BlendCurve::EaseOut,
            BlendCurve::Custom {
                p1: (0.3, 0.1),
                p2: (0.7, 0.9),
            },
        ] {
            assert!(curve.evaluate(0.0).abs() < 1e-4, "{curve:?} at 0");
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-4, "{curve:?} at 1");
        }
    }

    #[test]
    fn linear_midpoint() {
        assert!((BlendCurve::Linear.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn cut_definition_detection() {
        assert!(BlendDefinition::cut().is_cut());
        assert!(BlendDefinition::new(BlendCurve::Linear, 0.0).is_cut());
        assert!(!BlendDefinition::default().is_cut());
    }
}
