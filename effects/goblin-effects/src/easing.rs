//! CSS timing functions

/// A CSS `cubic-bezier(x1, y1, x2, y2)` timing function
///
/// The curve runs from `(0, 0)` to `(1, 1)`; `x` is elapsed time and `y` is
/// animation progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// CSS `linear`
pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

/// CSS `ease-out`
pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);

/// CSS `ease` (the browser default)
pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 24;
const EPSILON: f32 = 1e-6;

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Progress at time fraction `t`, clamped to `[0, 1]`
    pub fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        sample(self.y1, self.y2, s)
    }

    /// Curve parameter whose x coordinate equals `x`
    fn solve_x(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = sample(self.x1, self.x2, s) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = derivative(self.x1, self.x2, s);
            if slope.abs() < EPSILON {
                break;
            }
            s -= err / slope;
        }

        // Newton diverged or stalled on a flat section
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(self.x1, self.x2, s);
            if (value - x).abs() < EPSILON {
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
}

/// One coordinate of the curve with endpoints fixed at 0 and 1
#[inline]
fn sample(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn derivative(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for curve in [LINEAR, EASE, EASE_OUT] {
            assert_eq!(curve.ease(0.0), 0.0);
            assert_eq!(curve.ease(1.0), 1.0);
            assert_eq!(curve.ease(-1.0), 0.0);
            assert_eq!(curve.ease(2.0), 1.0);
        }
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((LINEAR.ease(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(EASE_OUT.ease(t) > t, "ease-out should be ahead at {t}");
        }
    }

    #[test]
    fn test_ease_out_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = EASE_OUT.ease(i as f32 / 100.0);
            assert!(v >= last - 1e-6);
            last = v;
        }
    }
}
