//! Timing functions.

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// Control-point x coordinates are clamped to `0..=1`, as CSS requires.
    #[must_use]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    fn sample_x(&self, s: f32) -> f32 {
        bezier(self.x1, self.x2, s)
    }

    fn sample_y(&self, s: f32) -> f32 {
        bezier(self.y1, self.y2, s)
    }

    fn slope_x(&self, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1 + 6.0 * inv * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Solve for the curve parameter whose x equals `x`, then return y.
    #[must_use]
    pub fn apply(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x <= 0.0 || x >= 1.0 {
            return x;
        }

        // Newton-Raphson first; it converges in a few steps for sane curves.
        let mut s = x;
        for _ in 0..8 {
            let err = self.sample_x(s) - x;
            if err.abs() < 1e-6 {
                return self.sample_y(s);
            }
            let slope = self.slope_x(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // Bisection fallback for flat regions.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..32 {
            let value = self.sample_x(s);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        self.sample_y(s)
    }
}

fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Easing curve applied to an effect's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-out.
    EaseOut,
    EaseInOut,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`, shared by every slide transition.
    #[default]
    Standard,
    /// Ease-out with a small overshoot past the end value.
    Overshoot,
    Custom(CubicBezier),
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = -2.0 * t + 2.0;
                    1.0 - f * f * f / 2.0
                }
            }
            Self::Standard => CubicBezier::new(0.4, 0.0, 0.2, 1.0).apply(t),
            Self::Overshoot => CubicBezier::new(0.34, 1.56, 0.64, 1.0).apply(t),
            Self::Custom(curve) => curve.apply(t),
        }
    }
}
