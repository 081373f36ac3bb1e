//! Visual state written to elements as inline style.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// 2D transform in CSS pixels, applied as `translate(..) scale(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    #[must_use]
    pub const fn scale(factor: f32) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: factor,
            scale_y: factor,
        }
    }

    #[must_use]
    pub const fn with_scale(self, factor: f32) -> Self {
        Self {
            scale_x: factor,
            scale_y: factor,
            ..self
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            translate_x: lerp(self.translate_x, to.translate_x, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale_x: lerp(self.scale_x, to.scale_x, t),
            scale_y: lerp(self.scale_y, to.scale_y, t),
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.approx_eq(Self::IDENTITY)
    }

    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        approx(self.translate_x, other.translate_x)
            && approx(self.translate_y, other.translate_y)
            && approx(self.scale_x, other.scale_x)
            && approx(self.scale_y, other.scale_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("none");
        }
        write!(
            f,
            "translate({}px, {}px) scale({}, {})",
            round3(self.translate_x),
            round3(self.translate_y),
            round3(self.scale_x),
            round3(self.scale_y)
        )
    }
}

/// Opacity plus transform: everything an entrance or utility animation
/// touches on an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub opacity: f32,
    pub transform: Transform,
}

impl VisualState {
    /// Fully visible, no transform. The end state of every entrance
    /// animation, and the only state applied under reduced motion.
    pub const RESTING: Self = Self {
        opacity: 1.0,
        transform: Transform::IDENTITY,
    };

    #[must_use]
    pub const fn new(opacity: f32, transform: Transform) -> Self {
        Self { opacity, transform }
    }

    #[must_use]
    pub const fn hidden(transform: Transform) -> Self {
        Self {
            opacity: 0.0,
            transform,
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            transform: self.transform.lerp(to.transform, t),
        }
    }

    #[must_use]
    pub fn is_resting(self) -> bool {
        approx(self.opacity, 1.0) && self.transform.is_identity()
    }

    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        approx(self.opacity, other.opacity) && self.transform.approx_eq(other.transform)
    }

    /// Inline CSS declaration block.
    #[must_use]
    pub fn css(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "opacity: {}; transform: {};",
            round3(self.opacity),
            self.transform
        );
        out
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::RESTING
    }
}

/// Inline style applied to a slide while it takes part in a transition.
///
/// The offset is a percentage of the container width, so it is
/// independent of viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideStyle {
    pub offset_percent: f32,
    pub opacity: f32,
}

impl SlideStyle {
    pub const CENTERED: Self = Self {
        offset_percent: 0.0,
        opacity: 1.0,
    };

    #[must_use]
    pub const fn off_screen(sign: f32) -> Self {
        Self {
            offset_percent: 100.0 * sign,
            opacity: 0.0,
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            offset_percent: lerp(self.offset_percent, to.offset_percent, t),
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "transform: translateX({}%); opacity: {};",
            round3(self.offset_percent),
            round3(self.opacity)
        )
    }
}

/// Element bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }

    /// Transform that makes an element laid out at `self` appear at
    /// `target`, with the transform origin at the top-left corner.
    ///
    /// Degenerate (zero-sized) source boxes keep a unit scale.
    #[must_use]
    pub fn transform_to(self, target: Self) -> Transform {
        let scale_x = if self.width > 0.0 {
            target.width / self.width
        } else {
            1.0
        };
        let scale_y = if self.height > 0.0 {
            target.height / self.height
        } else {
            1.0
        };
        Transform {
            translate_x: target.x - self.x,
            translate_y: target.y - self.y,
            scale_x,
            scale_y,
        }
    }
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn round3(value: f32) -> f32 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded.abs() < f32::EPSILON {
        0.0
    } else {
        rounded
    }
}
