use std::time::Duration;

use crate::foundation::error::{SketchError, SketchResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Monotonic frame counter of a running session (0-based).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> SketchResult<Self> {
        if den == 0 {
            return Err(SketchError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SketchError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number rate, e.g. `Fps::per_second(60)`.
    pub fn per_second(num: u32) -> SketchResult<Self> {
        Self::new(num, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Nominal wall-clock spacing between two frames.
    pub fn frame_period(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Pixel dimensions of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> SketchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SketchError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Dimensions narrowed to the `u16` range the CPU rasteriser accepts.
    pub fn as_u16(self) -> SketchResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| SketchError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| SketchError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight RGB colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Quantise to 8-bit channels, clamping out-of-range components.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// 2D orthographic projection: the world rectangle that maps onto the full canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Projection {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Projection {
    /// Unit square `[-1, 1] x [-1, 1]`, the identity clip space.
    pub const UNIT: Self = Self {
        left: -1.0,
        right: 1.0,
        bottom: -1.0,
        top: 1.0,
    };

    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64) -> SketchResult<Self> {
        let p = Self {
            left,
            right,
            bottom,
            top,
        };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> SketchResult<()> {
        let spans = [self.right - self.left, self.top - self.bottom];
        if spans.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(SketchError::validation(
                "projection must have finite, non-empty extents",
            ));
        }
        Ok(())
    }

    /// World-to-pixel transform for a canvas of `size`, with y pointing up in world space.
    pub fn to_pixel_affine(&self, size: CanvasSize) -> Affine {
        let sx = f64::from(size.width) / (self.right - self.left);
        let sy = f64::from(size.height) / (self.top - self.bottom);
        Affine::new([sx, 0.0, 0.0, -sy, -self.left * sx, self.top * sy])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
