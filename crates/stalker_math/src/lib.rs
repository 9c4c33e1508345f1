//! # stalker_math - 2D Geometry for a Top-Down World
//!
//! Small, dependency-free math primitives used by navigation, perception
//! and motion. Screen convention: `x` grows to the right, `y` grows down,
//! and angles are measured in degrees with `atan2(dy, dx)`.

pub mod angle;
pub mod bounds;
pub mod intersect;
pub mod vector;

pub use angle::*;
pub use bounds::*;
pub use intersect::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const SQRT_2: f32 = core::f32::consts::SQRT_2;
    /// Tolerance used by the segment intersection test
    pub const SEGMENT_EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub mod prelude {
    pub use crate::angle::{bearing, in_field_of_view, shortest_turn, wrap_degrees};
    pub use crate::bounds::Rect;
    pub use crate::intersect::{is_parallel, segment_enters_rect, segment_hits_rect, segments_intersect};
    pub use crate::vector::Vec2;
    pub use crate::{degrees, lerp, radians};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radian_roundtrip() {
        assert_relative_eq!(degrees(radians(90.0)), 90.0, epsilon = 1e-4);
        assert_relative_eq!(radians(180.0), consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
    }
}
