//! Angle helpers, all in degrees

use crate::Vec2;

/// Wrap an angle into `[0, 360)`
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Direction from `from` to `to` in `[0, 360)`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    wrap_degrees(crate::degrees(d.y.atan2(d.x)))
}

/// Signed turn that takes `from` onto `to` along the shorter direction.
///
/// The result lies in `(-180, 180]`; an exact half turn is reported as `+180`.
#[inline]
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    let d = (to - from + 180.0).rem_euclid(360.0) - 180.0;
    if d <= -180.0 { d + 360.0 } else { d }
}

/// True if `bearing` lies within `fov / 2` of `heading`
#[inline]
pub fn in_field_of_view(bearing: f32, heading: f32, fov: f32) -> bool {
    shortest_turn(heading, bearing).abs() <= fov * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_screen_axes() {
        let o = Vec2::ZERO;
        assert_relative_eq!(bearing(o, Vec2::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(bearing(o, Vec2::new(0.0, 1.0)), 90.0, epsilon = 1e-4);
        assert_relative_eq!(bearing(o, Vec2::new(-1.0, 0.0)), 180.0, epsilon = 1e-4);
        assert_relative_eq!(bearing(o, Vec2::new(0.0, -1.0)), 270.0, epsilon = 1e-4);
    }

    #[test]
    fn test_shortest_turn_range() {
        for from in (-720..=720).step_by(15) {
            for to in (-720..=720).step_by(15) {
                let turn = shortest_turn(from as f32, to as f32);
                assert!(turn > -180.0 && turn <= 180.0, "{from} -> {to} = {turn}");
                let alternative = if turn > 0.0 { turn - 360.0 } else { turn + 360.0 };
                assert!(turn.abs() <= alternative.abs());
            }
        }
    }

    #[test]
    fn test_shortest_turn_wraps() {
        assert_relative_eq!(shortest_turn(350.0, 10.0), 20.0, epsilon = 1e-4);
        assert_relative_eq!(shortest_turn(10.0, 350.0), -20.0, epsilon = 1e-4);
        assert_relative_eq!(shortest_turn(0.0, 180.0), 180.0);
        assert_relative_eq!(shortest_turn(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_field_of_view() {
        assert!(in_field_of_view(40.0, 0.0, 90.0));
        assert!(in_field_of_view(320.0, 0.0, 90.0));
        assert!(!in_field_of_view(50.0, 0.0, 90.0));
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(-90.0), 270.0);
        assert_relative_eq!(wrap_degrees(720.0), 0.0);
    }
}
