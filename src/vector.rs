/*
 * Vector Module
 *
 * Helpers on top of nannou's `Vec2`. Addition, subtraction, scaling and
 * magnitude come straight from `Vec2`; this adds the pieces the steering
 * code needs and `Vec2` leaves to the caller: zero-safe normalisation,
 * speed limiting and heading.
 */

use nannou::prelude::Vec2;

pub trait VecExt {
    /// Euclidean length.
    fn magnitude(self) -> f32;

    /// Unit vector in the same direction, or zero for a zero vector.
    fn unit_or_zero(self) -> Vec2;

    /// Rescale to `max` when longer than `max`, otherwise unchanged. The
    /// result's length never exceeds `max`; a negative `max` acts as zero.
    fn limit_length(self, max: f32) -> Vec2;

    /// Angle of the vector in radians, measured from the +x axis.
    fn heading(self) -> f32;
}

impl VecExt for Vec2 {
    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn unit_or_zero(self) -> Vec2 {
        let length_squared = self.length_squared();
        if length_squared > 0.0 {
            self / length_squared.sqrt()
        } else {
            Vec2::ZERO
        }
    }

    #[inline]
    fn limit_length(self, max: f32) -> Vec2 {
        let max = max.max(0.0);
        if self.length() <= max {
            return self;
        }

        let mut limited = self.unit_or_zero() * max;
        // Rounding can leave the product an ulp long
        while limited.length() > max {
            limited *= 1.0 - f32::EPSILON;
        }
        limited
    }

    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;
    use proptest::prelude::*;

    #[test]
    fn magnitude_of_three_four_is_five() {
        assert_eq!(vec2(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn unit_or_zero_handles_zero() {
        assert_eq!(Vec2::ZERO.unit_or_zero(), Vec2::ZERO);
        let unit = vec2(0.0, -2.0).unit_or_zero();
        assert_eq!(unit, vec2(0.0, -1.0));
    }

    #[test]
    fn limit_length_only_shrinks() {
        let short = vec2(1.0, 1.0);
        assert_eq!(short.limit_length(5.0), short);

        let long = vec2(30.0, 40.0).limit_length(5.0);
        assert!((long.magnitude() - 5.0).abs() < 1e-5);
        assert!((long.x - 3.0).abs() < 1e-5);
        assert!((long.y - 4.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn limit_length_is_a_hard_ceiling(
            x in -1.0e4f32..1.0e4,
            y in -1.0e4f32..1.0e4,
            max in 0.01f32..50.0,
        ) {
            let limited = vec2(x, y).limit_length(max);
            prop_assert!(limited.length() <= max, "{} over {}", limited.length(), max);
        }
    }

    #[test]
    fn limit_length_handles_awkward_limits() {
        for max in [0.1f32, 0.3, 5.0, 8.0, 7.000001] {
            for step in 1..200 {
                let angle = step as f32 * 0.0317;
                let v = vec2(angle.cos(), angle.sin()) * (max * 3.7 + step as f32);
                assert!(v.limit_length(max).length() <= max);
            }
        }
        assert_eq!(vec2(3.0, 4.0).limit_length(0.0), Vec2::ZERO);
        assert_eq!(vec2(3.0, 4.0).limit_length(-1.0), Vec2::ZERO);
    }

    #[test]
    fn heading_follows_direction() {
        assert_eq!(vec2(1.0, 0.0).heading(), 0.0);
        assert!((vec2(0.0, 1.0).heading() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
