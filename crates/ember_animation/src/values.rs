//! Value shapes keyframe tracks interpolate.

use glam::{Vec3, Vec4};

/// Value shapes a [`KeyframeTrack`](crate::tracks::KeyframeTrack) can carry.
///
/// Continuous shapes blend as weighted sums of up to four control values,
/// which covers linear, Hermite and Bezier keys. Discrete shapes (texture
/// slots, replaceable ids) never blend and always hold the earlier key.
pub trait Interpolatable: Copy + PartialEq + Sized {
    /// Whether intermediate values exist between two keys.
    const CONTINUOUS: bool;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// `a * w[0] + b * w[1] + c * w[2] + d * w[3]`.
    fn weighted_sum(a: Self, b: Self, c: Self, d: Self, w: [f32; 4]) -> Self;
}

/// Hermite basis weights for `(v0, out_tangent0, in_tangent1, v1)`.
#[must_use]
pub fn hermite_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    [
        t2 * (2.0 * t - 3.0) + 1.0,
        t2 * (t - 2.0) + t,
        t2 * (t - 1.0),
        t2 * (3.0 - 2.0 * t),
    ]
}

/// Cubic Bezier basis weights for `(v0, out_tangent0, in_tangent1, v1)`.
#[must_use]
pub fn bezier_weights(t: f32) -> [f32; 4] {
    let inv = 1.0 - t;
    [inv * inv * inv, 3.0 * t * inv * inv, 3.0 * t * t * inv, t * t * t]
}

impl Interpolatable for f32 {
    const CONTINUOUS: bool = true;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn weighted_sum(a: Self, b: Self, c: Self, d: Self, w: [f32; 4]) -> Self {
        a * w[0] + b * w[1] + c * w[2] + d * w[3]
    }
}

impl Interpolatable for u32 {
    const CONTINUOUS: bool = false;

    fn interpolate_linear(start: Self, _end: Self, _t: f32) -> Self {
        start
    }

    fn weighted_sum(a: Self, _b: Self, _c: Self, _d: Self, _w: [f32; 4]) -> Self {
        a
    }
}

impl Interpolatable for Vec3 {
    const CONTINUOUS: bool = true;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn weighted_sum(a: Self, b: Self, c: Self, d: Self, w: [f32; 4]) -> Self {
        a * w[0] + b * w[1] + c * w[2] + d * w[3]
    }
}

impl Interpolatable for Vec4 {
    const CONTINUOUS: bool = true;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn weighted_sum(a: Self, b: Self, c: Self, d: Self, w: [f32; 4]) -> Self {
        a * w[0] + b * w[1] + c * w[2] + d * w[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_weights_hit_endpoints() {
        assert_eq!(hermite_weights(0.0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(hermite_weights(1.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(bezier_weights(0.0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(bezier_weights(1.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn bezier_weights_partition_unity() {
        for i in 0..=10 {
            let sum: f32 = bezier_weights(i as f32 / 10.0).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }
}
