//! Scalar helpers and vertex attribute packing.

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Packs three byte-range channels into one float attribute word.
///
/// Each channel is clamped to `0..=255` and truncated, then laid out as
/// `x + y * 256 + z * 65536`. The result stays below 2^24, so it is exactly
/// representable in an `f32` and can be unpacked in a shader with integer
/// division.
#[inline]
#[must_use]
pub fn encode_float3(x: f32, y: f32, z: f32) -> f32 {
    let x = channel(x);
    let y = channel(y);
    let z = channel(z);
    (x + (y << 8) + (z << 16)) as f32
}

/// Inverse of [`encode_float3`].
#[must_use]
pub fn decode_float3(word: f32) -> [u32; 3] {
    let bits = word as u32;
    [bits & 0xff, (bits >> 8) & 0xff, (bits >> 16) & 0xff]
}

#[inline]
fn channel(value: f32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_packs_low_to_high() {
        let word = encode_float3(1.0, 2.0, 3.0);
        assert_eq!(word, (1 + 2 * 256 + 3 * 65536) as f32);
        assert_eq!(decode_float3(word), [1, 2, 3]);
    }

    #[test]
    fn encode_clamps_out_of_range_channels() {
        assert_eq!(decode_float3(encode_float3(-4.0, 300.0, f32::NAN)), [0, 255, 0]);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
