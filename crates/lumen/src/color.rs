use image::Rgb;

/// Linear RGB. Conversion to sRGB happens only when writing files.
pub type Color = Rgb<f32>;

pub const WHITE: Color = Rgb([1.0, 1.0, 1.0]);
pub const BLACK: Color = Rgb([0.0, 0.0, 0.0]);

pub fn gray(c: f32) -> Color {
    Rgb([c, c, c])
}

/// sRGB transfer function, applied channel-wise on linear values.
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = linear.clamp(0.0, 1.0);
    if linear.is_nan() {
        0.0
    } else if linear < 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

pub fn to_srgb(color: Color) -> Color {
    Rgb(color.0.map(linear_to_srgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_transfer_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        // out of gamut values are clamped, not amplified
        assert!((linear_to_srgb(4.2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn srgb_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = linear_to_srgb(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
