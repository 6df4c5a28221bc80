/// Opaque 8-bit sRGB color.
///
/// The canvas is 3-channel; translucency only exists as a blend weight applied
/// when compositing one layer over another (see [`Color::blend`]).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from hue (degrees, wrapped into `[0, 360)`), saturation and
    /// value (both clamped to `[0, 1]`).
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(unit_to_u8(r + m), unit_to_u8(g + m), unit_to_u8(b + m))
    }

    /// Weighted blend `alpha·layer + (1-alpha)·base`, per channel, rounded to
    /// nearest and saturated to `0..=255`.
    #[inline]
    pub fn blend(layer: Color, base: Color, alpha: f32) -> Color {
        let mix = |l: u8, b: u8| -> u8 {
            let v = alpha * l as f32 + (1.0 - alpha) * b as f32;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(layer.r, base.r), mix(layer.g, base.g), mix(layer.b, base.b))
    }

    /// Returns `(r, g, b)` in `[0, 1]`, still sRGB-encoded.
    #[inline]
    pub fn to_unit(self) -> (f32, f32, f32) {
        (self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0)
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── blend ─────────────────────────────────────────────────────────────

    #[test]
    fn blend_half_over_black_halves() {
        let c = Color::blend(Color::rgb(130, 180, 254), Color::BLACK, 0.5);
        assert_eq!(c, Color::rgb(65, 90, 127));
    }

    #[test]
    fn blend_rounds_half_away_from_zero() {
        let c = Color::blend(Color::rgb(255, 1, 0), Color::BLACK, 0.5);
        assert_eq!(c, Color::rgb(128, 1, 0));
    }

    #[test]
    fn blend_of_identical_colors_is_identity() {
        let c = Color::rgb(17, 200, 99);
        assert_eq!(Color::blend(c, c, 0.5), c);
        assert_eq!(Color::blend(c, c, 0.3), c);
    }

    #[test]
    fn blend_weight_extremes() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(Color::blend(a, b, 1.0), a);
        assert_eq!(Color::blend(a, b, 0.0), b);
    }

    // ── hsv ───────────────────────────────────────────────────────────────

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::rgb(0, 0, 255));
    }

    #[test]
    fn hsv_hue_wraps() {
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0), Color::from_hsv(0.0, 1.0, 1.0));
        assert_eq!(Color::from_hsv(-120.0, 1.0, 1.0), Color::from_hsv(240.0, 1.0, 1.0));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        let c = Color::from_hsv(77.0, 0.0, 0.5);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
