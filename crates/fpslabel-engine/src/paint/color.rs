/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Creates a color from hue, saturation, value and alpha.
    ///
    /// `h` is in turns: it is wrapped into `[0, 1)` (so `-0.054` becomes `0.946`
    /// and `1.2` becomes `0.2`). `s`, `v` and `a` are clamped to `[0, 1]`.
    /// Non-finite hues are treated as `0` (red).
    pub fn from_hsva(h: f32, s: f32, v: f32, a: f32) -> Self {
        let h = normalize_hue(h);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let scaled = h * 6.0;
        let sector = scaled.floor();
        let f = scaled - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::from_straight(r, g, b, a)
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }
}

/// Wraps a hue expressed in turns into `[0, 1)`.
#[inline]
pub fn normalize_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5
            && (a.g - b.g).abs() < 1e-5
            && (a.b - b.b).abs() < 1e-5
            && (a.a - b.a).abs() < 1e-5
    }

    #[test]
    fn primary_hues() {
        assert!(close(Color::from_hsva(0.0, 1.0, 1.0, 1.0), Color::from_straight(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Color::from_hsva(1.0 / 3.0, 1.0, 1.0, 1.0), Color::from_straight(0.0, 1.0, 0.0, 1.0)));
        assert!(close(Color::from_hsva(2.0 / 3.0, 1.0, 1.0, 1.0), Color::from_straight(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn zero_saturation_is_grey() {
        let c = Color::from_hsva(0.42, 0.0, 0.9, 1.0);
        assert!(close(c, Color::from_straight(0.9, 0.9, 0.9, 1.0)));
    }

    #[test]
    fn hue_wraps_around() {
        assert!((normalize_hue(-0.054) - 0.946).abs() < 1e-6);
        assert!((normalize_hue(1.25) - 0.25).abs() < 1e-6);
        assert_eq!(normalize_hue(1.0), 0.0);
        assert_eq!(normalize_hue(f32::NAN), 0.0);
        assert!(close(Color::from_hsva(-0.054, 1.0, 0.9, 1.0), Color::from_hsva(0.946, 1.0, 0.9, 1.0)));
    }

    #[test]
    fn yellow_green_at_target() {
        // hue 0.216 sits in the yellow -> green sextant: red falling, green at max.
        let (r, g, b, a) = Color::from_hsva(0.216, 1.0, 0.9, 1.0).to_straight();
        assert!((g - 0.9).abs() < 1e-6);
        assert!(r > 0.0 && r < g);
        assert!(b.abs() < 1e-6);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn premultiplies_alpha() {
        let c = Color::from_hsva(0.0, 1.0, 1.0, 0.5);
        assert!(close(c, Color::from_premul(0.5, 0.0, 0.0, 0.5)));
        assert_eq!(c.to_straight(), (1.0, 0.0, 0.0, 0.5));
    }
}
