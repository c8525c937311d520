//! HSLA colors as used by the canvas fill style

use std::fmt;

/// HSLA color
///
/// Hue is in degrees, saturation and lightness in percent, alpha in `[0, 1]`,
/// matching the CSS `hsla()` notation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Alpha clamped to `[0, 1]` the way a canvas clamps it
    pub fn clamped_alpha(&self) -> f32 {
        if self.alpha.is_nan() {
            0.0
        } else {
            self.alpha.clamp(0.0, 1.0)
        }
    }

    /// Convert to normalized RGB, each channel in `[0, 1]`
    pub fn to_rgb(&self) -> [f32; 3] {
        let h = (self.hue / 360.0).rem_euclid(1.0);
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        if s < 0.0001 {
            return [l, l, l];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        [
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        ]
    }

    /// Convert to 8-bit RGBA
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb();
        [
            to_byte(r),
            to_byte(g),
            to_byte(b),
            to_byte(self.clamped_alpha()),
        ]
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
