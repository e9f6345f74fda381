//! Palette and gradient functions for line coloring

use serde::{Deserialize, Serialize};

/// Linear-blend RGB color (components in 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn scale(self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Shift HSL lightness by `delta`, keeping hue and saturation
    pub fn offset_lightness(self, delta: f32) -> Color {
        let (h, s, l) = self.to_hsl();
        Color::from_hsl(h, s, (l + delta).clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;
        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l <= 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    fn from_hsl(h: f32, s: f32, l: f32) -> Color {
        if s == 0.0 {
            return Color::new(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Color::new(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
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

/// Named palette stops
pub mod palette {
    use super::Color;

    pub const COSMIC: Color = Color::from_hex(0x9d4edd);
    pub const DIVINE: Color = Color::from_hex(0xf72585);
    pub const ETHEREAL: Color = Color::from_hex(0x4cc9f0);
    pub const GOLDEN: Color = Color::from_hex(0xffd700);

    /// Highlight for the in-between revolution ring
    pub const ACCENT: Color = Color::from_hex(0x00ffaa);

    /// Grid lines (center cross, regular lines)
    pub const GRID_CENTER: Color = Color::from_hex(0x4a1a7a);
    pub const GRID_LINE: Color = Color::from_hex(0x1a0a2e);

    /// Clear color behind everything
    pub const BACKGROUND: Color = Color::from_hex(0x050510);
}

use palette::*;

/// Cyclic four-stop gradient: ethereal -> cosmic -> divine -> golden -> ethereal
///
/// `t` is wrapped into [0, 1), so `gradient(0.0)` and `gradient(1.0 - ε)` sit
/// next to each other and time-offset animations loop without a seam.
pub fn gradient(t: f32) -> Color {
    let t = t.rem_euclid(1.0);

    if t < 0.25 {
        ETHEREAL.lerp(COSMIC, t * 4.0)
    } else if t < 0.5 {
        COSMIC.lerp(DIVINE, (t - 0.25) * 4.0)
    } else if t < 0.75 {
        DIVINE.lerp(GOLDEN, (t - 0.5) * 4.0)
    } else {
        GOLDEN.lerp(ETHEREAL, (t - 0.75) * 4.0)
    }
}

/// Three-band gradient used on revolution rings: ethereal -> cosmic -> divine -> golden
pub fn sweep_gradient(t: f32) -> Color {
    let t = t.rem_euclid(1.0);

    if t < 0.33 {
        ETHEREAL.lerp(COSMIC, t * 3.0)
    } else if t < 0.66 {
        COSMIC.lerp(DIVINE, (t - 0.33) * 3.0)
    } else {
        DIVINE.lerp(GOLDEN, (t - 0.66) * 3.0)
    }
}

/// Base color pair for a ring at the given sweep fraction (0 = start of revolution)
pub fn sweep_band(fraction: f32) -> (Color, Color) {
    if fraction < 0.33 {
        (ETHEREAL, COSMIC)
    } else if fraction < 0.66 {
        (COSMIC, DIVINE)
    } else {
        (DIVINE, GOLDEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color, eps: f32) -> bool {
        (a.r - b.r).abs() < eps && (a.g - b.g).abs() < eps && (a.b - b.b).abs() < eps
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xff0080);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_hits_stops_at_quartiles() {
        assert!(close(gradient(0.0), ETHEREAL, 1e-6));
        assert!(close(gradient(0.25), COSMIC, 1e-6));
        assert!(close(gradient(0.5), DIVINE, 1e-6));
        assert!(close(gradient(0.75), GOLDEN, 1e-6));
    }

    #[test]
    fn test_gradient_is_cyclic() {
        // Approaching 1 from below lands back on the starting stop
        assert!(close(gradient(0.999_99), gradient(0.0), 1e-3));
        // Wrapped inputs behave like their fractional part
        assert!(close(gradient(1.3), gradient(0.3), 1e-5));
        assert!(close(gradient(-0.2), gradient(0.8), 1e-5));
    }

    #[test]
    fn test_gradient_is_continuous() {
        let steps = 1000;
        for i in 0..steps {
            let a = gradient(i as f32 / steps as f32);
            let b = gradient((i + 1) as f32 / steps as f32);
            assert!(close(a, b, 0.02), "jump at step {i}");
        }
    }

    #[test]
    fn test_sweep_band() {
        assert_eq!(sweep_band(0.1), (ETHEREAL, COSMIC));
        assert_eq!(sweep_band(0.5), (COSMIC, DIVINE));
        assert_eq!(sweep_band(0.9), (DIVINE, GOLDEN));
    }

    #[test]
    fn test_offset_lightness_round_trips_hue() {
        let brighter = ACCENT.offset_lightness(0.1);
        let back = brighter.offset_lightness(-0.1);
        assert!(close(back, ACCENT, 1e-4));
        assert!(brighter.r + brighter.g + brighter.b > ACCENT.r + ACCENT.g + ACCENT.b);
    }

    #[test]
    fn test_offset_lightness_gray() {
        let gray = Color::new(0.5, 0.5, 0.5).offset_lightness(0.2);
        assert!(close(gray, Color::new(0.7, 0.7, 0.7), 1e-5));
    }
}
