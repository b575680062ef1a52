//! HSV color model and threshold ranges.
//!
//! Hue is stored halved (0..=180) so it fits a byte, matching the convention
//! of the threshold files this pipeline is calibrated with. Thresholding in
//! HSV keeps the color classes stable under lighting changes, which direct
//! RGB thresholds are not.

use serde::{Deserialize, Serialize};

/// One HSV pixel: `h` in `0..=180` (degrees halved), `s`/`v` in `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvPixel {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

pub const HUE_MAX: u8 = 180;

/// Convert one RGB pixel to HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> HsvPixel {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut h = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    HsvPixel {
        h: ((h * 0.5).round() as u8).min(HUE_MAX),
        s: s.round() as u8,
        v: v.round() as u8,
    }
}

/// Inclusive HSV interval with `lower <= upper` componentwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvInterval {
    pub lower: HsvPixel,
    pub upper: HsvPixel,
}

impl HsvInterval {
    /// Validated constructor; `None` if the bounds are not ordered or the hue
    /// bounds exceed 180.
    pub fn new(lower: HsvPixel, upper: HsvPixel) -> Option<Self> {
        let ordered = lower.h <= upper.h && lower.s <= upper.s && lower.v <= upper.v;
        if !ordered || upper.h > HUE_MAX {
            return None;
        }
        Some(Self { lower, upper })
    }

    #[inline]
    pub fn contains(&self, p: HsvPixel) -> bool {
        (self.lower.h..=self.upper.h).contains(&p.h)
            && (self.lower.s..=self.upper.s).contains(&p.s)
            && (self.lower.v..=self.upper.v).contains(&p.v)
    }
}

/// A color class in HSV space.
///
/// `Dual` covers hues that wrap across the 0/180 seam (red in practice): two
/// hue bands sharing saturation/value bounds, a pixel matches if it falls in
/// either band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRange {
    Single(HsvInterval),
    Dual(HsvInterval, HsvInterval),
}

impl ColorRange {
    /// The permissive full-range fallback: matches every pixel.
    pub fn full() -> Self {
        ColorRange::Single(HsvInterval {
            lower: HsvPixel { h: 0, s: 0, v: 0 },
            upper: HsvPixel {
                h: HUE_MAX,
                s: 255,
                v: 255,
            },
        })
    }

    #[inline]
    pub fn contains(&self, p: HsvPixel) -> bool {
        match self {
            ColorRange::Single(r) => r.contains(p),
            ColorRange::Dual(a, b) => a.contains(p) || b.contains(p),
        }
    }
}
