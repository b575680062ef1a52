//! Loading HSV threshold files into a [`Palette`].
//!
//! One JSON file per color, `hsv_thresholds_<color>.json`, written by the
//! calibration tooling. Most colors use a single hue interval; red needs two
//! because its hue wraps across the 0/180 seam, so its file carries two hue
//! bands sharing common saturation/value bounds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ballhawk_core::{ColorRange, HsvInterval, HsvPixel};
use ballhawk_detect::{ColorId, Palette};

/// Errors produced while reading a threshold file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("threshold bounds out of order or beyond the HSV range")]
    InvalidBounds,
}

#[derive(Debug, Serialize, Deserialize)]
struct HueBand {
    #[serde(rename = "H Min")]
    h_min: u8,
    #[serde(rename = "H Max")]
    h_max: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct SatValBounds {
    #[serde(rename = "S Min")]
    s_min: u8,
    #[serde(rename = "S Max")]
    s_max: u8,
    #[serde(rename = "V Min")]
    v_min: u8,
    #[serde(rename = "V Max")]
    v_max: u8,
}

/// The two on-disk layouts, distinguished by their field sets.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ThresholdFile {
    Dual {
        range1: HueBand,
        range2: HueBand,
        common: SatValBounds,
    },
    Single {
        #[serde(rename = "H Min")]
        h_min: u8,
        #[serde(rename = "H Max")]
        h_max: u8,
        #[serde(rename = "S Min")]
        s_min: u8,
        #[serde(rename = "S Max")]
        s_max: u8,
        #[serde(rename = "V Min")]
        v_min: u8,
        #[serde(rename = "V Max")]
        v_max: u8,
    },
}

impl ThresholdFile {
    fn into_range(self) -> Option<ColorRange> {
        match self {
            ThresholdFile::Single {
                h_min,
                h_max,
                s_min,
                s_max,
                v_min,
                v_max,
            } => {
                let interval = interval(h_min, h_max, s_min, s_max, v_min, v_max)?;
                Some(ColorRange::Single(interval))
            }
            ThresholdFile::Dual {
                range1,
                range2,
                common,
            } => {
                let a = interval(
                    range1.h_min,
                    range1.h_max,
                    common.s_min,
                    common.s_max,
                    common.v_min,
                    common.v_max,
                )?;
                let b = interval(
                    range2.h_min,
                    range2.h_max,
                    common.s_min,
                    common.s_max,
                    common.v_min,
                    common.v_max,
                )?;
                Some(ColorRange::Dual(a, b))
            }
        }
    }
}

fn interval(
    h_min: u8,
    h_max: u8,
    s_min: u8,
    s_max: u8,
    v_min: u8,
    v_max: u8,
) -> Option<HsvInterval> {
    HsvInterval::new(
        HsvPixel {
            h: h_min,
            s: s_min,
            v: v_min,
        },
        HsvPixel {
            h: h_max,
            s: s_max,
            v: v_max,
        },
    )
}

/// Path of a color's threshold file inside `dir`.
pub fn threshold_path(dir: &Path, color: ColorId) -> PathBuf {
    dir.join(format!("hsv_thresholds_{color}.json"))
}

/// Read and validate one threshold file.
pub fn load_threshold_file(path: &Path) -> Result<ColorRange, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let file: ThresholdFile = serde_json::from_str(&text)?;
    file.into_range().ok_or(ConfigError::InvalidBounds)
}

/// Build the palette from `dir`, one file per known color.
///
/// A missing or malformed file is logged and skipped; lookups of that color
/// then degrade to the permissive full range instead of aborting the
/// pipeline.
pub fn load_palette(dir: &Path) -> Palette {
    let mut palette = Palette::new();
    for color in ColorId::ALL {
        let path = threshold_path(dir, color);
        match load_threshold_file(&path) {
            Ok(range) => {
                palette.insert(color, range);
            }
            Err(err) => {
                log::warn!(
                    "no usable thresholds for {color} at {}: {err}; falling back to the full range",
                    path.display()
                );
            }
        }
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).expect("write threshold file");
    }

    #[test]
    fn single_range_file_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "hsv_thresholds_blue.json",
            r#"{"H Min": 100, "H Max": 124, "S Min": 43, "S Max": 255, "V Min": 46, "V Max": 255}"#,
        );

        let range = load_threshold_file(&threshold_path(dir.path(), ColorId::Blue))
            .expect("valid single-range file");
        let expected = ColorRange::Single(
            HsvInterval::new(
                HsvPixel { h: 100, s: 43, v: 46 },
                HsvPixel { h: 124, s: 255, v: 255 },
            )
            .unwrap(),
        );
        assert_eq!(range, expected);
    }

    #[test]
    fn dual_range_file_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "hsv_thresholds_red.json",
            r#"{
                "range1": {"H Min": 0, "H Max": 10},
                "range2": {"H Min": 156, "H Max": 180},
                "common": {"S Min": 43, "S Max": 255, "V Min": 46, "V Max": 255}
            }"#,
        );

        let range = load_threshold_file(&threshold_path(dir.path(), ColorId::Red))
            .expect("valid dual-range file");
        match range {
            ColorRange::Dual(a, b) => {
                assert_eq!((a.lower.h, a.upper.h), (0, 10));
                assert_eq!((b.lower.h, b.upper.h), (156, 180));
                assert_eq!((a.lower.s, a.lower.v), (43, 46));
            }
            other => panic!("expected a dual range, got {other:?}"),
        }
    }

    #[test]
    fn unordered_bounds_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "hsv_thresholds_blue.json",
            r#"{"H Min": 124, "H Max": 100, "S Min": 43, "S Max": 255, "V Min": 46, "V Max": 255}"#,
        );
        assert!(matches!(
            load_threshold_file(&threshold_path(dir.path(), ColorId::Blue)),
            Err(ConfigError::InvalidBounds)
        ));
    }

    #[test]
    fn missing_or_malformed_files_degrade_to_the_full_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "hsv_thresholds_yellow.json", "not json at all");

        let palette = load_palette(dir.path());
        assert!(!palette.is_configured(ColorId::Yellow));
        assert!(!palette.is_configured(ColorId::Purple));
        assert_eq!(palette.range(ColorId::Purple), ColorRange::full());
    }

    #[test]
    fn palette_picks_up_every_configured_color() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "hsv_thresholds_purple.json",
            r#"{"H Min": 125, "H Max": 155, "S Min": 43, "S Max": 255, "V Min": 46, "V Max": 255}"#,
        );
        let palette = load_palette(dir.path());
        assert!(palette.is_configured(ColorId::Purple));
        assert!(!palette.is_configured(ColorId::Black));
    }
}
