use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use ballhawk_core::ColorRange;

/// The color classes the vehicle knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Red,
    Blue,
    Yellow,
    Black,
    Purple,
}

impl ColorId {
    pub const ALL: [ColorId; 5] = [
        ColorId::Red,
        ColorId::Blue,
        ColorId::Yellow,
        ColorId::Black,
        ColorId::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorId::Red => "red",
            ColorId::Blue => "blue",
            ColorId::Yellow => "yellow",
            ColorId::Black => "black",
            ColorId::Purple => "purple",
        }
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team colors valid for balls and safe zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Red,
    Blue,
}

impl TeamColor {
    #[inline]
    pub fn color_id(self) -> ColorId {
        match self {
            TeamColor::Red => ColorId::Red,
            TeamColor::Blue => ColorId::Blue,
        }
    }
}

/// Threshold ranges per color class, built once at startup and passed by
/// reference into the detectors.
///
/// A lookup of a color that was never configured degrades to the permissive
/// full range instead of failing the pipeline.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    ranges: HashMap<ColorId, ColorRange>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ColorId, range: ColorRange) {
        self.ranges.insert(id, range);
    }

    pub fn range(&self, id: ColorId) -> ColorRange {
        match self.ranges.get(&id) {
            Some(range) => *range,
            None => {
                log::debug!("no threshold range for {id}, using the full range");
                ColorRange::full()
            }
        }
    }

    pub fn is_configured(&self, id: ColorId) -> bool {
        self.ranges.contains_key(&id)
    }
}
