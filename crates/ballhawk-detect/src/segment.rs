//! HSV thresholding into binary masks.

use serde::{Deserialize, Serialize};

use ballhawk_core::{rgb_to_hsv, ColorRange, Mask, Rect, RgbImageView};

/// Segmentation settings: the square kernel used to clean the raw mask.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmentParams {
    /// Structuring element side length. 3 suits ball-sized blobs, 5 suits
    /// the larger fence regions.
    pub kernel: usize,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self { kernel: 3 }
    }
}

/// Threshold the whole frame against `range` and clean the result with
/// morphological opening followed by closing.
pub fn segment(frame: &RgbImageView<'_>, range: &ColorRange, params: SegmentParams) -> Mask {
    segment_region(
        frame,
        range,
        params,
        Rect::full(frame.width, frame.height),
    )
}

/// As [`segment`], restricted to `region`; the mask has the region's
/// dimensions.
pub fn segment_region(
    frame: &RgbImageView<'_>,
    range: &ColorRange,
    params: SegmentParams,
    region: Rect,
) -> Mask {
    threshold_region(frame, range, region)
        .opened(params.kernel)
        .closed(params.kernel)
}

/// Raw in-range threshold without morphological cleanup.
pub fn threshold_region(frame: &RgbImageView<'_>, range: &ColorRange, region: Rect) -> Mask {
    let region = region.clipped_to(frame.width, frame.height);
    let mut mask = Mask::new(region.width, region.height);
    for y in 0..region.height {
        for x in 0..region.width {
            let hsv = rgb_to_hsv(frame.pixel(region.x + x, region.y + y));
            if range.contains(hsv) {
                mask.set(x, y, true);
            }
        }
    }
    mask
}
