//! Safe-zone detection: a team-colored rectangle inside a purple fence.
//!
//! The fence has to exist before any inner color is trusted as a zone; a
//! stray team-colored object outside a fence must never register, no matter
//! how large it is.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use ballhawk_core::{
    approx_polygon, find_external_contours, is_convex, Rect, RgbImageView,
};

use crate::color::{ColorId, Palette, TeamColor};
use crate::segment::{segment, threshold_region, SegmentParams};

/// Center of a color region strictly contained within a fence region, in
/// full-frame coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ZoneCandidate {
    pub center: Point2<f32>,
    /// Bounding rectangle of the fence the zone was found in.
    pub fence: Rect,
}

/// Safe-zone acceptance thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ZoneParams {
    /// Minimum fence contour area in px^2.
    pub fence_min_area: f32,
    /// Minimum inner contour area in px^2. Defaults to half the fence floor.
    pub zone_min_area: f32,
    /// Polygon simplification tolerance as a fraction of the contour
    /// perimeter.
    pub approx_tolerance: f32,
    /// Accepted vertex counts for the simplified inner outline; rectangles
    /// land on 4, slightly ragged ones on 5 or 6.
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub segment: SegmentParams,
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self {
            fence_min_area: 1000.0,
            zone_min_area: 500.0,
            approx_tolerance: 0.05,
            min_vertices: 4,
            max_vertices: 6,
            segment: SegmentParams { kernel: 5 },
        }
    }
}

/// Two-stage nested detector: purple fence first, team color inside it.
pub struct SafeZoneDetector {
    params: ZoneParams,
}

impl SafeZoneDetector {
    pub fn new(params: ZoneParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ZoneParams {
        &self.params
    }

    /// Find every safe zone in the frame. `team` of `None` accepts either
    /// team color inside a fence.
    pub fn detect(
        &self,
        frame: &RgbImageView<'_>,
        palette: &Palette,
        team: Option<TeamColor>,
    ) -> Vec<ZoneCandidate> {
        let fence_range = palette.range(ColorId::Purple);
        let fence_mask = segment(frame, &fence_range, self.params.segment);
        let fences = find_external_contours(&fence_mask);

        let mut zones = Vec::new();
        for fence in &fences {
            let fence_area = fence.area();
            if fence_area < self.params.fence_min_area {
                continue;
            }
            let roi = fence
                .bounding_rect()
                .clipped_to(frame.width, frame.height);
            if roi.is_empty() {
                continue;
            }
            if let Some(zone) = self.zone_in_fence(frame, palette, team, roi) {
                zones.push(zone);
            }
        }
        zones
    }

    /// First zone found, scanning fences in discovery order.
    pub fn detect_first(
        &self,
        frame: &RgbImageView<'_>,
        palette: &Palette,
        team: Option<TeamColor>,
    ) -> Option<ZoneCandidate> {
        self.detect(frame, palette, team).into_iter().next()
    }

    /// Search one fence's bounding region for the largest rectangle-like
    /// region of the requested team color(s).
    fn zone_in_fence(
        &self,
        frame: &RgbImageView<'_>,
        palette: &Palette,
        team: Option<TeamColor>,
        roi: Rect,
    ) -> Option<ZoneCandidate> {
        let mut inner = match team {
            Some(team) => threshold_region(frame, &palette.range(team.color_id()), roi),
            None => {
                let mut mask =
                    threshold_region(frame, &palette.range(ColorId::Red), roi);
                mask.or_assign(&threshold_region(
                    frame,
                    &palette.range(ColorId::Blue),
                    roi,
                ));
                mask
            }
        };
        inner = inner.closed(self.params.segment.kernel);

        let best = find_external_contours(&inner)
            .into_iter()
            .filter(|c| c.area() >= self.params.zone_min_area)
            .max_by(|a, b| a.area().total_cmp(&b.area()))?;

        let epsilon = self.params.approx_tolerance * best.perimeter();
        let outline = approx_polygon(&best.points, epsilon);
        let rectangle_like = (self.params.min_vertices..=self.params.max_vertices)
            .contains(&outline.len())
            && is_convex(&outline);
        if !rectangle_like {
            log::debug!(
                "inner contour rejected: {} vertices, convex={}",
                outline.len(),
                is_convex(&outline)
            );
            return None;
        }

        let centroid = best.centroid()?;
        Some(ZoneCandidate {
            center: Point2::new(centroid.x + roi.x as f32, centroid.y + roi.y as f32),
            fence: roi,
        })
    }
}
