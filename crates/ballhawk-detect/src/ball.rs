//! Ball detection: colored circular blobs in a frame.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use ballhawk_core::{find_external_contours, min_enclosing_circle, ColorRange, RgbImageView};

use crate::segment::{segment, SegmentParams};

/// One ball candidate in pixel coordinates. Produced fresh every frame, no
/// identity persists across frames.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectedBall {
    pub center: Point2<f32>,
    pub radius: f32,
    /// Source contour area in px^2.
    pub area: f32,
}

/// Ball acceptance thresholds.
///
/// `min_area` is tuned per deployment (ball size and working distance vary
/// between venues); there is deliberately no upper bound on area or radius.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BallParams {
    pub min_area: f32,
    pub min_radius: f32,
    /// `4*pi*area / perimeter^2`; 1.0 for a perfect circle. A rectangle
    /// comes out at pi/4, so anything at 0.8 or above rejects box-shaped
    /// blobs.
    pub circularity_threshold: f32,
    pub segment: SegmentParams,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            min_radius: 5.0,
            circularity_threshold: 0.8,
            segment: SegmentParams { kernel: 3 },
        }
    }
}

/// Ball detector over a single color class.
pub struct BallDetector {
    params: BallParams,
}

impl BallDetector {
    pub fn new(params: BallParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BallParams {
        &self.params
    }

    /// Find every ball-shaped blob of the given color, sorted by radius
    /// descending so callers can take the first as the primary target.
    ///
    /// An empty result is a detection miss, not an error.
    pub fn detect(&self, frame: &RgbImageView<'_>, range: &ColorRange) -> Vec<DetectedBall> {
        let mask = segment(frame, range, self.params.segment);
        let contours = find_external_contours(&mask);

        let mut balls = Vec::new();
        for contour in &contours {
            let area = contour.area();
            if area <= self.params.min_area {
                continue;
            }
            let perimeter = contour.perimeter();
            if perimeter <= 0.0 {
                continue;
            }
            let circularity = 4.0 * std::f32::consts::PI * area / (perimeter * perimeter);
            if circularity <= self.params.circularity_threshold {
                log::debug!("contour rejected: area={area:.1}, circularity={circularity:.2}");
                continue;
            }
            let Some(circle) = min_enclosing_circle(&contour.points) else {
                continue;
            };
            if circle.radius <= self.params.min_radius {
                continue;
            }
            balls.push(DetectedBall {
                center: circle.center,
                radius: circle.radius,
                area,
            });
        }

        balls.sort_by(|a, b| b.radius.total_cmp(&a.radius));
        balls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballhawk_core::{HsvInterval, HsvPixel, RgbFrame};

    const RED: [u8; 3] = [255, 0, 0];
    const GRAY: [u8; 3] = [128, 128, 128];

    fn red_range() -> ColorRange {
        ColorRange::Dual(
            HsvInterval {
                lower: HsvPixel { h: 0, s: 100, v: 100 },
                upper: HsvPixel { h: 10, s: 255, v: 255 },
            },
            HsvInterval {
                lower: HsvPixel { h: 170, s: 100, v: 100 },
                upper: HsvPixel { h: 180, s: 255, v: 255 },
            },
        )
    }

    fn frame_with_disc(cx: i32, cy: i32, r: i32) -> RgbFrame {
        let mut frame = RgbFrame::new(120, 120);
        frame.fill(GRAY);
        for y in 0..120i32 {
            for x in 0..120i32 {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r * r {
                    frame.set_pixel(x as usize, y as usize, RED);
                }
            }
        }
        frame
    }

    fn frame_with_square(x0: usize, y0: usize, side: usize) -> RgbFrame {
        let mut frame = RgbFrame::new(120, 120);
        frame.fill(GRAY);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                frame.set_pixel(x, y, RED);
            }
        }
        frame
    }

    #[test]
    fn detects_a_single_red_disc() {
        let frame = frame_with_disc(60, 60, 20);
        let detector = BallDetector::new(BallParams::default());
        let balls = detector.detect(&frame.view(), &red_range());

        assert_eq!(balls.len(), 1);
        let ball = &balls[0];
        assert!((ball.center.x - 60.0).abs() < 2.0);
        assert!((ball.center.y - 60.0).abs() < 2.0);
        assert!((ball.radius - 20.0).abs() < 2.0);
    }

    #[test]
    fn rejects_a_square_blob_of_similar_area() {
        // 36x36 square, comparable in area to the disc above; circularity of
        // a rectangle is pi/4, below the threshold.
        let frame = frame_with_square(40, 40, 36);
        let detector = BallDetector::new(BallParams::default());
        let balls = detector.detect(&frame.view(), &red_range());
        assert!(balls.is_empty());
    }

    #[test]
    fn ignores_blobs_below_the_area_floor() {
        let frame = frame_with_disc(60, 60, 3);
        let detector = BallDetector::new(BallParams::default());
        assert!(detector.detect(&frame.view(), &red_range()).is_empty());
    }

    #[test]
    fn largest_ball_sorts_first() {
        let mut frame = frame_with_disc(30, 30, 10);
        for y in 0..120i32 {
            for x in 0..120i32 {
                let (dx, dy) = (x - 85, y - 85);
                if dx * dx + dy * dy <= 22 * 22 {
                    frame.set_pixel(x as usize, y as usize, RED);
                }
            }
        }
        let detector = BallDetector::new(BallParams::default());
        let balls = detector.detect(&frame.view(), &red_range());
        assert_eq!(balls.len(), 2);
        assert!(balls[0].radius > balls[1].radius);
        assert!((balls[0].center.x - 85.0).abs() < 2.0);
    }
}
