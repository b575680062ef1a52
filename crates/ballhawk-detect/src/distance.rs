//! Monocular range estimation from apparent ball size.

use serde::{Deserialize, Serialize};

/// Pinhole camera model for a ball of known physical size.
///
/// `focal_length_px` comes from a one-time calibration against a ball at a
/// measured distance; see [`calibrate_focal`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DistanceModel {
    /// Real ball diameter in centimeters.
    pub ball_diameter_cm: f32,
    /// Calibrated focal length in pixels.
    pub focal_length_px: f32,
    /// Returned when the apparent radius is degenerate.
    pub fallback_cm: u32,
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self {
            ball_diameter_cm: 4.0,
            focal_length_px: 727.8,
            fallback_cm: 100,
        }
    }
}

impl DistanceModel {
    /// Estimate the range in whole centimeters from the apparent radius.
    ///
    /// `distance = (real_diameter * focal_length) / pixel_diameter`, truncated
    /// to an integer. A zero or negative radius means "not meaningfully
    /// measured" and yields the fallback; no upper clamp is applied.
    pub fn estimate(&self, radius_px: f32) -> u32 {
        if radius_px <= 0.0 {
            return self.fallback_cm;
        }
        let distance = (self.ball_diameter_cm * self.focal_length_px) / (2.0 * radius_px);
        distance as u32
    }
}

/// Invert the pinhole relation: the focal length implied by a ball of
/// `diameter_cm` appearing with `radius_px` at a measured `distance_cm`.
pub fn calibrate_focal(distance_cm: f32, radius_px: f32, diameter_cm: f32) -> f32 {
    2.0 * radius_px * distance_cm / diameter_cm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_decreases_as_the_ball_grows() {
        let model = DistanceModel::default();
        let mut last = u32::MAX;
        for radius in [5.0, 10.0, 20.0, 40.0, 80.0] {
            let d = model.estimate(radius);
            assert!(d < last, "estimate({radius}) = {d} not below {last}");
            last = d;
        }
    }

    #[test]
    fn degenerate_radius_yields_the_fallback() {
        let model = DistanceModel::default();
        assert_eq!(model.estimate(0.0), 100);
        assert_eq!(model.estimate(-3.0), 100);
    }

    #[test]
    fn estimate_truncates_to_whole_centimeters() {
        let model = DistanceModel::default();
        // 4.0 * 727.8 / 40 = 72.78
        assert_eq!(model.estimate(20.0), 72);
    }

    #[test]
    fn calibration_inverts_the_model() {
        let focal = calibrate_focal(100.0, 14.5, 4.0);
        assert_relative_eq!(focal, 725.0, epsilon = 1e-3);

        let model = DistanceModel {
            focal_length_px: focal,
            ..DistanceModel::default()
        };
        assert_eq!(model.estimate(14.5), 100);
    }
}
