//! Detectors and numeric filters for the ballhawk vision pipeline.
//!
//! Everything here is a total function over well-formed frames: a detection
//! miss is an empty result, degenerate geometry substitutes a safe default,
//! and an unconfigured color degrades to the permissive full range. Nothing
//! in this crate touches a camera or a serial port.

mod ball;
mod color;
mod distance;
mod offset;
mod segment;
mod smooth;
mod zone;

pub use ball::{BallDetector, BallParams, DetectedBall};
pub use color::{ColorId, Palette, TeamColor};
pub use distance::{calibrate_focal, DistanceModel};
pub use offset::offset;
pub use segment::{segment, segment_region, threshold_region, SegmentParams};
pub use smooth::DistanceFilter;
pub use zone::{SafeZoneDetector, ZoneCandidate, ZoneParams};
