//! Image, color and contour primitives for the ballhawk vision pipeline.
//!
//! This crate is intentionally small and purely algorithmic. It does *not*
//! touch cameras, serial ports or the filesystem; frames come in as raw RGB24
//! buffers and everything downstream works on masks and contours.

mod contour;
mod geometry;
mod hsv;
mod image;
mod mask;

pub use contour::{find_external_contours, Contour};
pub use geometry::{approx_polygon, is_convex, min_enclosing_circle, Circle};
pub use hsv::{rgb_to_hsv, ColorRange, HsvInterval, HsvPixel, HUE_MAX};
pub use image::{FrameError, Rect, RgbFrame, RgbImageView};
pub use mask::Mask;
