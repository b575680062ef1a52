//! One-shot detection on a still image.
//!
//! Handy for checking thresholds against a saved frame without wiring up a
//! camera stream or a serial port.

use std::path::Path;

use image::ImageReader;

use ballhawk_core::{FrameError, RgbFrame};

/// Errors produced while loading a still image.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Decode an image file into an owned RGB24 frame.
pub fn load_rgb_frame(path: &Path) -> Result<RgbFrame, SnapshotError> {
    let img = ImageReader::open(path)?.decode()?.to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    Ok(RgbFrame::from_raw(width, height, img.into_raw())?)
}
