use serde::{Deserialize, Serialize};

/// Errors produced while validating raw frame buffers.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("invalid rgb buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLen { expected: usize, got: usize },

    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Borrowed row-major RGB24 frame, 3 bytes per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h*3
}

impl<'a> RgbImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(FrameError::InvalidBufferLen {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Owned RGB24 frame.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbFrame {
    /// Black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(FrameError::InvalidBufferLen {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn fill(&mut self, rgb: [u8; 3]) {
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Mirror the frame top-to-bottom in place.
    ///
    /// Cameras are often mounted upside down on the chassis; the acquisition
    /// side applies this once per frame before detection.
    pub fn flip_vertical(&mut self) {
        let stride = self.width * 3;
        let mut top = 0;
        let mut bottom = self.height.saturating_sub(1);
        while top < bottom {
            let (a, b) = (top * stride, bottom * stride);
            for k in 0..stride {
                self.data.swap(a + k, b + k);
            }
            top += 1;
            bottom -= 1;
        }
    }
}

fn expected_len(width: usize, height: usize) -> Result<usize, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(FrameError::InvalidDimensions { width, height })
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Intersect with the `[0, width) x [0, height)` frame bounds.
    pub fn clipped_to(&self, width: usize, height: usize) -> Rect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Rect {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rejects_bad_buffer_len() {
        let buf = vec![0u8; 10];
        assert!(matches!(
            RgbImageView::new(4, 4, &buf),
            Err(FrameError::InvalidBufferLen { expected: 48, .. })
        ));
    }

    #[test]
    fn flip_vertical_swaps_rows() {
        let mut frame = RgbFrame::new(2, 2);
        frame.set_pixel(0, 0, [1, 2, 3]);
        frame.set_pixel(1, 1, [9, 9, 9]);
        frame.flip_vertical();
        assert_eq!(frame.view().pixel(0, 1), [1, 2, 3]);
        assert_eq!(frame.view().pixel(1, 0), [9, 9, 9]);
    }

    #[test]
    fn rect_clips_to_frame() {
        let r = Rect {
            x: 600,
            y: 400,
            width: 100,
            height: 100,
        };
        let c = r.clipped_to(640, 480);
        assert_eq!((c.x, c.y, c.width, c.height), (600, 400, 40, 80));
    }
}
