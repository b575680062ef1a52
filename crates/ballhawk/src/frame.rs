//! Fixed-size raw frames from a byte stream.
//!
//! The camera process (a v4l2 or ffmpeg pipe) is an external collaborator;
//! this side only consumes its output: back-to-back RGB24 frames of a known
//! size, no header, no framing.

use std::io::{self, Read};

use ballhawk_core::RgbFrame;

/// Reads raw RGB24 frames of fixed dimensions from `reader`.
pub struct RawFrameSource<R> {
    reader: R,
    width: usize,
    height: usize,
    flip: bool,
}

impl<R: Read> RawFrameSource<R> {
    pub fn new(reader: R, width: usize, height: usize) -> Self {
        Self {
            reader,
            width,
            height,
            flip: false,
        }
    }

    /// Mirror every frame top-to-bottom before handing it out.
    pub fn with_vertical_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Next frame from the stream.
    ///
    /// `Ok(None)` is a clean end of stream. A partial frame at the cut-off
    /// is an error: frame sync is lost once the stream stops on a
    /// non-boundary byte.
    pub fn next_frame(&mut self) -> io::Result<Option<RgbFrame>> {
        let mut data = vec![0u8; self.width * self.height * 3];
        let mut filled = 0;
        while filled < data.len() {
            match self.reader.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("short frame: {filled} of {} bytes", data.len()),
            ));
        }

        let mut frame = RgbFrame::from_raw(self.width, self.height, data)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        if self.flip {
            frame.flip_vertical();
        }
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_back_to_back_frames_until_eof() {
        let mut bytes = vec![7u8; 2 * 2 * 3];
        bytes.extend(vec![9u8; 2 * 2 * 3]);
        let mut source = RawFrameSource::new(Cursor::new(bytes), 2, 2);

        let first = source.next_frame().unwrap().expect("first frame");
        assert_eq!(first.view().pixel(0, 0), [7, 7, 7]);
        let second = source.next_frame().unwrap().expect("second frame");
        assert_eq!(second.view().pixel(1, 1), [9, 9, 9]);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn a_partial_frame_is_an_error() {
        let bytes = vec![0u8; 5];
        let mut source = RawFrameSource::new(Cursor::new(bytes), 2, 2);
        let err = source.next_frame().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn flip_reorders_rows() {
        let mut bytes = vec![1u8; 2 * 3]; // top row
        bytes.extend(vec![2u8; 2 * 3]); // bottom row
        let mut source = RawFrameSource::new(Cursor::new(bytes), 2, 2).with_vertical_flip(true);
        let frame = source.next_frame().unwrap().expect("frame");
        assert_eq!(frame.view().pixel(0, 0), [2, 2, 2]);
        assert_eq!(frame.view().pixel(0, 1), [1, 1, 1]);
    }
}
