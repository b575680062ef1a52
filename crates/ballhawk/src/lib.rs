//! High-level facade crate for the `ballhawk-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying pipeline crates
//! - threshold configuration loading, the command dispatcher and a raw frame
//!   source
//! - (feature `cli`) the `ballhawk` binary wiring the pipeline to a camera
//!   stream and a serial port
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ballhawk::config;
//! use ballhawk::dispatch::{Dispatcher, DispatcherParams};
//! use ballhawk::link::Command;
//! use ballhawk::snapshot::load_rgb_frame;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palette = config::load_palette(Path::new("config"));
//! let mut dispatcher = Dispatcher::new(palette, DispatcherParams::default());
//!
//! let frame = load_rgb_frame(Path::new("frame.png"))?;
//! let report = dispatcher.dispatch(Command::RedBall, &frame.view());
//! print!("{}", report.encode());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `ballhawk::core`: image, color and contour primitives.
//! - `ballhawk::detect`: ball and safe-zone detectors, distance model,
//!   smoothing and offsets.
//! - `ballhawk::link`: serial transport and the controller protocol.
//! - `ballhawk::config`: HSV threshold files into a [`Palette`].
//! - `ballhawk::dispatch`: the command-driven state machine.
//! - `ballhawk::frame`: raw RGB24 frame stream.
//! - `ballhawk::snapshot` (feature `image`): one-shot detection on stills.

pub use ballhawk_core as core;
pub use ballhawk_detect as detect;
pub use ballhawk_link as link;

pub use ballhawk_core::{ColorRange, RgbFrame, RgbImageView};
pub use ballhawk_detect::{BallParams, ColorId, Palette, TeamColor, ZoneParams};
pub use ballhawk_link::{Command, Report};

pub mod config;
pub mod dispatch;
pub mod frame;

#[cfg(feature = "image")]
pub mod snapshot;
