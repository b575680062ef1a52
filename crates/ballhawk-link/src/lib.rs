//! Serial transport and wire protocol for the ballhawk motion controller.

mod protocol;
mod serial;

pub use protocol::{Command, Report};
pub use serial::{LinkError, SerialLink};
