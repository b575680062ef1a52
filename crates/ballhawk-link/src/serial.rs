//! Byte-oriented duplex channel to the motion controller.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;

use crate::protocol::Report;

/// Errors produced while opening the serial device.
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },
}

/// Serial connection to the controller.
///
/// Reads never wait: only bytes already buffered by the driver are consumed,
/// so a silent controller cannot stall the detection loop. Writes that fail
/// are logged and dropped for the same reason.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    /// Open `path` at the given baud rate, 8N1.
    pub fn open(path: &str, baud: u32) -> Result<Self, LinkError> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(10))
            .open()
            .map_err(|source| LinkError::Open {
                path: path.to_owned(),
                source,
            })?;
        log::info!("serial port {path} open at {baud} baud");
        Ok(Self { port })
    }

    /// Consume at most one buffered command byte; `None` when nothing is
    /// waiting, letting the previous command persist for this cycle.
    pub fn poll_command(&mut self) -> Option<u8> {
        match self.port.bytes_to_read() {
            Ok(0) => None,
            Ok(_) => {
                let mut byte = [0u8; 1];
                match self.port.read_exact(&mut byte) {
                    Ok(()) => Some(byte[0]),
                    Err(err) => {
                        log::warn!("serial read failed: {err}");
                        None
                    }
                }
            }
            Err(err) => {
                log::warn!("serial status query failed: {err}");
                None
            }
        }
    }

    /// Transmit one protocol line. A transport failure is logged and the
    /// line dropped; it never blocks or terminates the loop.
    pub fn send(&mut self, report: &Report) {
        let line = report.encode();
        if let Err(err) = self.port.write_all(line.as_bytes()) {
            log::warn!("serial write failed, dropping line {:?}: {err}", line.trim_end());
        }
    }
}
