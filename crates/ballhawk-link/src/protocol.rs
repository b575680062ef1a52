//! The ASCII wire protocol spoken with the motion controller.
//!
//! Inbound: single command bytes. Outbound: one fixed-field line per cycle,
//! parsed by a fixed-format scanner on the controller side, so field names
//! and order must never change.

use serde::{Deserialize, Serialize};

/// One inbound command byte from the motion controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `'1'`: track the red ball.
    RedBall,
    /// `'2'`: track the blue ball.
    BlueBall,
    /// `'3'`: find the red safe zone.
    RedZone,
    /// `'4'`: find the blue safe zone.
    BlueZone,
    /// Anything else, including line noise.
    Unrecognized,
}

impl Command {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'1' => Command::RedBall,
            b'2' => Command::BlueBall,
            b'3' => Command::RedZone,
            b'4' => Command::BlueZone,
            _ => Command::Unrecognized,
        }
    }
}

impl Default for Command {
    /// Before any byte arrives the loop behaves as if an unrecognized
    /// command were pending.
    fn default() -> Self {
        Command::Unrecognized
    }
}

/// One outbound protocol line: target offsets and range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub dx: i8,
    pub dy: i8,
    pub distance: u32,
}

impl Report {
    /// The "no target this cycle" sentinel.
    pub const NO_TARGET: Report = Report {
        dx: 0,
        dy: 0,
        distance: 0,
    };

    /// Render the line exactly as the controller's scanner expects it.
    pub fn encode(&self) -> String {
        format!("dx:{} dy:{} dis:{}\n", self.dx, self.dy, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_bytes_decode_to_their_variants() {
        assert_eq!(Command::from_byte(b'1'), Command::RedBall);
        assert_eq!(Command::from_byte(b'2'), Command::BlueBall);
        assert_eq!(Command::from_byte(b'3'), Command::RedZone);
        assert_eq!(Command::from_byte(b'4'), Command::BlueZone);
        assert_eq!(Command::from_byte(b'9'), Command::Unrecognized);
        assert_eq!(Command::from_byte(b'\n'), Command::Unrecognized);
        assert_eq!(Command::from_byte(0), Command::Unrecognized);
    }

    #[test]
    fn report_line_is_byte_exact() {
        let report = Report {
            dx: -5,
            dy: 12,
            distance: 37,
        };
        assert_eq!(report.encode(), "dx:-5 dy:12 dis:37\n");
    }

    #[test]
    fn sentinel_line_is_all_zeros() {
        assert_eq!(Report::NO_TARGET.encode(), "dx:0 dy:0 dis:0\n");
    }
}
