use std::io;
use std::path::PathBuf;

use clap::Parser;

use ballhawk::config;
use ballhawk::dispatch::{Dispatcher, DispatcherParams};
use ballhawk::frame::RawFrameSource;
use ballhawk::link::{Command, SerialLink};

/// Watches a raw camera stream on stdin and reports ball and safe-zone
/// targets to the motion controller over serial.
#[derive(Parser, Debug)]
#[command(name = "ballhawk", version, about)]
struct Args {
    /// Serial device connected to the motion controller.
    #[arg(long, default_value = "/dev/ttyS3")]
    port: String,

    /// Serial baud rate.
    #[arg(long, default_value_t = 115_200)]
    baud: u32,

    /// Directory holding the hsv_thresholds_<color>.json files.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Frame width of the RGB24 stream on stdin.
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Frame height of the RGB24 stream on stdin.
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Mirror frames top-to-bottom (camera mounted upside down).
    #[arg(long)]
    flip: bool,

    /// Run one detection pass over an image file and print the protocol
    /// line to stdout instead of opening the serial port.
    #[cfg(feature = "image")]
    #[arg(long)]
    image: Option<PathBuf>,

    /// Command byte to service in --image mode.
    #[cfg(feature = "image")]
    #[arg(long, default_value_t = '1')]
    command: char,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let palette = config::load_palette(&args.config_dir);
    let mut dispatcher = Dispatcher::new(palette, DispatcherParams::default());

    #[cfg(feature = "image")]
    if let Some(path) = &args.image {
        let frame = ballhawk::snapshot::load_rgb_frame(path)?;
        let command = Command::from_byte(args.command as u8);
        let report = dispatcher.dispatch(command, &frame.view());
        print!("{}", report.encode());
        return Ok(());
    }

    let mut link = SerialLink::open(&args.port, args.baud)?;
    let stdin = io::stdin();
    let mut source =
        RawFrameSource::new(stdin.lock(), args.width, args.height).with_vertical_flip(args.flip);

    log::info!("waiting for controller commands");
    let mut command = Command::default();
    loop {
        // The command is read before the frame: it decides which detector
        // runs against that frame. With nothing buffered the previous
        // command stays in effect.
        if let Some(byte) = link.poll_command() {
            command = Command::from_byte(byte);
            log::debug!("controller command {byte:#04x} -> {command:?}");
        }

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("frame stream ended");
                break;
            }
            Err(err) => {
                log::warn!("frame acquisition failed: {err}");
                continue;
            }
        };

        let report = dispatcher.dispatch(command, &frame.view());
        link.send(&report);
    }

    Ok(())
}
