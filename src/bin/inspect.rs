//! OpenWire capture inspector
//!
//! Decodes a file of consecutive frames and prints one line per command.

use std::fs::File;
use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use openwire::protocol::FrameReader;
use openwire::{ByteOrder, CodecConfig, Dispatcher};
use tracing_subscriber::{fmt, EnvFilter};

/// OpenWire capture inspector
#[derive(Parser, Debug)]
#[command(name = "openwire-inspect")]
#[command(about = "Decode captured OpenWire frames")]
#[command(version)]
struct Args {
    /// Capture file (raw frames, or hex text with --hex)
    path: PathBuf,

    /// Input is whitespace-separated hex instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Negotiated wire version used to decode
    #[arg(short, long, default_value = "12")]
    wire_version: u32,

    /// Frames are little-endian
    #[arg(long)]
    little_endian: bool,

    /// Maximum frame size in MB
    #[arg(short = 'm', long, default_value = "100")]
    max_frame_mb: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,openwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("openwire-inspect v{}", openwire::VERSION);

    let config = CodecConfig::builder()
        .wire_version(args.wire_version)
        .byte_order(if args.little_endian { ByteOrder::Little } else { ByteOrder::Big })
        .max_frame_size_mb(args.max_frame_mb)
        .build();

    if let Err(e) = run(&args, config) {
        tracing::error!("Inspection failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, config: CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = Dispatcher::standard(config);

    let frames: Box<dyn Iterator<Item = openwire::Result<openwire::Frame>>> = if args.hex {
        let text = std::fs::read_to_string(&args.path)?;
        let bytes = parse_hex(&text)?;
        Box::new(FrameReader::new(Cursor::new(bytes), config))
    } else {
        Box::new(FrameReader::new(File::open(&args.path)?, config))
    };

    let mut count = 0usize;
    for frame in frames {
        let frame = frame?;
        count += 1;
        match dispatcher.dispatch(&frame)? {
            Some(message) => println!("#{:<4} {:>6}B  {}", count, frame.len(), message),
            None => println!("#{:<4} {:>6}B  <heartbeat>", count, 0),
        }
    }

    tracing::info!("Decoded {} frames", count);
    Ok(())
}

fn parse_hex(text: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    text.split_whitespace()
        .map(|token| u8::from_str_radix(token.trim_start_matches("0x"), 16))
        .collect()
}
