//! GIF CLI Utility
//!
//! A command-line tool for inspecting GIF files and exporting their frames.
//!
//! # Features
//!
//! - **info**: Print the header and a per-frame summary
//! - **decode**: Export every frame as a numbered PNG
//!
//! # Usage
//!
//! ```bash
//! # Inspect a GIF
//! cargo run --example gif_utils info animation.gif
//!
//! # Export all frames to a directory
//! cargo run --example gif_utils decode animation.gif frames/
//! ```

use clap::{Parser, Subcommand};
use gifray_rs::GifFile;
use image::RgbaImage;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gif_utils")]
#[command(author = "gifray-rs project")]
#[command(version = "1.0")]
#[command(about = "GIF utility - inspect files and export frames", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header information and a frame summary
	Info {
		/// Input GIF file path
		#[arg(value_name = "INPUT_GIF")]
		input: PathBuf,
	},

	/// Decode a GIF and export its frames as PNG files
	Decode {
		/// Input GIF file path
		#[arg(value_name = "INPUT_GIF")]
		input: PathBuf,

		/// Output directory for the PNG frames
		#[arg(value_name = "OUTPUT_DIR")]
		output: PathBuf,

		/// Keep the decoder's bottom-up row order instead of flipping
		#[arg(short, long)]
		bottom_up: bool,
	},
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
	let mut gif = GifFile::open(input)?;

	let header = gif.header()?;
	println!("{header}");
	println!("- Background Color: {}", gif.background_color()?);

	let mut count = 0usize;
	let mut total_ms = 0u64;
	while let Some(frame) = gif.next_frame()? {
		println!("  frame {:>3}: {} ms", count, frame.delay_ms());
		total_ms += u64::from(frame.delay_ms());
		count += 1;
	}

	println!("{count} frame(s), {total_ms} ms total");
	Ok(())
}

fn decode_frames(
	input: &PathBuf,
	output: &PathBuf,
	bottom_up: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut gif = GifFile::open(input)?;
	std::fs::create_dir_all(output)?;

	let mut count = 0usize;
	while let Some(frame) = gif.next_frame()? {
		let mut img: RgbaImage = RgbaImage::from_raw(
			u32::from(frame.width()),
			u32::from(frame.height()),
			frame.rgba_bytes(),
		)
		.ok_or("failed to create image buffer")?;

		// decoded rows are bottom-up; PNG wants top-down
		if !bottom_up {
			image::imageops::flip_vertical_in_place(&mut img);
		}

		let path = output.join(format!("frame_{count:03}.png"));
		img.save(&path)?;
		info!("wrote {} ({} ms)", path.display(), frame.delay_ms());
		count += 1;
	}

	info!("exported {count} frame(s)");
	Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match &cli.command {
		Commands::Info {
			input,
		} => show_info(input),
		Commands::Decode {
			input,
			output,
			bottom_up,
		} => decode_frames(input, output, *bottom_up),
	}
}
