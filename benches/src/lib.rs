//! Benchmark helper utilities for gifray-rs
//!
//! This module generates synthetic GIF files for benchmarking the decoder
//! without shipping binary fixtures.
//!
//! # Encoding scheme
//!
//! The generator produces "uncompressed" GIF data: a 7-bit minimum code size
//! makes every code exactly one byte wide, and a CLEAR code is inserted
//! before the dictionary could force the code width past 8 bits. The result
//! is a valid stream any GIF decoder accepts, with a predictable layout.

/// Number of literal codes emitted between CLEAR codes.
///
/// After a CLEAR the dictionary holds 130 entries; each literal after the
/// first adds one. Clearing every 125 literals keeps the count below 256,
/// so the code width stays at 8 bits and codes stay byte-aligned.
const LITERALS_PER_CLEAR: usize = 125;

/// CLEAR code for a 7-bit minimum code size
const CLEAR: u8 = 0x80;

/// END code for a 7-bit minimum code size
const END: u8 = 0x81;

/// Generates a single-frame test GIF with the specified dimensions.
///
/// The image uses a 128-color global palette and a diagonal gradient
/// pattern, giving the decoder a realistic mix of palette lookups.
pub fn generate_test_gif(width: u16, height: u16) -> Vec<u8> {
	let mut data = Vec::new();

	// Header: signature + logical screen descriptor
	data.extend_from_slice(b"GIF89a");
	data.extend_from_slice(&width.to_le_bytes());
	data.extend_from_slice(&height.to_le_bytes());
	// global palette present, 128 entries (2^(6+1))
	data.push(0x80 | 0x06);
	data.push(0); // background index
	data.push(0); // aspect ratio

	// Global palette (128 colors)
	for i in 0..128u8 {
		data.push(i.wrapping_mul(2));
		data.push(i.wrapping_mul(3));
		data.push(255 - i);
	}

	// Graphic control extension with a 4cs delay
	data.extend_from_slice(&[0x21, 0xF9, 0x04, 0x00, 4, 0, 0, 0x00]);

	// Image descriptor covering the whole screen
	data.push(0x2C);
	data.extend_from_slice(&[0, 0, 0, 0]);
	data.extend_from_slice(&width.to_le_bytes());
	data.extend_from_slice(&height.to_le_bytes());
	data.push(0x00);

	// Minimum code size, then the byte-aligned code stream
	data.push(7);
	let codes = generate_code_stream(width as usize, height as usize);
	for chunk in codes.chunks(255) {
		data.push(chunk.len() as u8);
		data.extend_from_slice(chunk);
	}
	data.push(0x00);

	// Trailer
	data.push(0x3B);

	data
}

/// Emits the pixel pattern as byte-wide literal codes with periodic CLEARs.
fn generate_code_stream(width: usize, height: usize) -> Vec<u8> {
	let total = width * height;
	let mut codes = Vec::with_capacity(total + total / LITERALS_PER_CLEAR + 2);

	codes.push(CLEAR);
	let mut since_clear = 0;

	for i in 0..total {
		if since_clear == LITERALS_PER_CLEAR {
			codes.push(CLEAR);
			since_clear = 0;
		}

		let (x, y) = (i % width, i / width);
		codes.push(((x + y) % 128) as u8);
		since_clear += 1;
	}

	codes.push(END);
	codes
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Tiny image: 64x64 (4,096 pixels)
	pub const TINY: (u16, u16) = (64, 64);
	/// Small image: 256x256 (65,536 pixels)
	pub const SMALL: (u16, u16) = (256, 256);
	/// Medium image: 512x512 (262,144 pixels)
	pub const MEDIUM: (u16, u16) = (512, 512);
	/// Large image: 1024x768 (786,432 pixels)
	pub const LARGE: (u16, u16) = (1024, 768);
}

#[cfg(test)]
mod tests {
	use super::*;
	use gifray_types::gif::{File, Version};

	#[test]
	fn test_generated_gif_structure() {
		let data = generate_test_gif(100, 100);

		// Signature
		assert_eq!(&data[0..6], b"GIF89a");

		// Dimensions
		assert_eq!(u16::from_le_bytes([data[6], data[7]]), 100);
		assert_eq!(u16::from_le_bytes([data[8], data[9]]), 100);

		// Trailer
		assert_eq!(*data.last().unwrap(), 0x3B);

		// Minimum size: header + palette + extension + image descriptor
		assert!(data.len() >= 13 + 128 * 3 + 8 + 10);
	}

	#[test]
	fn test_generated_gif_decodes() {
		let (width, height) = (64u16, 32u16);
		let data = generate_test_gif(width, height);

		let mut gif = File::from_bytes(data);
		assert_eq!(gif.version().unwrap(), Version::Gif89a);

		let frame = gif.next_frame().unwrap().unwrap();
		assert_eq!(frame.width(), width);
		assert_eq!(frame.height(), height);
		assert_eq!(frame.delay_ms(), 40);
		assert_eq!(frame.pixels().len(), usize::from(width) * usize::from(height));

		// frames are bottom-up: pixel 0 is screen row height-1, column 0,
		// which the gradient paints with palette index (height-1) % 128
		let index = (u32::from(height) - 1) % 128;
		assert_eq!(frame.pixels()[0].r, (index as u8).wrapping_mul(2));

		assert!(gif.next_frame().unwrap().is_none());
	}

	#[test]
	fn test_sizes_constants() {
		assert_eq!(sizes::TINY, (64, 64));
		assert_eq!(sizes::SMALL, (256, 256));
		assert_eq!(sizes::MEDIUM, (512, 512));
		assert_eq!(sizes::LARGE, (1024, 768));
	}
}
