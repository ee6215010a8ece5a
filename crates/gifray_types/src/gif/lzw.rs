//! GIF LZW decompression.
//!
//! ## Code stream
//!
//! Each image block starts with a minimum-code-size byte followed by a
//! sub-block chain of variable-width codes (3-12 bits). The initial
//! dictionary holds `2^min_code_size` single-symbol entries plus two
//! reserved codes:
//!
//! | Code                      | Meaning                                |
//! |---------------------------|----------------------------------------|
//! | `0 .. 2^min_code_size-1`  | Emit the matching palette index        |
//! | `2^min_code_size`         | CLEAR: reset dictionary and code width |
//! | `2^min_code_size + 1`     | END: terminate the image's stream      |
//!
//! The code width starts at `min_code_size + 1` bits and grows by one
//! whenever the dictionary fills the current width, up to 12 bits; the
//! dictionary never exceeds 4096 entries.
//!
//! ## Dictionary layout
//!
//! Entries are variable-length palette-index sequences stored back to back
//! in one flat buffer: a `u16` length followed by that many symbols. A
//! 4096-slot table maps each code to its offset in the buffer. Offsets are
//! indices, so the buffer can reallocate while it grows without invalidating
//! live entries. Both buffers belong to the decoder and are reset, not
//! reallocated, for every image block.

use crate::gif::decoder::Raster;
use crate::gif::error::GifError;
use crate::gif::reader::CodeReader;

/// Dictionary capacity mandated by the format
const MAX_CODES: usize = 4096;

/// Widest code the stream may use
const MAX_CODE_WIDTH: u32 = 12;

/// Largest accepted minimum code size; larger declared values are clamped
const MAX_MIN_CODE_SIZE: u8 = 11;

/// Initial symbol-buffer capacity, sized so typical streams never reallocate
const CODE_BUFFER_CAPACITY: usize = 128 * 1024;

/// LZW dictionary state, reused across image blocks.
#[derive(Debug)]
pub(crate) struct Lzw {
	/// Flat symbol buffer: `[len, sym, sym, ...]` per entry
	codes: Vec<u16>,
	/// Offset of each code's entry in `codes`
	offsets: Vec<u32>,
}

impl Lzw {
	pub fn new() -> Self {
		Self {
			codes: Vec::with_capacity(CODE_BUFFER_CAPACITY),
			offsets: vec![0; MAX_CODES],
		}
	}

	/// Decompresses one image block's code stream, feeding palette indices
	/// into `raster` until the END code or the end of the chain.
	///
	/// # Errors
	///
	/// Propagates [`GifError::Truncated`]/[`GifError::Malformed`] from the
	/// reader when the stream ends mid-code or declares impossible lengths.
	pub fn decode(
		&mut self,
		reader: &mut CodeReader<'_>,
		min_code_size: u8,
		raster: &mut Raster<'_>,
	) -> Result<(), GifError> {
		let min_code_size = min_code_size.min(MAX_MIN_CODE_SIZE);
		let num_literals = 1usize << min_code_size;
		let clear_code = num_literals as u16;
		let end_code = clear_code + 1;
		let base_codes = num_literals + 2;

		// Seed the single-symbol entries; the two reserved codes own no data
		self.codes.clear();
		for i in 0..num_literals {
			self.offsets[i] = self.codes.len() as u32;
			self.codes.push(1);
			self.codes.push(i as u16);
		}

		let mut num_codes = base_codes;
		let mut code_width = u32::from(min_code_size) + 1;
		let mut previous: Option<u16> = None;

		while let Some(code) = reader.read_code(code_width)? {
			if code == clear_code {
				code_width = u32::from(min_code_size) + 1;
				num_codes = base_codes;
				previous = None;
				continue;
			}
			if code == end_code {
				break;
			}

			// Resolve the sequence to emit. A code one past the dictionary is
			// the KwKwK case; anything further is junk and is skipped, as is
			// a leading code with nothing to chain from.
			let (offset, repeat_first) = if (code as usize) < num_codes {
				(self.offsets[code as usize] as usize, false)
			} else if let Some(prev) = previous {
				if code as usize != num_codes {
					continue;
				}
				(self.offsets[prev as usize] as usize, true)
			} else {
				continue;
			};

			let len = self.codes[offset] as usize;
			let first = self.codes[offset + 1];

			for &symbol in &self.codes[offset + 1..offset + 1 + len] {
				raster.put(symbol);
			}
			if repeat_first {
				raster.put(first);
			}

			// New entry = previous sequence + first symbol of this one
			if let Some(prev) = previous {
				if num_codes < MAX_CODES {
					let prev_offset = self.offsets[prev as usize] as usize;
					let prev_len = self.codes[prev_offset] as usize;

					self.offsets[num_codes] = self.codes.len() as u32;
					num_codes += 1;

					self.codes.push(prev_len as u16 + 1);
					self.codes.extend_from_within(prev_offset + 1..prev_offset + 1 + prev_len);
					self.codes.push(first);
				}
			}

			previous = Some(code);

			if num_codes >= (1 << code_width) && code_width < MAX_CODE_WIDTH {
				code_width += 1;
			}
		}

		Ok(())
	}
}
