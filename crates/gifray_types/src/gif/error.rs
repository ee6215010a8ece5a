//! Error types for GIF parsing and decoding.

use thiserror::Error;

/// Errors that can occur when parsing or decoding a GIF stream
#[derive(Debug, Error)]
pub enum GifError {
	/// Buffer too small for a header, or the signature is not `GIF87a`/`GIF89a`
	#[error("invalid GIF header: {reason}")]
	InvalidHeader {
		/// What made the header unacceptable
		reason: String,
	},

	/// A byte at a block-introducer position that is not an image descriptor,
	/// an extension, or the trailer
	#[error("unexpected block introducer 0x{introducer:02X} at offset {offset}")]
	UnexpectedBlock {
		/// The offending introducer byte
		introducer: u8,
		/// Byte offset of the introducer in the buffer
		offset: usize,
	},

	/// Ran out of bytes before a structurally complete unit
	#[error("truncated stream: needed {expected} more byte(s) at offset {offset}")]
	Truncated {
		/// Number of bytes still required
		expected: usize,
		/// Byte offset where the shortfall was detected
		offset: usize,
	},

	/// A sub-block declares more payload bytes than the buffer holds
	#[error("malformed sub-block: {length} declared byte(s) at offset {offset} exceed the buffer")]
	Malformed {
		/// Declared sub-block length
		length: usize,
		/// Byte offset of the length prefix
		offset: usize,
	},

	/// The decoder hit a fatal error on an earlier frame and cannot continue
	#[error("decoder is unusable after a previous decode error")]
	Defunct,

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl GifError {
	/// Shorthand for a [`GifError::Truncated`] at the given offset.
	pub(crate) fn truncated(expected: usize, offset: usize) -> Self {
		Self::Truncated {
			expected,
			offset,
		}
	}
}
