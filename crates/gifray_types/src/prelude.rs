//! Prelude module for `gifray_types`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use gifray_types::prelude::*;
//!
//! # fn main() -> Result<(), GifError> {
//! let mut gif = GifFile::open("animation.gif")?;
//! let header = gif.header()?;
//! println!("{} {}x{}", header.version(), header.width(), header.height());
//! # Ok(())
//! # }
//! ```

#[doc(inline)]
pub use crate::gif::{
	// Palette types
	Color,
	// Frame metadata
	Disposal,

	// Decoder
	File as GifFile,
	Frame,
	Frames,

	// Errors
	GifError,
	GraphicControl,

	// Header types
	Header,
	Palette,
	Version,
};

// Re-export the gif module for advanced usage
#[doc(inline)]
pub use crate::gif;
