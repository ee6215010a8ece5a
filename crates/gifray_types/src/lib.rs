//! Core types and decoding support for the `gifray-rs` project.
//!
//! # Format
//!
//! - **GIF**: `GIF87a`/`GIF89a` animations, decoded frame by frame from a fully
//!   loaded byte buffer into composed RGBA rasters
//!
//! # Examples
//!
//! ```
//! use gifray_types::gif::{Color, Palette};
//!
//! // Build a palette from a raw RGB triple chain
//! let palette = Palette::from_rgb_bytes(&[255, 0, 0, 0, 255, 0]);
//! assert_eq!(palette.get(0), Color::rgb(255, 0, 0));
//! ```

pub mod gif;
pub mod prelude;

// Re-export commonly used types at crate root for convenience
pub use gif::{
	Color, Disposal, File as GifFile, Frame, Frames, GifError, GraphicControl, Header, Palette,
	Version,
};
