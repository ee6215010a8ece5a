//! `gifray-rs` decodes `GIF87a`/`GIF89a` animations from in-memory byte buffers
//! into fully composed RGBA frames, ready for texture or framebuffer upload.
//!
//! The decoding machinery lives in the [`gifray_types`] crate; this facade
//! re-exports it so applications can depend on a single package.
//!
//! # Examples
//!
//! ```no_run
//! use gifray_rs::GifFile;
//!
//! # fn main() -> Result<(), gifray_rs::GifError> {
//! let mut gif = GifFile::open("animation.gif")?;
//! while let Some(frame) = gif.next_frame()? {
//!     println!("{}x{} for {} ms", frame.width(), frame.height(), frame.delay_ms());
//! }
//! # Ok(())
//! # }
//! ```

pub use gifray_types::*;
