//! Streaming GIF frame decoding and composition.
//!
//! [`File`] walks the block sequence of a loaded GIF buffer and yields one
//! composed frame per image descriptor. Frames compose on a persistent
//! canvas: transparency leaves the underlying pixels in place, and each
//! frame's disposal method decides what the next frame starts from.
//!
//! The canvas is stored bottom-up (row 0 of the pixel array is the bottom
//! screen row), matching texture upload conventions; emitted frames copy it
//! as-is.

use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use crate::gif::error::GifError;
use crate::gif::frame::{Disposal, Frame, GraphicControl};
use crate::gif::lzw::Lzw;
use crate::gif::palette::{Color, Palette};
use crate::gif::reader::CodeReader;
use crate::gif::{Header, Version, constants};

/// Streaming decoder over a fully loaded GIF byte buffer.
///
/// The header is parsed lazily on first use; frames decode one at a time via
/// [`Self::next_frame`]. All scratch buffers (dictionary, canvas, snapshot)
/// belong to the decoder and are released when it drops.
///
/// A single decoder is strictly sequential; separate decoders over separate
/// buffers are independent.
///
/// # Examples
///
/// ```no_run
/// use gifray_types::gif::File;
///
/// # fn main() -> Result<(), gifray_types::gif::GifError> {
/// let mut gif = File::open("animation.gif")?;
/// while let Some(frame) = gif.next_frame()? {
///     println!("frame: {} ms", frame.delay_ms());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct File {
	data: Vec<u8>,
	pos: usize,
	header: Option<Header>,
	global_palette: Option<Palette>,
	control: GraphicControl,
	canvas: Option<Canvas>,
	lzw: Lzw,
	done: bool,
	failed: bool,
}

impl File {
	/// Creates a decoder over the given bytes.
	///
	/// Nothing is parsed until the first frame or header access.
	pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
		Self {
			data: data.into(),
			pos: 0,
			header: None,
			global_palette: None,
			control: GraphicControl::default(),
			canvas: None,
			lzw: Lzw::new(),
			done: false,
			failed: false,
		}
	}

	/// Creates a decoder over the contents of the file at `path`.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, GifError> {
		let data = std::fs::read(path)?;
		Ok(Self::from_bytes(data))
	}

	/// Creates a decoder over everything the reader yields.
	///
	/// # Errors
	///
	/// Returns an error if reading fails.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, GifError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Ok(Self::from_bytes(data))
	}

	/// Returns the parsed header, parsing it (and the global color table) on
	/// first call.
	///
	/// # Errors
	///
	/// Returns [`GifError::InvalidHeader`] for a short buffer or unknown
	/// signature, and [`GifError::Truncated`] if the declared global color
	/// table overruns the buffer.
	pub fn header(&mut self) -> Result<Header, GifError> {
		if let Some(header) = self.header {
			return Ok(header);
		}

		let header = Header::from_bytes(&self.data)?;
		self.pos = Header::SIZE;

		if header.has_global_palette() {
			let palette = self.read_palette(header.global_palette_len())?;
			self.global_palette = Some(palette);
		}

		trace!("screen: {}x{} ({})", header.width(), header.height(), header.version());
		self.header = Some(header);
		Ok(header)
	}

	/// Returns the format revision.
	///
	/// # Errors
	///
	/// Same failure modes as [`Self::header`].
	pub fn version(&mut self) -> Result<Version, GifError> {
		Ok(self.header()?.version())
	}

	/// Returns the logical screen width in pixels.
	///
	/// # Errors
	///
	/// Same failure modes as [`Self::header`].
	pub fn width(&mut self) -> Result<u16, GifError> {
		Ok(self.header()?.width())
	}

	/// Returns the logical screen height in pixels.
	///
	/// # Errors
	///
	/// Same failure modes as [`Self::header`].
	pub fn height(&mut self) -> Result<u16, GifError> {
		Ok(self.header()?.height())
	}

	/// Returns the RGBA color of the background palette entry, or
	/// transparent black if there is no global color table.
	///
	/// # Errors
	///
	/// Same failure modes as [`Self::header`].
	pub fn background_color(&mut self) -> Result<Color, GifError> {
		let header = self.header()?;
		Ok(match &self.global_palette {
			Some(palette) => palette.get(header.background_index()),
			None => Color::transparent(),
		})
	}

	/// Decodes and returns the next frame.
	///
	/// Returns `Ok(None)` once the trailer is reached; every later call
	/// keeps returning `Ok(None)`.
	///
	/// # Errors
	///
	/// Any structural error in the stream. After a failure the decoder is
	/// poisoned and further calls return [`GifError::Defunct`].
	pub fn next_frame(&mut self) -> Result<Option<Frame>, GifError> {
		if self.failed {
			return Err(GifError::Defunct);
		}

		match self.advance() {
			Ok(frame) => Ok(frame),
			Err(error) => {
				self.failed = true;
				Err(error)
			}
		}
	}

	/// Returns an iterator that yields frames until the trailer or the
	/// first error.
	pub fn frames(&mut self) -> Frames<'_> {
		Frames {
			file: self,
		}
	}

	/// Block loop: dispatch on introducer bytes until a frame is produced
	/// or the trailer is reached.
	fn advance(&mut self) -> Result<Option<Frame>, GifError> {
		let header = self.header()?;

		if self.done {
			return Ok(None);
		}

		loop {
			let offset = self.pos;
			let introducer = self.read_u8()?;

			match introducer {
				constants::BLOCK_IMAGE => {
					if let Some(frame) = self.read_image(header)? {
						return Ok(Some(frame));
					}
				}
				constants::BLOCK_EXTENSION => self.read_extension()?,
				constants::BLOCK_TRAILER => {
					debug!("trailer at offset {offset}");
					self.done = true;
					return Ok(None);
				}
				introducer => {
					return Err(GifError::UnexpectedBlock {
						introducer,
						offset,
					});
				}
			}
		}
	}

	/// Parses one extension block. Graphic control updates the decoder
	/// state; every other label (comment, plain text, application -
	/// including Netscape looping) is skipped.
	fn read_extension(&mut self) -> Result<(), GifError> {
		let label = self.read_u8()?;

		if label == constants::EXT_GRAPHIC_CONTROL {
			let end = self.pos + GraphicControl::SIZE;
			if end > self.data.len() {
				return Err(GifError::truncated(end - self.data.len(), self.pos));
			}
			self.control = GraphicControl::from_bytes(&self.data[self.pos..end])?;
			self.pos = end;
			trace!("{}", self.control);
		} else {
			trace!("skipping extension 0x{label:02X}");
			self.skip_sub_blocks()?;
		}

		Ok(())
	}

	/// Decodes one image block into the canvas and emits a frame.
	///
	/// Returns `Ok(None)` for descriptors with a zero-sized rectangle, whose
	/// payload is consumed without producing a frame.
	fn read_image(&mut self, header: Header) -> Result<Option<Frame>, GifError> {
		let left = self.read_u16()?;
		let top = self.read_u16()?;
		let width = self.read_u16()?;
		let height = self.read_u16()?;
		let flags = self.read_u8()?;

		let local_palette = if flags & constants::IMAGE_FLAG_LOCAL_PALETTE != 0 {
			Some(self.read_palette(2 << (flags & 0x07))?)
		} else {
			None
		};

		if width == 0 || height == 0 {
			// descriptor without pixels; drop its payload and carry on
			self.read_u8()?;
			self.skip_sub_blocks()?;
			return Ok(None);
		}

		debug!("image {width}x{height} at ({left}, {top}), flags 0x{flags:02X}");

		let min_code_size = self.read_u8()?;
		let screen_len = header.width() as usize * header.height() as usize;

		let canvas = self.canvas.get_or_insert_with(|| Canvas::new(screen_len));
		canvas.dispose(self.control.disposal());

		let fallback = Palette::new();
		let palette = match &local_palette {
			Some(palette) => palette,
			None => match &self.global_palette {
				Some(palette) => palette,
				None => &fallback,
			},
		};

		let mut raster = Raster::new(
			&mut canvas.output,
			palette,
			self.control.transparent_index(),
			header,
			left,
			top,
			width,
		);

		let mut reader = CodeReader::new(&self.data, self.pos);
		self.lzw.decode(&mut reader, min_code_size, &mut raster)?;
		self.pos = reader.finish()?;

		if flags & constants::IMAGE_FLAG_INTERLACED != 0 {
			deinterlace(&mut canvas.output, header.width() as usize);
		}

		let frame = Frame::new(
			header.width(),
			header.height(),
			self.control.delay_ms(),
			canvas.output.clone(),
		);
		Ok(Some(frame))
	}

	/// Reads a color table of `entries` RGB triples at the cursor.
	fn read_palette(&mut self, entries: usize) -> Result<Palette, GifError> {
		let end = self.pos + entries * 3;
		if end > self.data.len() {
			return Err(GifError::truncated(end - self.data.len(), self.pos));
		}

		let palette = Palette::from_rgb_bytes(&self.data[self.pos..end]);
		self.pos = end;
		Ok(palette)
	}

	/// Skips a sub-block chain, including its 0-length terminator.
	fn skip_sub_blocks(&mut self) -> Result<(), GifError> {
		loop {
			let offset = self.pos;
			let length = self.read_u8()? as usize;

			if length == 0 {
				return Ok(());
			}
			if self.pos + length > self.data.len() {
				return Err(GifError::Malformed {
					length,
					offset,
				});
			}
			self.pos += length;
		}
	}

	fn read_u8(&mut self) -> Result<u8, GifError> {
		let Some(&byte) = self.data.get(self.pos) else {
			return Err(GifError::truncated(1, self.pos));
		};
		self.pos += 1;
		Ok(byte)
	}

	fn read_u16(&mut self) -> Result<u16, GifError> {
		let low = self.read_u8()?;
		let high = self.read_u8()?;
		Ok(u16::from_le_bytes([low, high]))
	}
}

/// Iterator over the remaining frames of a [`File`].
///
/// Yields `Err` at most once; a poisoned decoder then reports the trailer
/// state as exhausted.
#[derive(Debug)]
pub struct Frames<'a> {
	file: &'a mut File,
}

impl Iterator for Frames<'_> {
	type Item = Result<Frame, GifError>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.file.next_frame() {
			Ok(frame) => frame.map(Ok),
			Err(GifError::Defunct) => None,
			Err(error) => Some(Err(error)),
		}
	}
}

/// The persistent compositing surface.
///
/// `previous` is the snapshot used by restore-previous disposal. While
/// `previous_is_output` is set the snapshot logically aliases the canvas
/// (the source of truth for keep/none disposal); it is materialized into its
/// own buffer the moment a restore needs to read it.
#[derive(Debug)]
struct Canvas {
	output: Vec<Color>,
	previous: Vec<Color>,
	previous_is_output: bool,
}

impl Canvas {
	fn new(len: usize) -> Self {
		Self {
			output: vec![Color::transparent(); len],
			previous: vec![Color::transparent(); len],
			previous_is_output: true,
		}
	}

	/// Applies the pending disposal method before the next frame decodes.
	fn dispose(&mut self, method: Disposal) {
		match method {
			Disposal::None | Disposal::Keep => {
				self.previous_is_output = true;
			}
			Disposal::RestoreBackground => {
				if self.previous_is_output {
					// the snapshot keeps the old pixels, the canvas clears
					std::mem::swap(&mut self.previous, &mut self.output);
					self.previous_is_output = false;
				}
				self.output.fill(Color::transparent());
			}
			Disposal::RestorePrevious => {
				if self.previous_is_output {
					self.previous.copy_from_slice(&self.output);
					self.previous_is_output = false;
				} else {
					self.output.copy_from_slice(&self.previous);
				}
			}
		}
	}
}

/// Palette index sentinel that never matches a real transparent index
const NO_TRANSPARENCY: u16 = u16::MAX;

/// Writes decoded palette indices into the frame rectangle.
///
/// The cursor walks the rectangle row-major; rows land bottom-up in the
/// canvas. Clip bounds are precomputed so the per-pixel path is a compare
/// and a store: `row_end` is where the cursor wraps, `safe_end` the last
/// writable column, and a negative `row` means the rectangle has run off the
/// screen and remaining emissions are discarded.
pub(crate) struct Raster<'a> {
	output: &'a mut [Color],
	palette: &'a Palette,
	transparent: u16,
	screen_width: usize,
	left: usize,
	row_end: usize,
	safe_end: usize,
	col: usize,
	row: isize,
	finished: bool,
}

impl<'a> Raster<'a> {
	pub fn new(
		output: &'a mut [Color],
		palette: &'a Palette,
		transparent: Option<u8>,
		header: Header,
		left: u16,
		top: u16,
		width: u16,
	) -> Self {
		let screen_width = header.width() as usize;
		let left = left as usize;
		let row_end = left + width as usize;
		let row = (header.height() as isize - 1 - top as isize) * screen_width as isize;

		Self {
			output,
			palette,
			transparent: transparent.map_or(NO_TRANSPARENCY, u16::from),
			screen_width,
			left,
			row_end,
			safe_end: row_end.min(screen_width),
			col: left,
			row,
			finished: row < 0,
		}
	}

	/// Places one palette index and advances the cursor.
	///
	/// Transparent indices and columns beyond the screen advance the cursor
	/// without writing.
	#[inline]
	pub fn put(&mut self, symbol: u16) {
		if self.finished {
			return;
		}

		if symbol != self.transparent
			&& self.col < self.safe_end
			&& (symbol as usize) < Palette::MAX_COLORS
		{
			self.output[self.row as usize + self.col] = self.palette.get(symbol as u8);
		}

		self.col += 1;
		if self.col == self.row_end {
			self.col = self.left;
			self.row -= self.screen_width as isize;
			if self.row < 0 {
				self.finished = true;
			}
		}
	}
}

/// Remaps a canvas decoded in the four-pass interlace order into linear
/// row order.
///
/// Rows are counted over the whole canvas, which is exact when the
/// interlaced frame spans the full screen height (the overwhelmingly common
/// layout for interlaced files).
fn deinterlace(pixels: &mut Vec<Color>, width: usize) {
	if width == 0 || pixels.is_empty() {
		return;
	}

	let rows = pixels.len() / width;
	let pass1 = rows.div_ceil(8);
	let pass2 = rows.saturating_sub(4).div_ceil(8);
	let pass3 = rows.saturating_sub(2).div_ceil(4);

	let mut linear = vec![Color::transparent(); pixels.len()];
	for dest in 0..rows {
		let source = if dest % 8 == 0 {
			dest / 8
		} else if dest % 8 == 4 {
			pass1 + dest / 8
		} else if dest % 4 == 2 {
			pass1 + pass2 + dest / 4
		} else {
			pass1 + pass2 + pass3 + dest / 2
		};

		// rows are stored bottom-up
		let from = (rows - 1 - source) * width;
		let to = (rows - 1 - dest) * width;
		linear[to..to + width].copy_from_slice(&pixels[from..from + width]);
	}

	*pixels = linear;
}
