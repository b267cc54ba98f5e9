//! Font file formats and format detection.
//!
//! Formats are tried in the order of [`FontFormat::ALL`]. Each decoder either
//! produces a font, rejects the data with [`PsfError::BadMagic`] so the next
//! format gets a chance, or fails the whole parse with any other error.

use std::{fmt, fs::File, io::Read, path::Path};

use crate::{cursor::ByteCursor, Font, ParseOptions, PsfError, Result};

mod combined;
mod psf1;
mod psf2;
mod raw;

pub use combined::{COMBINED_MAGIC, MAX_COMBINE_DEPTH};
pub use psf1::PSF1_MAGIC;
pub use psf2::PSF2_MAGIC;

/// Supported console font formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    /// PSF version 2: 32 byte header, arbitrary glyph size, UTF-8 unicode table
    Psf2,
    /// PSF version 1: 4 byte header, 8 pixel wide glyphs, 16-bit unicode table
    Psf1,
    /// Text file listing partial fonts to be loaded and concatenated
    Combined,
    /// Headerless glyph dump, recognized by its length
    Raw,
}

type Decoder = fn(&mut ByteCursor<'_>, &LoadContext<'_>) -> Result<Font>;

impl FontFormat {
    /// All formats in detection order.
    pub const ALL: &'static [FontFormat] = &[FontFormat::Psf2, FontFormat::Psf1, FontFormat::Combined, FontFormat::Raw];

    pub fn name(&self) -> &'static str {
        match self {
            FontFormat::Psf2 => "PSF2",
            FontFormat::Psf1 => "PSF1",
            FontFormat::Combined => "combined font",
            FontFormat::Raw => "raw font",
        }
    }

    fn decoder(&self) -> Decoder {
        match self {
            FontFormat::Psf2 => psf2::decode,
            FontFormat::Psf1 => psf1::decode,
            FontFormat::Combined => combined::decode,
            FontFormat::Raw => raw::decode,
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State shared by nested loads of a combined font.
pub(crate) struct LoadContext<'a> {
    pub options: &'a ParseOptions,
    /// Number of combined fonts currently being loaded around this one.
    pub depth: usize,
}

impl<'a> LoadContext<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self { options, depth: 0 }
    }

    fn nested(&self) -> Self {
        Self {
            options: self.options,
            depth: self.depth + 1,
        }
    }
}

/// Parse a font from an in-memory buffer.
///
/// The glyph table and unicode map are copied out of `data`; the returned font
/// does not borrow from it.
pub fn parse(data: &[u8], options: &ParseOptions) -> Result<Font> {
    parse_with(data, &LoadContext::new(options))
}

/// Read a font file completely and parse it.
pub fn load(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Font> {
    load_with(path.as_ref(), &LoadContext::new(options))
}

fn parse_with(data: &[u8], ctx: &LoadContext<'_>) -> Result<Font> {
    let mut cursor = ByteCursor::new(data);
    for format in FontFormat::ALL {
        cursor.seek(0)?;
        match (format.decoder())(&mut cursor, ctx) {
            Ok(font) => {
                log::debug!("loaded {} font: {} glyphs, {}x{}", format, font.char_count(), font.width(), font.height());
                return Ok(font);
            }
            Err(PsfError::BadMagic) => {
                log::trace!("not a {format}");
            }
            Err(err) => {
                log::debug!("failed to load {format}: {err}");
                return Err(err);
            }
        }
    }
    Err(PsfError::BadMagic)
}

fn load_with(path: &Path, ctx: &LoadContext<'_>) -> Result<Font> {
    let mut file = File::open(path).map_err(|err| PsfError::open_file(path, err))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|err| PsfError::read_file(path, err))?;
    log::trace!("read {} bytes from {}", data.len(), path.display());
    parse_with(&data, ctx)
}
