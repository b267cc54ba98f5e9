use std::path::Path;

use crate::{
    formats::{self, FontFormat},
    glyph::{pitch, Glyph},
    AppendError, ParseOptions, PsfError, Result, UnimapEntry,
};

/// A loaded console font: a table of equally sized glyph bitmaps plus an
/// optional mapping from font positions to Unicode.
///
/// The font owns its glyph table and unicode map. Glyphs and map entries
/// borrowed from it stay valid until the font is mutated or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    format: FontFormat,
    width: u32,
    height: u32,
    char_size: u32,
    char_count: u32,
    glyphs: Vec<u8>,
    unicode_map: Vec<UnimapEntry>,
}

impl Font {
    pub(crate) fn new(format: FontFormat, width: u32, height: u32, char_size: u32, char_count: u32, glyphs: Vec<u8>, unicode_map: Vec<UnimapEntry>) -> Self {
        debug_assert!(width > 0);
        debug_assert_eq!(glyphs.len(), char_size as usize * char_count as usize);
        debug_assert!(unicode_map.iter().all(|entry| entry.font_position < char_count));
        Self {
            format,
            width,
            height,
            char_size,
            char_count,
            glyphs,
            unicode_map,
        }
    }

    /// Parse a font from bytes, detecting the format.
    pub fn from_bytes(data: &[u8], options: &ParseOptions) -> Result<Self> {
        formats::parse(data, options)
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
        formats::load(path, options)
    }

    /// The format the font was loaded from.
    pub fn format(&self) -> FontFormat {
        self.format
    }

    pub(crate) fn set_format(&mut self, format: FontFormat) {
        self.format = format;
    }

    /// Glyph width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per glyph
    pub fn char_size(&self) -> u32 {
        self.char_size
    }

    /// Bytes per glyph row
    pub fn pitch(&self) -> u32 {
        pitch(self.width)
    }

    /// Number of glyphs
    pub fn char_count(&self) -> u32 {
        self.char_count
    }

    /// The bitmap of the glyph at `font_position`, or `None` if there is no such glyph.
    pub fn glyph(&self, font_position: u32) -> Option<&[u8]> {
        if font_position >= self.char_count {
            return None;
        }
        let char_size = self.char_size as usize;
        let start = font_position as usize * char_size;
        self.glyphs.get(start..start + char_size)
    }

    /// Like [`Font::glyph`], with pixel access.
    pub fn glyph_view(&self, font_position: u32) -> Option<Glyph<'_>> {
        self.glyph(font_position).map(|data| Glyph::new(data, self.width, self.height))
    }

    /// All glyph bitmaps in font position order.
    pub fn glyphs(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.char_count).filter_map(move |font_position| self.glyph(font_position))
    }

    /// The unicode map in file order. Empty if the font has none.
    pub fn unicode_map(&self) -> &[UnimapEntry] {
        &self.unicode_map
    }

    pub fn has_unicode_map(&self) -> bool {
        !self.unicode_map.is_empty()
    }

    /// First font position mapped to `ch` by a single character entry.
    pub fn position_of(&self, ch: char) -> Option<u32> {
        self.unicode_map
            .iter()
            .find(|entry| entry.code_points.as_slice() == [ch])
            .map(|entry| entry.font_position)
    }

    /// Appends the glyphs and unicode map of `other`, consuming it.
    ///
    /// Both fonts need the same width, height and char size. The unicode map
    /// entries of `other` are moved behind this font's glyphs. On failure both
    /// fonts are unchanged and `other` is returned inside the error.
    ///
    /// ```compile_fail
    /// # fn demo(mut font: icy_psf::Font, other: icy_psf::Font) {
    /// font.append(other).unwrap();
    /// other.char_count();
    /// # }
    /// ```
    pub fn append(&mut self, other: Font) -> std::result::Result<(), AppendError> {
        if self.width != other.width || self.height != other.height || self.char_size != other.char_size {
            return Err(AppendError {
                error: PsfError::MetricsMismatch,
                font: other,
            });
        }

        let Some(char_count) = self.char_count.checked_add(other.char_count) else {
            return Err(AppendError {
                error: PsfError::LengthTooBig,
                font: other,
            });
        };
        let Some(table_len) = (char_count as usize).checked_mul(self.char_size as usize) else {
            return Err(AppendError {
                error: PsfError::LengthTooBig,
                font: other,
            });
        };

        let offset = self.char_count;
        let mut glyphs = Vec::with_capacity(table_len);
        glyphs.extend_from_slice(&self.glyphs);
        glyphs.extend_from_slice(&other.glyphs);
        self.glyphs = glyphs;

        self.unicode_map.extend(other.unicode_map.into_iter().map(|mut entry| {
            entry.font_position += offset;
            entry
        }));
        self.char_count = char_count;
        Ok(())
    }
}
