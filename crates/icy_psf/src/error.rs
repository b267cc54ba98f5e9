//! Unified error types for icy_psf

use std::path::PathBuf;

use bstr::BString;
use thiserror::Error;

use crate::{Font, FontFormat};

/// Main error type for font loading operations
#[derive(Debug, Error)]
pub enum PsfError {
    // === I/O Errors ===
    #[error("Failed to open file '{path}': {source}")]
    OpenFile { path: PathBuf, source: std::io::Error },

    #[error("Failed to read file '{path}': {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },

    // === Structural Errors ===
    #[error("Unexpected end of data")]
    ShortRead,

    #[error("Invalid font file: magic number mismatch")]
    BadMagic,

    #[error("Truncated {0} header")]
    BadHeader(FontFormat),

    #[error("Unsupported PSF1 mode: {0:#04x}")]
    UnsupportedMode(u8),

    #[error("Unsupported PSF2 version: {0}")]
    UnsupportedVersion(u32),

    #[error("Trailing garbage after font data")]
    TrailingGarbage,

    // === Glyph Table Errors ===
    #[error("Font offset is beyond the end of the file")]
    OffsetTooBig,

    #[error("Character size is zero")]
    CharSizeZero,

    #[error("Character size does not fit the file or the glyph dimensions")]
    CharSizeTooBig,

    #[error("Glyph count does not fit the file")]
    LengthTooBig,

    #[error("Font has several sizes, a target height is required")]
    HeightRequired,

    #[error("Font height {0} is not available in this file")]
    UnsupportedHeight(u32),

    // === Unicode Table Errors ===
    #[error("Unicode table is too short")]
    ShortUnicodeTable,

    #[error("Invalid code point in unicode table at font position {font_position}")]
    InvalidCodePoint { font_position: u32 },

    #[error("Empty sequence in unicode table at font position {font_position}")]
    EmptySequence { font_position: u32 },

    // === Combined Font Errors ===
    #[error("Font not found: {0}")]
    FontNotFound(BString),

    #[error("Combined fonts are nested too deeply")]
    CombineTooDeep,

    #[error("Fonts have different metrics")]
    MetricsMismatch,

    #[error("Unsupported: {0}")]
    Unsupported(&'static str),
}

/// Result type alias for icy_psf operations
pub type Result<T> = std::result::Result<T, PsfError>;

impl PsfError {
    /// Returns true for the signal a format decoder uses to say "not my format".
    pub fn is_bad_magic(&self) -> bool {
        matches!(self, PsfError::BadMagic)
    }

    pub(crate) fn open_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFile { path: path.into(), source }
    }

    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile { path: path.into(), source }
    }
}

/// A failed [`Font::append`]. The rejected font is handed back unchanged.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct AppendError {
    pub error: PsfError,
    pub font: Font,
}

impl AppendError {
    pub fn into_font(self) -> Font {
        self.font
    }
}

impl From<AppendError> for PsfError {
    fn from(err: AppendError) -> Self {
        err.error
    }
}
