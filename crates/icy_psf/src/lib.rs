//! Loader for Linux console fonts.
//!
//! Reads PSF1 and PSF2 fonts, combined fonts that list several partial fonts,
//! and a few headerless legacy layouts. A loaded [`Font`] is a table of
//! equally sized glyph bitmaps plus an optional unicode map.
//!
//! ```
//! use icy_psf::{Font, ParseOptions, PSF2_MAGIC};
//!
//! let mut data = Vec::new();
//! for field in [PSF2_MAGIC, 0, 32, 0, 2, 1, 1, 8] {
//!     data.extend_from_slice(&field.to_le_bytes());
//! }
//! data.extend_from_slice(&[0x00, 0xFF]);
//!
//! let font = Font::from_bytes(&data, &ParseOptions::default()).unwrap();
//! assert_eq!(font.char_count(), 2);
//! assert_eq!(font.glyph(1), Some(&[0xFF][..]));
//! ```

pub mod cursor;
pub use cursor::{ByteCursor, INVALID_CODE_POINT};

mod error;
pub use error::*;

mod font;
pub use font::Font;

pub mod formats;
pub use formats::{load, parse, FontFormat, COMBINED_MAGIC, MAX_COMBINE_DEPTH, PSF1_MAGIC, PSF2_MAGIC};

mod glyph;
pub use glyph::{pitch, Glyph};

mod options;
pub use options::{FontResolver, ParseOptions};

mod unimap;
pub use unimap::UnimapEntry;
