//! PSF2 format
//!
//! - 32 byte header: magic, version, header size, flags, glyph count, char size, height, width
//! - Glyph table at `header size`, `glyph count * char size` bytes
//! - Optional UTF-8 unicode table right behind the glyph table

use super::{FontFormat, LoadContext};
use crate::{
    cursor::ByteCursor,
    glyph::pitch,
    unimap::{decode_unicode_table, Utf8Table},
    Font, PsfError, Result,
};

/// PSF2 magic number (little-endian: 0x864AB572)
pub const PSF2_MAGIC: u32 = 0x864A_B572;

const PSF2_MAXVERSION: u32 = 0;

// bits used in flags
const PSF2_HAS_UNICODE_TABLE: u32 = 0x01;

struct Psf2Header {
    version: u32,
    /// offset of the glyph table from the start of the file
    header_size: u32,
    flags: u32,
    length: u32,
    char_size: u32,
    height: u32,
    width: u32,
}

impl Psf2Header {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            version: cursor.read_u32()?,
            header_size: cursor.read_u32()?,
            flags: cursor.read_u32()?,
            length: cursor.read_u32()?,
            char_size: cursor.read_u32()?,
            height: cursor.read_u32()?,
            width: cursor.read_u32()?,
        })
    }
}

pub(super) fn decode(cursor: &mut ByteCursor<'_>, _ctx: &LoadContext<'_>) -> Result<Font> {
    let begin = cursor.position();
    cursor.expect_magic(&PSF2_MAGIC.to_le_bytes())?;

    let header = Psf2Header::read(cursor).map_err(|_| PsfError::BadHeader(FontFormat::Psf2))?;
    if header.version > PSF2_MAXVERSION {
        return Err(PsfError::UnsupportedVersion(header.version));
    }

    // the buffer must hold the header and all glyphs
    let size = cursor.len() - begin;
    let header_size = header.header_size as usize;
    if header_size > size {
        return Err(PsfError::OffsetTooBig);
    }
    let char_size = header.char_size as usize;
    if char_size == 0 {
        return Err(PsfError::CharSizeZero);
    }
    let available = size - header_size;
    if char_size > available {
        return Err(PsfError::CharSizeTooBig);
    }
    if header.length as usize > available / char_size {
        return Err(PsfError::LengthTooBig);
    }

    // width, height and char_size must agree; glyphs may be padded after the last row
    if header.width == 0 {
        return Err(PsfError::CharSizeZero);
    }
    if header.height != header.char_size / pitch(header.width) {
        return Err(PsfError::CharSizeTooBig);
    }

    cursor.seek(begin + header_size)?;
    let glyphs = cursor.read_bytes(char_size * header.length as usize)?.to_vec();

    let mut unicode_map = Vec::new();
    if header.flags & PSF2_HAS_UNICODE_TABLE != 0 {
        decode_unicode_table::<Utf8Table>(cursor, header.length, &mut unicode_map)?;
        if !cursor.at_end() {
            return Err(PsfError::TrailingGarbage);
        }
    }

    Ok(Font::new(
        FontFormat::Psf2,
        header.width,
        header.height,
        header.char_size,
        header.length,
        glyphs,
        unicode_map,
    ))
}
