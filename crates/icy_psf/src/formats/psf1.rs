//! PSF1 format
//!
//! - 4 byte header: magic (0x36, 0x04), mode, charsize
//! - 256 or 512 glyphs, 8 pixels wide, one byte per row
//! - Optional unicode table of 16-bit code units

use super::{FontFormat, LoadContext};
use crate::{
    cursor::ByteCursor,
    unimap::{decode_unicode_table, Ucs2Table},
    Font, PsfError, Result,
};

/// PSF1 magic number (little-endian: 0x0436)
pub const PSF1_MAGIC: u16 = 0x0436;

// mode flags
const PSF1_MODE512: u8 = 0x01;
const PSF1_MODEHASTAB: u8 = 0x02;
const PSF1_MODEHASSEQ: u8 = 0x04;
const PSF1_MAXMODE: u8 = 0x05;

const PSF1_WIDTH: u32 = 8;

pub(super) fn decode(cursor: &mut ByteCursor<'_>, _ctx: &LoadContext<'_>) -> Result<Font> {
    cursor.expect_magic(&PSF1_MAGIC.to_le_bytes())?;

    let (mode, char_size) = match (cursor.read_u8(), cursor.read_u8()) {
        (Ok(mode), Ok(char_size)) => (mode, char_size),
        _ => return Err(PsfError::BadHeader(FontFormat::Psf1)),
    };
    if mode > PSF1_MAXMODE {
        return Err(PsfError::UnsupportedMode(mode));
    }
    if char_size == 0 {
        return Err(PsfError::CharSizeZero);
    }

    let char_count: u32 = if mode & PSF1_MODE512 != 0 { 512 } else { 256 };
    let table_len = char_size as usize * char_count as usize;
    if table_len > cursor.remaining() {
        return Err(PsfError::LengthTooBig);
    }
    let glyphs = cursor.read_bytes(table_len)?.to_vec();

    let mut unicode_map = Vec::new();
    if mode & (PSF1_MODEHASTAB | PSF1_MODEHASSEQ) != 0 {
        decode_unicode_table::<Ucs2Table>(cursor, char_count, &mut unicode_map)?;
        if !cursor.at_end() {
            return Err(PsfError::TrailingGarbage);
        }
    }

    Ok(Font::new(
        FontFormat::Psf1,
        PSF1_WIDTH,
        char_size as u32,
        char_size as u32,
        char_count,
        glyphs,
        unicode_map,
    ))
}
