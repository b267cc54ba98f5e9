//! Headerless fonts, recognized by their file size.
//!
//! All of them are 8 pixels wide with one byte per row:
//! - 9780 bytes: DOS code page file with 8x16, 8x14 and 8x8 fonts of 256 glyphs
//! - 32768 bytes: `restorefont` dump, two 512 glyph 8x32 fonts
//! - n * 256 bytes: bare 256 glyph font of height n
//! - n * 256 + 40 bytes: the same, preceded by a code page header

use super::{FontFormat, LoadContext};
use crate::{cursor::ByteCursor, Font, PsfError, Result};

const CODE_PAGE_FILE_LEN: usize = 9780;
const CODE_PAGE_HEADER_LEN: usize = 40;
const RESTOREFONT_LEN: usize = 32768;

/// (height, offset) of the fonts inside a code page file.
/// 40 byte header, 8x16 font, 6 bytes, 8x14 font, 6 bytes, 8x8 font.
const CODE_PAGE_FONTS: [(u32, usize); 3] = [(16, 40), (14, 4142), (8, 7732)];

const RAW_WIDTH: u32 = 8;

pub(super) fn decode(cursor: &mut ByteCursor<'_>, ctx: &LoadContext<'_>) -> Result<Font> {
    let len = cursor.remaining();
    match len {
        CODE_PAGE_FILE_LEN => {
            let Some(target_height) = ctx.options.target_height else {
                return Err(PsfError::HeightRequired);
            };
            let target_height = target_height.get();
            let Some(&(height, offset)) = CODE_PAGE_FONTS.iter().find(|(height, _)| *height == target_height) else {
                return Err(PsfError::UnsupportedHeight(target_height));
            };
            cursor.skip(offset)?;
            bare_font(cursor, height, 256)
        }
        RESTOREFONT_LEN => {
            log::warn!("font from restorefont? using the first half");
            bare_font(cursor, 32, 512)
        }
        _ if len > 0 && len % 256 == 0 => bare_font(cursor, height_for(len)?, 256),
        _ if len > CODE_PAGE_HEADER_LEN && len % 256 == CODE_PAGE_HEADER_LEN => {
            cursor.skip(CODE_PAGE_HEADER_LEN)?;
            bare_font(cursor, height_for(len - CODE_PAGE_HEADER_LEN)?, 256)
        }
        _ => Err(PsfError::BadMagic),
    }
}

fn height_for(len: usize) -> Result<u32> {
    u32::try_from(len / 256).map_err(|_| PsfError::LengthTooBig)
}

fn bare_font(cursor: &mut ByteCursor<'_>, height: u32, char_count: u32) -> Result<Font> {
    let table_len = (height as usize).checked_mul(char_count as usize).ok_or(PsfError::LengthTooBig)?;
    let glyphs = cursor.read_bytes(table_len)?.to_vec();
    Ok(Font::new(FontFormat::Raw, RAW_WIDTH, height, height, char_count, glyphs, Vec::new()))
}
