//! Unicode tables: which characters each font position represents.
//!
//! Both PSF versions store one entry list per glyph, in glyph order:
//!
//! ```text
//! <entry>  := <uc>* <seq>* <separator>
//! <seq>    := <start_seq> <uc> <uc>*
//! ```
//!
//! PSF1 encodes `<uc>` as 16-bit little-endian code units, PSF2 as UTF-8.

use crate::{cursor::ByteCursor, PsfError, Result};

pub(crate) const PSF1_SEPARATOR: u16 = 0xFFFF;
pub(crate) const PSF1_START_SEQ: u16 = 0xFFFE;

pub(crate) const PSF2_SEPARATOR: u8 = 0xFF;
pub(crate) const PSF2_START_SEQ: u8 = 0xFE;

/// One mapping from a font position to a character, or to a sequence of
/// characters rendered by a single glyph (e.g. a letter plus combining accent).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnimapEntry {
    pub font_position: u32,
    /// Never empty.
    pub code_points: Vec<char>,
}

impl UnimapEntry {
    pub fn new(font_position: u32, code_points: Vec<char>) -> Self {
        Self { font_position, code_points }
    }

    pub fn single(font_position: u32, ch: char) -> Self {
        Self::new(font_position, vec![ch])
    }

    pub fn is_sequence(&self) -> bool {
        self.code_points.len() > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Separator,
    StartSequence,
    CodePoint(u32),
}

/// On-disk encoding of a unicode table.
pub(crate) trait TableEncoding {
    fn next_token(cursor: &mut ByteCursor<'_>) -> Result<Token>;
}

/// PSF1 table: 16-bit code units.
pub(crate) struct Ucs2Table;

impl TableEncoding for Ucs2Table {
    fn next_token(cursor: &mut ByteCursor<'_>) -> Result<Token> {
        let unit = cursor.read_u16()?;
        let token = match unit {
            PSF1_SEPARATOR => Token::Separator,
            PSF1_START_SEQ => Token::StartSequence,
            0xD800..=0xDBFF => {
                let save = cursor.position();
                let low = cursor.read_u16()?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    Token::CodePoint(0x1_0000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00))
                } else {
                    cursor.seek(save)?;
                    Token::CodePoint(crate::cursor::INVALID_CODE_POINT)
                }
            }
            _ => Token::CodePoint(unit as u32),
        };
        Ok(token)
    }
}

/// PSF2 table: UTF-8 with 0xFE/0xFF as markers (both are invalid UTF-8 lead bytes).
pub(crate) struct Utf8Table;

impl TableEncoding for Utf8Table {
    fn next_token(cursor: &mut ByteCursor<'_>) -> Result<Token> {
        match cursor.peek_u8()? {
            PSF2_SEPARATOR => {
                cursor.skip(1)?;
                Ok(Token::Separator)
            }
            PSF2_START_SEQ => {
                cursor.skip(1)?;
                Ok(Token::StartSequence)
            }
            _ => Ok(Token::CodePoint(cursor.read_utf8_scalar()?)),
        }
    }
}

/// Decodes the entry lists of font positions `0..char_count` and appends them to `map`.
pub(crate) fn decode_unicode_table<E: TableEncoding>(cursor: &mut ByteCursor<'_>, char_count: u32, map: &mut Vec<UnimapEntry>) -> Result<()> {
    for font_position in 0..char_count {
        decode_position::<E>(cursor, font_position, map)?;
    }
    Ok(())
}

fn decode_position<E: TableEncoding>(cursor: &mut ByteCursor<'_>, font_position: u32, map: &mut Vec<UnimapEntry>) -> Result<()> {
    // None while reading single code points, Some after the first start marker
    let mut sequence: Option<Vec<char>> = None;
    loop {
        let token = E::next_token(cursor).map_err(|err| match err {
            PsfError::ShortRead => PsfError::ShortUnicodeTable,
            err => err,
        })?;

        match token {
            Token::Separator => {
                finish_sequence(sequence.take(), font_position, map)?;
                return Ok(());
            }
            Token::StartSequence => {
                finish_sequence(sequence.replace(Vec::new()), font_position, map)?;
            }
            Token::CodePoint(code_point) => {
                let ch = char::from_u32(code_point).ok_or(PsfError::InvalidCodePoint { font_position })?;
                match sequence.as_mut() {
                    Some(seq) => seq.push(ch),
                    None => map.push(UnimapEntry::single(font_position, ch)),
                }
            }
        }
    }
}

fn finish_sequence(sequence: Option<Vec<char>>, font_position: u32, map: &mut Vec<UnimapEntry>) -> Result<()> {
    match sequence {
        None => Ok(()),
        Some(code_points) if code_points.is_empty() => Err(PsfError::EmptySequence { font_position }),
        Some(code_points) => {
            map.push(UnimapEntry::new(font_position, code_points));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_utf8(data: &[u8], char_count: u32) -> Result<Vec<UnimapEntry>> {
        let mut cursor = ByteCursor::new(data);
        let mut map = Vec::new();
        decode_unicode_table::<Utf8Table>(&mut cursor, char_count, &mut map)?;
        assert!(cursor.at_end());
        Ok(map)
    }

    fn decode_ucs2(units: &[u16], char_count: u32) -> Result<Vec<UnimapEntry>> {
        let data: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
        let mut cursor = ByteCursor::new(&data);
        let mut map = Vec::new();
        decode_unicode_table::<Ucs2Table>(&mut cursor, char_count, &mut map)?;
        Ok(map)
    }

    #[test]
    fn test_utf8_singles() {
        let mut data = Vec::new();
        data.extend_from_slice("A".as_bytes());
        data.push(0xFF);
        data.extend_from_slice("ÄÆ".as_bytes());
        data.push(0xFF);
        data.push(0xFF);

        let map = decode_utf8(&data, 3).unwrap();
        assert_eq!(
            map,
            vec![UnimapEntry::single(0, 'A'), UnimapEntry::single(1, 'Ä'), UnimapEntry::single(1, 'Æ')]
        );
    }

    #[test]
    fn test_utf8_sequences() {
        let mut data = Vec::new();
        data.extend_from_slice("Å".as_bytes());
        data.push(0xFE);
        data.extend_from_slice("A\u{30A}".as_bytes());
        data.push(0xFE);
        data.extend_from_slice("a\u{30A}".as_bytes());
        data.push(0xFF);

        let map = decode_utf8(&data, 1).unwrap();
        assert_eq!(
            map,
            vec![
                UnimapEntry::single(0, 'Å'),
                UnimapEntry::new(0, vec!['A', '\u{30A}']),
                UnimapEntry::new(0, vec!['a', '\u{30A}']),
            ]
        );
        assert!(map[1].is_sequence());
    }

    #[test]
    fn test_empty_sequence() {
        let data = [b'A', 0xFE, 0xFF];
        assert!(matches!(decode_utf8(&data, 1), Err(PsfError::EmptySequence { font_position: 0 })));

        let data = [0xFF, 0xFE, 0xFE, b'A', 0xFF];
        assert!(matches!(decode_utf8(&data, 2), Err(PsfError::EmptySequence { font_position: 1 })));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0xFF, 0xC3, 0xFF];
        assert!(matches!(decode_utf8(&data, 2), Err(PsfError::InvalidCodePoint { font_position: 1 })));

        // surrogate code point encoded as UTF-8
        let data = [0xED, 0xA0, 0x80, 0xFF];
        assert!(matches!(decode_utf8(&data, 1), Err(PsfError::InvalidCodePoint { font_position: 0 })));
    }

    #[test]
    fn test_short_table() {
        let data = [b'A', 0xFF, b'B'];
        assert!(matches!(decode_utf8(&data, 2), Err(PsfError::ShortUnicodeTable)));
        assert!(matches!(decode_utf8(&[], 1), Err(PsfError::ShortUnicodeTable)));
        assert!(matches!(decode_utf8(&[0xE2, 0x82], 1), Err(PsfError::ShortUnicodeTable)));
    }

    #[test]
    fn test_zero_positions() {
        assert_eq!(decode_utf8(&[], 0).unwrap(), Vec::new());
    }

    #[test]
    fn test_ucs2_table() {
        let units = [0x0041, 0x00C4, 0xFFFF, 0xFFFE, 0x0041, 0x030A, 0xFFFF, 0xD83D, 0xDE00, 0xFFFF];
        let map = decode_ucs2(&units, 3).unwrap();
        assert_eq!(
            map,
            vec![
                UnimapEntry::single(0, 'A'),
                UnimapEntry::single(0, 'Ä'),
                UnimapEntry::new(1, vec!['A', '\u{30A}']),
                UnimapEntry::single(2, '😀'),
            ]
        );
    }

    #[test]
    fn test_ucs2_lone_surrogate() {
        let units = [0xD83D, 0xFFFF];
        assert!(matches!(decode_ucs2(&units, 1), Err(PsfError::InvalidCodePoint { font_position: 0 })));

        let units = [0xDE00, 0xFFFF];
        assert!(matches!(decode_ucs2(&units, 1), Err(PsfError::InvalidCodePoint { font_position: 0 })));
    }

    #[test]
    fn test_ucs2_short_table() {
        let data = [0x41, 0x00, 0xFF];
        let mut cursor = ByteCursor::new(&data);
        let mut map = Vec::new();
        let result = decode_unicode_table::<Ucs2Table>(&mut cursor, 1, &mut map);
        assert!(matches!(result, Err(PsfError::ShortUnicodeTable)));
    }
}
