#![allow(dead_code)]

use std::path::{Path, PathBuf};

use icy_psf::{pitch, PSF1_MAGIC, PSF2_MAGIC};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Directory with the font fixtures:
///
/// - `box8x4.psfu`: PSF2 8x4, 4 glyphs, unicode table with a sequence at position 2
/// - `part1.psfu`, `part2.psfu`: PSF2 8x4, 2 glyphs each, mapped to a/b and c/d
/// - `wide.psf`: PSF2 12x4, 2 glyphs, no unicode table
/// - `legacy.psf`: PSF1 8x4, 256 glyphs where glyph i is `[i; 4]`, ASCII mapped 1:1,
///   position 0xC4 mapped to 'Ä' and 'Α'
/// - `*.cmb`: combined fonts listing the files above
pub fn files_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("files")
}

pub fn psf2_header(length: u32, width: u32, height: u32, flags: u32) -> Vec<u8> {
    let mut data = Vec::new();
    for field in [PSF2_MAGIC, 0, 32, flags, length, height * pitch(width), height, width] {
        data.extend_from_slice(&field.to_le_bytes());
    }
    data
}

/// PSF2 font without unicode table.
pub fn psf2(width: u32, height: u32, glyphs: &[u8]) -> Vec<u8> {
    let char_size = (height * pitch(width)) as usize;
    let mut data = psf2_header((glyphs.len() / char_size) as u32, width, height, 0);
    data.extend_from_slice(glyphs);
    data
}

/// PSF2 font with a unicode table; `table[i]` lists the characters of glyph i.
pub fn psf2_with_table(width: u32, height: u32, glyphs: &[u8], table: &[&str]) -> Vec<u8> {
    let char_size = (height * pitch(width)) as usize;
    let length = glyphs.len() / char_size;
    assert_eq!(length, table.len());

    let mut data = psf2_header(length as u32, width, height, 1);
    data.extend_from_slice(glyphs);
    for entry in table {
        data.extend_from_slice(entry.as_bytes());
        data.push(0xFF);
    }
    data
}

/// PSF1 font; `glyphs` must hold 256 or 512 glyphs depending on `mode`.
pub fn psf1(mode: u8, char_size: u8, glyphs: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&PSF1_MAGIC.to_le_bytes());
    data.push(mode);
    data.push(char_size);
    data.extend_from_slice(glyphs);
    data
}

/// PSF1 font with a unicode table; `table[i]` lists the code units of glyph i.
pub fn psf1_with_table(char_size: u8, glyphs: &[u8], table: &[Vec<u16>]) -> Vec<u8> {
    let mut data = psf1(0x02, char_size, glyphs);
    for entry in table {
        for unit in entry {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&0xFFFFu16.to_le_bytes());
    }
    data
}
