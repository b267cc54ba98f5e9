//! Borrowed view of a single glyph bitmap.
//!
//! Rows are stored top to bottom, each padded to a whole byte, with MSB-first
//! bit ordering:
//!
//! ```text
//!  01234v67
//! 0-####---
//! >##--#x--      row = 1, col = 5
//! 2----##--      byte = row * pitch + col / 8
//! 3---##---      bit  = 0x80 >> (col % 8)
//! ```

/// Bytes per glyph row for the given pixel width.
#[inline]
pub const fn pitch(width: u32) -> u32 {
    width.div_ceil(8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Glyph<'a> {
    pub(crate) fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self { data, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw bitmap, `char_size` bytes. PSF2 glyphs may carry padding after the last row.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Get a row as packed bytes (MSB = leftmost pixel).
    ///
    /// Returns `None` if the row is out of bounds.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let pitch = pitch(self.width) as usize;
        let start = y as usize * pitch;
        self.data.get(start..start + pitch)
    }

    /// Get a pixel value at the given position.
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width {
            return false;
        }
        match self.row(y) {
            Some(row) => row[(x / 8) as usize] & (0x80 >> (x % 8)) != 0,
            None => false,
        }
    }

    /// Check if the glyph is empty (all pixels off).
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}
