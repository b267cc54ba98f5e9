//! Bounds-checked reading over a borrowed byte buffer.
//!
//! Every read either succeeds and advances the position, or fails and leaves the
//! position where it was. There is no implicit rollback beyond that: decoders that
//! parse speculatively save [`ByteCursor::position`] and restore it with [`ByteCursor::seek`].

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{PsfError, Result};

/// Returned by [`ByteCursor::read_utf8_scalar`] for an ill-formed encoding.
/// Larger than any Unicode scalar value.
pub const INVALID_CODE_POINT: u32 = 0x7FFF_FFFF;

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { inner: Cursor::new(data) }
    }

    /// Length of the whole underlying buffer.
    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves to an absolute position. Positions past the end are rejected.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.len() {
            return Err(PsfError::ShortRead);
        }
        self.inner.set_position(position as u64);
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.inner.set_position((self.position() + len) as u64);
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        self.inner.read_u8().map_err(|_| PsfError::ShortRead)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        self.inner.read_u16::<LittleEndian>().map_err(|_| PsfError::ShortRead)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        self.inner.read_u32::<LittleEndian>().map_err(|_| PsfError::ShortRead)
    }

    pub fn peek_u8(&self) -> Result<u8> {
        self.data().get(self.position()).copied().ok_or(PsfError::ShortRead)
    }

    /// Borrows the next `len` bytes from the underlying buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let start = self.position();
        let bytes = &self.data()[start..start + len];
        self.inner.set_position((start + len) as u64);
        Ok(bytes)
    }

    /// Consumes `magic` if the next bytes match it.
    ///
    /// A mismatch, including too few bytes left, is [`PsfError::BadMagic`] and consumes nothing.
    pub fn expect_magic(&mut self, magic: &[u8]) -> Result<()> {
        let start = self.position();
        match self.data().get(start..start + magic.len()) {
            Some(bytes) if bytes == magic => {
                self.inner.set_position((start + magic.len()) as u64);
                Ok(())
            }
            _ => Err(PsfError::BadMagic),
        }
    }

    /// Decodes one UTF-8 encoded code point.
    ///
    /// Accepts the historic 5 and 6 byte forms. An invalid lead byte or a missing
    /// continuation byte yields [`INVALID_CODE_POINT`]; the byte that broke the
    /// sequence is left unread. Running out of data mid-sequence is [`PsfError::ShortRead`].
    pub fn read_utf8_scalar(&mut self) -> Result<u32> {
        let start = self.position();
        let result = self.read_utf8_inner();
        if result.is_err() {
            self.inner.set_position(start as u64);
        }
        result
    }

    fn read_utf8_inner(&mut self) -> Result<u32> {
        let lead = self.read_u8()?;
        if lead < 0x80 {
            return Ok(lead as u32);
        }

        let (need, mut result) = if lead & 0xFE == 0xFC {
            (5, (lead & 0x01) as u32)
        } else if lead & 0xFC == 0xF8 {
            (4, (lead & 0x03) as u32)
        } else if lead & 0xF8 == 0xF0 {
            (3, (lead & 0x07) as u32)
        } else if lead & 0xF0 == 0xE0 {
            (2, (lead & 0x0F) as u32)
        } else if lead & 0xE0 == 0xC0 {
            (1, (lead & 0x1F) as u32)
        } else {
            return Ok(INVALID_CODE_POINT);
        };

        for _ in 0..need {
            let c = self.peek_u8()?;
            if c & 0xC0 != 0x80 {
                return Ok(INVALID_CODE_POINT);
            }
            self.skip(1)?;
            result = (result << 6) | (c & 0x3F) as u32;
        }
        Ok(result)
    }

    fn data(&self) -> &'a [u8] {
        *self.inner.get_ref()
    }

    fn ensure(&self, len: usize) -> Result<()> {
        if self.remaining() < len {
            return Err(PsfError::ShortRead);
        }
        Ok(())
    }
}
