//! Bounds-checked primitive reads over an immutable save buffer.

use byteorder::ByteOrder;

use crate::error::{Error, Result};

/// A read-only view of a save image. Every read is checked against the view's
/// length, so a reader built over a declared length never looks past it.
#[derive(Clone, Copy, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn region(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(Error::OutOfBounds {
                offset,
                len,
                size: self.data.len(),
            })?;
        Ok(&self.data[offset..end])
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.region(offset, 1)?[0])
    }

    pub fn u16_at<B: ByteOrder>(&self, offset: usize) -> Result<u16> {
        Ok(B::read_u16(self.region(offset, 2)?))
    }

    pub fn u32_at<B: ByteOrder>(&self, offset: usize) -> Result<u32> {
        Ok(B::read_u32(self.region(offset, 4)?))
    }

    /// Like [`ByteReader::u8_at`] but for heuristics, where reading past the
    /// end simply means "no match".
    pub fn peek_u8(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub fn cursor(&self, position: usize) -> ByteCursor<'a> {
        ByteCursor {
            reader: *self,
            position,
        }
    }
}

/// Sequential reads over a [`ByteReader`], in the style of `io::Cursor`.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    reader: ByteReader<'a>,
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn skip(&mut self, len: usize) {
        self.position += len;
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.reader.region(self.position, len)?;
        self.position += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16<B: ByteOrder>(&mut self) -> Result<u16> {
        Ok(B::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32> {
        Ok(B::read_u32(self.read_bytes(4)?))
    }
}
