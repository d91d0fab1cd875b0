//! Small helper traits shared between [`crate::read`] and [`crate::write`].
//!
//! Thin convenience wrappers around `byteorder` so the tag parsers read
//! like a transcription of the SWF19 field tables rather than a thicket of
//! `ReadBytesExt` turbofish calls.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Normalizes `UnexpectedEof` into [`Error::Truncated`]: a byte source
/// simply running out of data mid-field is its own condition, distinct
/// from other I/O failures.
fn normalize_eof(error: io::Error) -> Error {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        Error::Truncated
    } else {
        Error::Io(error)
    }
}

/// Little-endian fixed-width reads, with `UnexpectedEof` normalized to
/// [`Error::Truncated`].
pub trait ReadSwfExt: Read {
    fn read_u8(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self).map_err(normalize_eof)
    }

    fn read_i8(&mut self) -> Result<i8> {
        ReadBytesExt::read_i8(self).map_err(normalize_eof)
    }

    fn read_u16(&mut self) -> Result<u16> {
        ReadBytesExt::read_u16::<LittleEndian>(self).map_err(normalize_eof)
    }

    fn read_i16(&mut self) -> Result<i16> {
        ReadBytesExt::read_i16::<LittleEndian>(self).map_err(normalize_eof)
    }

    fn read_u32(&mut self) -> Result<u32> {
        ReadBytesExt::read_u32::<LittleEndian>(self).map_err(normalize_eof)
    }

    fn read_u64(&mut self) -> Result<u64> {
        ReadBytesExt::read_u64::<LittleEndian>(self).map_err(normalize_eof)
    }

    /// Reads exactly `len` bytes into an owned buffer.
    fn read_slice(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf).map_err(normalize_eof)?;
        Ok(buf)
    }

    /// Reads the 3-byte SWF signature.
    fn read_signature(&mut self) -> Result<[u8; 3]> {
        let mut buf = [0u8; 3];
        self.read_exact(&mut buf).map_err(normalize_eof)?;
        Ok(buf)
    }
}

impl<R: Read + ?Sized> ReadSwfExt for R {}

/// Little-endian fixed-width writes.
pub trait WriteSwfExt: Write {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value).map_err(Error::Io)
    }

    fn write_i8(&mut self, value: i8) -> Result<()> {
        WriteBytesExt::write_i8(self, value).map_err(Error::Io)
    }

    fn write_u16(&mut self, value: u16) -> Result<()> {
        WriteBytesExt::write_u16::<LittleEndian>(self, value).map_err(Error::Io)
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        WriteBytesExt::write_i16::<LittleEndian>(self, value).map_err(Error::Io)
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        WriteBytesExt::write_u32::<LittleEndian>(self, value).map_err(Error::Io)
    }

    fn write_u64(&mut self, value: u64) -> Result<()> {
        WriteBytesExt::write_u64::<LittleEndian>(self, value).map_err(Error::Io)
    }
}

impl<W: Write + ?Sized> WriteSwfExt for W {}
