//! mozLz4 container header

use binrw::{BinRead, BinWrite};

use super::error::{MozLz4Error, MozLz4Result};

/// mozLz4 magic bytes (`"mozLz40\0"`)
pub const MOZLZ4_MAGIC: [u8; 8] = *b"mozLz40\0";

/// Size of the fixed header: magic plus the 32-bit size field
pub const HEADER_SIZE: usize = MOZLZ4_MAGIC.len() + 4;

/// mozLz4 container header
///
/// The magic is checked on read and emitted on write; only the declared
/// decompressed size is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little, magic = b"mozLz40\0")]
pub struct MozLz4Header {
    /// Length of the payload once the block is decompressed
    pub decompressed_size: u32,
}

impl MozLz4Header {
    /// Create a header for a payload of `len` bytes
    pub fn for_payload(len: usize) -> MozLz4Result<Self> {
        let decompressed_size = u32::try_from(len).map_err(|_| MozLz4Error::PayloadTooLarge(len))?;
        Ok(Self { decompressed_size })
    }

    /// Declared decompressed size as a buffer length
    pub fn decompressed_len(&self) -> usize {
        self.decompressed_size as usize
    }
}
