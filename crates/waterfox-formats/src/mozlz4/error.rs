//! mozLz4 error types

use thiserror::Error;

/// mozLz4-specific error type
#[derive(Debug, Error)]
pub enum MozLz4Error {
    /// Invalid mozLz4 magic bytes
    #[error("bad header: expected mozLz4 magic [6D 6F 7A 4C 7A 34 30 00], got {0}")]
    InvalidMagic(String),

    /// File ends before the 12-byte header is complete
    #[error("bad header: truncated container header")]
    TruncatedHeader,

    /// Declared decompressed size exceeds the decoder limit
    #[error("decompression failed: declared size {size} exceeds limit of {max} bytes")]
    DecompressedSizeTooLarge {
        /// Size from the container header
        size: u32,
        /// Maximum accepted size
        max: usize,
    },

    /// Container has a header but no compressed block
    #[error("decompression failed: container has no compressed block")]
    EmptyBlock,

    /// LZ4 block could not be decoded into the declared size
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Block decoded cleanly but produced fewer bytes than declared
    #[error("decompression failed: header declares {expected} bytes, block holds {actual}")]
    SizeMismatch {
        /// Size from the container header
        expected: usize,
        /// Bytes actually produced by the block
        actual: usize,
    },

    /// Compressor produced no output
    #[error("data incompressible")]
    Incompressible,

    /// Payload length does not fit the 32-bit size field
    #[error("payload of {0} bytes does not fit a mozLz4 container")]
    PayloadTooLarge(usize),

    /// Compressor reported an error
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(binrw::Error),
}

impl MozLz4Error {
    /// Whether this error means the container itself is malformed
    ///
    /// Covers bad magic, truncated or oversized headers and blocks that do
    /// not decode to the declared size.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_)
                | Self::TruncatedHeader
                | Self::DecompressedSizeTooLarge { .. }
                | Self::EmptyBlock
                | Self::DecompressionFailed(_)
                | Self::SizeMismatch { .. }
        )
    }

    /// Whether this error was raised while encoding a payload
    pub fn is_compression_error(&self) -> bool {
        matches!(
            self,
            Self::Incompressible | Self::PayloadTooLarge(_) | Self::CompressionFailed(_)
        )
    }
}

impl From<binrw::Error> for MozLz4Error {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::BadMagic { found, .. } => Self::InvalidMagic(format!("{found:02X?}")),
            binrw::Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::TruncatedHeader
            }
            binrw::Error::Io(e) => Self::Io(e),
            // Derived readers attach field context; classify the root cause
            binrw::Error::Backtrace(backtrace) => Self::from(*backtrace.error),
            other => Self::BinRw(other),
        }
    }
}

/// Result type for mozLz4 operations
pub type MozLz4Result<T> = Result<T, MozLz4Error>;
