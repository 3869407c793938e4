//! Raw LZ4 block compression and decompression

use super::error::{MozLz4Error, MozLz4Result};
use tracing::trace;

/// Maximum allowed decompression size (1 GB)
///
/// The size field is attacker-controlled and the decoder allocates the
/// whole output up front, so oversized declarations are refused before any
/// allocation happens. Real add-on manifests are a few hundred kilobytes.
pub const MAX_DECOMPRESSED_SIZE: usize = 1024 * 1024 * 1024;

/// Compress `data` into a single raw LZ4 block (no size prefix, no framing)
pub fn compress_block(data: &[u8]) -> MozLz4Result<Vec<u8>> {
    // The output buffer is sized from the compressor's worst-case bound
    let max_compressed_size = lz4_flex::block::get_maximum_output_size(data.len());
    let mut block = vec![0u8; max_compressed_size];

    let compressed_len = lz4_flex::block::compress_into(data, &mut block)
        .map_err(|e| MozLz4Error::CompressionFailed(format!("LZ4 compression failed: {e}")))?;

    if compressed_len == 0 {
        return Err(MozLz4Error::Incompressible);
    }

    block.truncate(compressed_len);
    trace!("LZ4: {} bytes -> {} bytes", data.len(), block.len());
    Ok(block)
}

/// Decompress a raw LZ4 block that must expand to exactly `expected_size` bytes
pub fn decompress_block(block: &[u8], expected_size: usize) -> MozLz4Result<Vec<u8>> {
    if expected_size > MAX_DECOMPRESSED_SIZE {
        return Err(MozLz4Error::DecompressedSizeTooLarge {
            size: expected_size as u32,
            max: MAX_DECOMPRESSED_SIZE,
        });
    }
    if block.is_empty() {
        return Err(MozLz4Error::EmptyBlock);
    }

    let mut output = vec![0u8; expected_size];
    let written = lz4_flex::block::decompress_into(block, &mut output)
        .map_err(|e| MozLz4Error::DecompressionFailed(format!("LZ4 decompression failed: {e}")))?;

    if written != expected_size {
        return Err(MozLz4Error::SizeMismatch {
            expected: expected_size,
            actual: written,
        });
    }

    trace!("LZ4: {} bytes -> {} bytes", block.len(), written);
    Ok(output)
}
