//! mozLz4 container format implementation
//!
//! mozLz4 is the legacy compressed container Firefox-based browsers use for
//! session and add-on state (`addonStartup.json.lz4`, `search.json.mozlz4`).
//!
//! ```text
//! +----------------------+------------------+---------------------+
//! | magic "mozLz40\0"    | size (u32, LE)   | one raw LZ4 block   |
//! | 8 bytes              | 4 bytes          | rest of the file    |
//! +----------------------+------------------+---------------------+
//! ```
//!
//! There is no framing, no checksum and no support for multiple blocks; the
//! size field always describes the single block that follows it.
//!
//! # Features
//!
//! - Parser and builder for the container
//! - Header rejection on bad magic or truncated size field
//! - Exact-size decompression (short or long blocks are rejected)
//! - Atomic file replacement after a successful encode

mod compression;
mod error;
mod header;

pub use compression::{MAX_DECOMPRESSED_SIZE, compress_block, decompress_block};
pub use error::{MozLz4Error, MozLz4Result};
pub use header::{HEADER_SIZE, MOZLZ4_MAGIC, MozLz4Header};

use binrw::io::{Read, Seek, Write};
use binrw::{BinRead, BinResult, BinWrite};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

/// Complete mozLz4 container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MozLz4File {
    /// Container header
    pub header: MozLz4Header,
    /// Compressed LZ4 block
    pub block: Vec<u8>,
}

impl BinRead for MozLz4File {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let header = MozLz4Header::read_options(reader, endian, ())?;

        // The block runs to the end of the input
        let mut block = Vec::new();
        reader.read_to_end(&mut block)?;

        Ok(Self { header, block })
    }
}

impl BinWrite for MozLz4File {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        self.header.write_options(writer, endian, ())?;
        writer.write_all(&self.block)?;
        Ok(())
    }
}

impl MozLz4File {
    /// Compress `payload` into a new container
    pub fn compress(payload: &[u8]) -> MozLz4Result<Self> {
        let header = MozLz4Header::for_payload(payload.len())?;
        let block = compress_block(payload)?;
        Ok(Self { header, block })
    }

    /// Read a container from `reader`, consuming it to the end
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> MozLz4Result<Self> {
        Ok(Self::read_options(reader, binrw::Endian::Little, ())?)
    }

    /// Decompress the block, enforcing the declared size
    pub fn decompress(&self) -> MozLz4Result<Vec<u8>> {
        decompress_block(&self.block, self.header.decompressed_len())
    }

    /// Serialize the container
    pub fn to_bytes(&self) -> MozLz4Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(HEADER_SIZE + self.block.len()));
        self.write_options(&mut cursor, binrw::Endian::Little, ())?;
        Ok(cursor.into_inner())
    }
}

/// Decode a complete container held in memory
pub fn decode(data: &[u8]) -> MozLz4Result<Vec<u8>> {
    MozLz4File::read_from(&mut Cursor::new(data))?.decompress()
}

/// Encode `payload` into a complete container
pub fn encode(payload: &[u8]) -> MozLz4Result<Vec<u8>> {
    MozLz4File::compress(payload)?.to_bytes()
}

/// Open and decode the container at `path`
pub fn read_file(path: impl AsRef<Path>) -> MozLz4Result<Vec<u8>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let container = MozLz4File::read_from(&mut reader)?;

    debug!(
        "Read mozLz4 container {}: {} compressed bytes, {} declared",
        path.display(),
        container.block.len(),
        container.header.decompressed_size
    );

    container.decompress()
}

/// Encode `payload` and replace the container at `path`
///
/// The payload is fully encoded before anything touches the filesystem, and
/// the target is replaced by renaming a temporary file from the same
/// directory, so a failure never leaves a half-written container behind.
pub fn write_file(path: impl AsRef<Path>, payload: &[u8]) -> MozLz4Result<()> {
    let path = path.as_ref();
    let encoded = encode(payload)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&encoded)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| MozLz4Error::Io(e.error))?;

    debug!(
        "Wrote mozLz4 container {}: {} bytes -> {} bytes",
        path.display(),
        payload.len(),
        encoded.len()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_container_round_trip, profile_manifest, random_payload};

    #[test]
    fn test_container_layout() {
        let payload = br#"{"schema":1}"#;
        let encoded = encode(payload).unwrap();

        assert_eq!(&encoded[..8], b"mozLz40\0");
        assert_eq!(&encoded[8..12], &(payload.len() as u32).to_le_bytes());
        assert!(encoded.len() > HEADER_SIZE);
        assert_eq!(decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_round_trip_entropy_levels() {
        let empty: Vec<u8> = Vec::new();
        let zeros = vec![0u8; 1024 * 1024];
        let random = random_payload(1024 * 1024, 7);

        for payload in [empty, zeros, random] {
            assert_container_round_trip(&payload);
        }
    }

    #[test]
    fn test_ten_megabyte_round_trip() {
        let mut payload = random_payload(5 * 1024 * 1024, 42);
        payload.extend(std::iter::repeat_n(b'x', 5 * 1024 * 1024));

        let encoded = encode(&payload).unwrap();
        assert!(encoded.len() < payload.len());
        assert_eq!(decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_incompressible_payload_still_has_block() {
        let payload = random_payload(4096, 3);
        let container = MozLz4File::compress(&payload).unwrap();
        assert!(!container.block.is_empty());
        assert_eq!(container.decompress().unwrap(), payload);
    }

    #[test]
    fn test_manifest_container_round_trip() {
        let payload = profile_manifest("/portable/data/profile/default/extensions", 200);
        assert_container_round_trip(&payload);
        assert!(encode(&payload).unwrap().len() < payload.len());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut encoded = encode(b"{}").unwrap();
        encoded[0] = b'M';

        let err = decode(&encoded).unwrap_err();
        assert!(matches!(err, MozLz4Error::InvalidMagic(_)), "actual error: {err:?}");
        assert!(err.is_format_error());
    }

    #[test]
    fn test_truncated_header_rejected() {
        for len in 0..HEADER_SIZE {
            let err = decode(&encode(b"{}").unwrap()[..len]).unwrap_err();
            assert!(err.is_format_error(), "len {len}: {err:?}");
        }
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let payload = b"{\"app-global\":{}}".repeat(16);
        let mut container = MozLz4File::compress(&payload).unwrap();

        container.header.decompressed_size += 1;
        let err = container.decompress().unwrap_err();
        assert!(err.is_format_error(), "actual error: {err:?}");

        container.header.decompressed_size -= 2;
        let err = container.decompress().unwrap_err();
        assert!(err.is_format_error(), "actual error: {err:?}");
    }

    #[test]
    fn test_header_only_container_rejected() {
        let mut data = MOZLZ4_MAGIC.to_vec();
        data.extend_from_slice(&0u32.to_le_bytes());
        assert!(matches!(decode(&data), Err(MozLz4Error::EmptyBlock)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addonStartup.json.lz4");

        write_file(&path, b"{\"app-profile\":{}}").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"{\"app-profile\":{}}");

        // Overwrite in place
        write_file(&path, b"{}").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(dir.path().join("missing.lz4")).unwrap_err();
        assert!(matches!(err, MozLz4Error::Io(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any payload survives encode then decode
            #[test]
            fn container_round_trip_always_works(
                payload in prop::collection::vec(any::<u8>(), 0..=20_000)
            ) {
                let encoded = encode(&payload).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let decoded = decode(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(decoded, payload);
            }

            /// Any header whose first 8 bytes differ from the magic is rejected
            #[test]
            fn invalid_magic_always_rejected(
                magic in prop::array::uniform8(any::<u8>()).prop_filter("Not mozLz4 magic", |m| m != &MOZLZ4_MAGIC),
                rest in prop::collection::vec(any::<u8>(), 0..256)
            ) {
                let mut data = magic.to_vec();
                data.extend_from_slice(&rest);

                let err = decode(&data).expect_err("bad magic must fail");
                prop_assert!(err.is_format_error());
            }
        }
    }
}
