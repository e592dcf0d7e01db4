//! Byte compression behind a small trait, so the codec can run with real gzip
//! or with a pass-through in tests and on constrained targets.

use crate::error::{Result, TierError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Upper bound on a decompressed share payload.
pub const MAX_DECOMPRESSED_BYTES: u64 = 1 << 20;

pub trait Compressor {
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Fails with [`TierError::Decode`] on input this compressor did not produce.
    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// gzip via `flate2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipCompressor;

impl Compressor for GzipCompressor {
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(bytes)?;
        Ok(enc.finish()?)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        GzDecoder::new(bytes)
            .take(MAX_DECOMPRESSED_BYTES + 1)
            .read_to_end(&mut out)
            .map_err(|e| TierError::Decode(format!("decompression failed: {}", e)))?;
        if out.len() as u64 > MAX_DECOMPRESSED_BYTES {
            return Err(TierError::Decode(format!(
                "decompressed payload exceeds {} bytes",
                MAX_DECOMPRESSED_BYTES
            )));
        }
        Ok(out)
    }
}

/// Passes bytes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompressor;

impl Compressor for NoopCompressor {
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_round_trip() {
        let gz = GzipCompressor;
        let text = br#"{"m":"items","i":{"S":["a","b"]}}"#;
        let packed = gz.compress(text).unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
        assert_eq!(gz.decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_gzip_caps_decompressed_size() {
        let gz = GzipCompressor;
        let limit = MAX_DECOMPRESSED_BYTES as usize;

        let at_limit = gz.compress(&vec![b'a'; limit]).unwrap();
        assert_eq!(gz.decompress(&at_limit).unwrap().len(), limit);

        let bomb = gz.compress(&vec![b'a'; limit + 1]).unwrap();
        assert!(bomb.len() < 8 * 1024);
        let err = gz.decompress(&bomb).unwrap_err();
        assert!(matches!(err, TierError::Decode(_)));
    }

    #[test]
    fn test_gzip_rejects_garbage() {
        let err = GzipCompressor.decompress(b"definitely not gzip").unwrap_err();
        assert!(matches!(err, TierError::Decode(_)));
    }
}
