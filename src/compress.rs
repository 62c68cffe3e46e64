//! Document-body compression (spec.md §4.D). The teacher's
//! `compression::compress` picks among LZ4/Zstd/Snappy; spec.md is explicit
//! that documents are deflate-compressed, so this module is a single-scheme
//! specialization of that pattern using `flate2`, the deflate crate attested
//! across the retrieval pack.

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::error::{Error, ErrorKind, Result};

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::new(ErrorKind::Compress, e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::new(ErrorKind::Compress, e.to_string()))
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::new(ErrorKind::Compress, e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let text = "hello world, hello world, hello world".as_bytes();
        let compressed = compress(text).unwrap();
        let restored = decompress(&compressed).unwrap();
        assert_eq!(restored, text);
    }

    #[test]
    fn empty_input_round_trips() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn garbage_fails_to_decompress() {
        assert!(decompress(&[0xFF, 0xFF, 0xFF]).is_err());
    }
}
