/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Digest computation over container payloads.

use crate::{error::VerifyError, BUFFER_SIZE};
use md5::{Digest, Md5};
use ring::digest;
use std::io::Read;

pub struct CryptoEngine;

impl CryptoEngine {
    /// SHA-256 of an in-memory buffer, raw 32-byte digest.
    pub fn compute_sha256(data: &[u8]) -> Vec<u8> {
        digest::digest(&digest::SHA256, data).as_ref().to_vec()
    }

    /// Streaming MD5 over a reader, lowercase hex digest.
    pub fn compute_stream_md5_hex<R: Read>(reader: &mut R) -> Result<String, VerifyError> {
        let mut hasher = Md5::new();
        let mut buf = vec![0u8; BUFFER_SIZE];
        loop {
            let count = reader.read(&mut buf)?;
            if count == 0 {
                break;
            }
            hasher.update(&buf[..count]);
        }
        Ok(hex::encode(hasher.finalize()))
    }

    /// Streaming SHA-256 over a reader, raw 32-byte digest.
    pub fn compute_stream_sha256<R: Read>(reader: &mut R) -> Result<Vec<u8>, VerifyError> {
        let mut ctx = digest::Context::new(&digest::SHA256);
        let mut buf = vec![0u8; BUFFER_SIZE];
        loop {
            let count = reader.read(&mut buf)?;
            if count == 0 {
                break;
            }
            ctx.update(&buf[..count]);
        }
        Ok(ctx.finish().as_ref().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_matches_known_vector() {
        let mut src: &[u8] = b"abc";
        let hex = CryptoEngine::compute_stream_md5_hex(&mut src).unwrap();
        assert_eq!(hex, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn streaming_sha256_matches_oneshot() {
        let data = vec![0x5au8; BUFFER_SIZE * 2 + 17];
        let mut src: &[u8] = &data;
        let streamed = CryptoEngine::compute_stream_sha256(&mut src).unwrap();
        assert_eq!(streamed, CryptoEngine::compute_sha256(&data));
    }
}
