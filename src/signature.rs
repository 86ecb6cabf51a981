/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Signature-text decoding and the mask generation function.
//!
//! Signature fields are encoded with a private base64 variant: the alphabet is
//! `a-z A-Z 0-9 + /` (lowercase first, unlike RFC 4648) and digit positions
//! run little-endian, so the character at string index `i` contributes
//! `index * 64^i`. Both quirks match the upstream signer and must not be
//! "corrected" to standard base64.

use crate::{crypto::CryptoEngine, keys::PublicKeyParams};
use num_bigint::BigUint;

const SIGNATURE_ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+/";

/// Length of the recovered mask stream for the PSS-like patch scheme.
pub const MASK_LEN: usize = 223;

/// A character outside the 64-symbol signature alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub ch: char,
    pub index: usize,
}

fn char_index(ch: u8) -> Option<u64> {
    SIGNATURE_ALPHABET.iter().position(|&c| c == ch).map(|i| i as u64)
}

/// Decode a signature string into the RSA-domain integer it represents, then
/// recover `plain = value^e mod n` and render it as natural-width lowercase
/// hex. Callers pad to the scheme's fixed width.
pub fn decode_signature(
    signature: &str,
    key: &PublicKeyParams,
) -> Result<String, DecodeError> {
    let mut value = BigUint::from(0u32);
    // Little-endian digit order: fold from the final character down.
    for (index, ch) in signature.bytes().enumerate().rev() {
        let digit = char_index(ch).ok_or(DecodeError {
            ch: ch as char,
            index,
        })?;
        value = value * 64u32 + digit;
    }
    let plain = value.modpow(&key.exponent, &key.modulus);
    Ok(format!("{:x}", plain))
}

/// Expand a 32-byte digest into the 223-byte mask stream.
///
/// Seven rounds of `SHA256(digest || 00 00 00 || counter)`, concatenated and
/// truncated to [`MASK_LEN`]. The counter is a single byte behind three zero
/// bytes, not the big-endian 4-byte counter of MGF1.
pub fn generate_mask(digest: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(MASK_LEN + 32);
    for counter in 0u8..7 {
        let mut block = Vec::with_capacity(digest.len() + 4);
        block.extend_from_slice(digest);
        block.extend_from_slice(&[0x00, 0x00, 0x00, counter]);
        stream.extend_from_slice(&CryptoEngine::compute_sha256(&block));
    }
    stream.truncate(MASK_LEN);
    stream
}
