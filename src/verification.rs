/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Cryptographic verification of container signatures.
//!
//! Both schemes are stateless single-pass checks over `(header, byte source)`.
//! A missing signature, a character outside the decode alphabet, or any
//! structural anomaly in the recovered padding yields `Ok(false)`: callers
//! get exactly one boolean trust gate, and only genuine I/O failures raise.

use crate::{
    container::{Container, Header},
    crypto::CryptoEngine,
    error::VerifyError,
    keys::PublicKeyParams,
    signature::{decode_signature, generate_mask, MASK_LEN},
    FULL_DATABASE_HEADER_SIZE,
};
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
};

/// Verifies signatures on ClamAV database containers.
pub struct ContainerVerifier;

impl ContainerVerifier {
    /// Check the container's signature against the built-in trust anchor for
    /// its variant. Repeatable; does not mutate the container.
    pub fn verify(container: &Container) -> Result<bool, VerifyError> {
        if container.signature().is_empty() {
            return Ok(false);
        }
        match container.header() {
            Header::FullDatabase { .. } => Self::verify_full_database(container),
            Header::IncrementalPatch { .. } => Self::verify_incremental_patch(container),
            Header::Unknown => Ok(false),
        }
    }

    /// Raw RSA hash recovery: the decoded signature, left-padded to 32 hex
    /// characters, must equal the MD5 of the payload (everything after the
    /// 512-byte header).
    fn verify_full_database(container: &Container) -> Result<bool, VerifyError> {
        let mut file = File::open(container.path())?;
        file.seek(SeekFrom::Start(FULL_DATABASE_HEADER_SIZE))?;
        let payload_md5 = CryptoEngine::compute_stream_md5_hex(&mut file)?;

        let decoded =
            match decode_signature(container.signature(), &PublicKeyParams::full_database()) {
                Ok(hex) => hex,
                Err(_) => return Ok(false),
            };
        if decoded.len() > 32 {
            return Ok(false);
        }
        Ok(format!("{:0>32}", decoded) == payload_md5)
    }

    /// PSS-like verification with the custom mask generation function.
    ///
    /// The digest region runs from the start of the file to the trailer;
    /// unlike the full database scheme, the header is covered too.
    fn verify_incremental_patch(container: &Container) -> Result<bool, VerifyError> {
        let decoded = match decode_signature(
            container.signature(),
            &PublicKeyParams::incremental_patch(),
        ) {
            Ok(hex) => hex,
            Err(_) => return Ok(false),
        };
        if decoded.len() > 512 {
            return Ok(false);
        }
        let recovered = match hex::decode(format!("{:0>512}", decoded)) {
            Ok(bytes) => bytes,
            Err(_) => return Ok(false),
        };

        let mut file = File::open(container.path())?;
        let covered = container.total_size() - container.footer_size();
        let region_digest = CryptoEngine::compute_stream_sha256(&mut file.take(covered))?;

        Ok(check_pss_padding(&recovered, &region_digest))
    }
}

/// Padding recovery on the 256-byte decoded block: unmask the data block,
/// locate the salt behind the first `0x01` delimiter, and rehash it together
/// with the region digest against the embedded digest `H`.
///
/// The block splits into 223 masked bytes, 32 digest bytes, and one unused
/// byte. A missing delimiter or a salt slice running past the data block
/// fails the check.
fn check_pss_padding(recovered: &[u8], region_digest: &[u8]) -> bool {
    let masked_db = &recovered[..MASK_LEN];
    let h = &recovered[MASK_LEN..MASK_LEN + 32];

    let mask = generate_mask(h);
    let mut db: Vec<u8> = mask.iter().zip(masked_db).map(|(m, c)| m ^ c).collect();
    db[0] &= 0x7f;

    let salt_start = match db.iter().position(|&b| b == 0x01) {
        Some(i) => i + 1,
        None => return false,
    };
    if salt_start + 32 > MASK_LEN {
        return false;
    }
    let salt = &db[salt_start..salt_start + 32];

    let mut sealed = Vec::with_capacity(8 + 32 + 32);
    sealed.extend_from_slice(&[0u8; 8]);
    sealed.extend_from_slice(region_digest);
    sealed.extend_from_slice(salt);

    CryptoEngine::compute_sha256(&sealed) == h
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The digest `H` that a signer would embed for this digest and salt.
    fn sealed_digest(region_digest: &[u8], salt: &[u8]) -> Vec<u8> {
        let mut sealed = vec![0u8; 8];
        sealed.extend_from_slice(region_digest);
        sealed.extend_from_slice(salt);
        CryptoEngine::compute_sha256(&sealed)
    }

    /// Assemble the 256-byte decoded block from a chosen data block and `H`.
    fn assemble_recovered(db: &[u8; MASK_LEN], h: &[u8]) -> Vec<u8> {
        let mask = generate_mask(h);
        let mut recovered: Vec<u8> = mask.iter().zip(db).map(|(m, d)| m ^ d).collect();
        recovered.extend_from_slice(h);
        recovered.push(0x00);
        recovered
    }

    #[test]
    fn padding_with_chosen_salt_verifies() {
        let region_digest = CryptoEngine::compute_sha256(b"patch region bytes");
        let salt = [0x5au8; 32];
        let mut db = [0u8; MASK_LEN];
        db[10] = 0x01;
        db[11..43].copy_from_slice(&salt);
        let h = sealed_digest(&region_digest, &salt);

        let recovered = assemble_recovered(&db, &h);
        assert!(check_pss_padding(&recovered, &region_digest));
    }

    #[test]
    fn top_bit_is_cleared_before_the_delimiter_scan() {
        // With the top bit of the first byte set, clearing it exposes the
        // delimiter at index 0 and the salt directly behind it.
        let region_digest = CryptoEngine::compute_sha256(b"patch region bytes");
        let salt = [0xc3u8; 32];
        let mut db = [0u8; MASK_LEN];
        db[0] = 0x81;
        db[1..33].copy_from_slice(&salt);
        let h = sealed_digest(&region_digest, &salt);

        let recovered = assemble_recovered(&db, &h);
        assert!(check_pss_padding(&recovered, &region_digest));
    }

    #[test]
    fn missing_delimiter_fails() {
        // No 0x01 anywhere in the unmasked data block.
        let db = [0u8; MASK_LEN];
        let recovered = assemble_recovered(&db, &[0x42u8; 32]);
        assert!(!check_pss_padding(&recovered, &[0x24u8; 32]));
    }

    #[test]
    fn salt_past_data_block_fails() {
        // Delimiter at index 195 puts the 32-byte salt past index 223; the
        // range check rejects it before any hashing.
        let mut db = [0u8; MASK_LEN];
        db[195] = 0x01;
        let recovered = assemble_recovered(&db, &[0x42u8; 32]);
        assert!(!check_pss_padding(&recovered, &[0x24u8; 32]));
    }

    #[test]
    fn tampered_region_digest_fails() {
        let region_digest = CryptoEngine::compute_sha256(b"patch region bytes");
        let salt = [0x5au8; 32];
        let mut db = [0u8; MASK_LEN];
        db[10] = 0x01;
        db[11..43].copy_from_slice(&salt);
        let h = sealed_digest(&region_digest, &salt);

        let recovered = assemble_recovered(&db, &h);
        let tampered = CryptoEngine::compute_sha256(b"some other region");
        assert!(!check_pss_padding(&recovered, &tampered));
    }
}
