/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

use cvdverify::container::{Container, Variant};
use cvdverify::error::VerifyError;
use cvdverify::verification::ContainerVerifier;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FULL_HEADER_LINE: &str = "ClamAV-VDB:16 Apr 2020 07-58 -0400:25784:2267600:63:92baacd59fd26e6bcf03077add78d209:4Jp9JtGJY6nUk8JHDQQpQeBwlfXqskvhXL/vesDNqAeWCmjbudU:raynman:1587038339";

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// A full database container: the header line padded to 512 bytes with
/// spaces, followed by the payload.
fn full_database_bytes(header_line: &str, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header_line.as_bytes().to_vec();
    assert!(bytes.len() <= 512);
    bytes.resize(512, b' ');
    bytes.extend_from_slice(payload);
    bytes
}

/// An incremental patch container: prefix header, payload, then a trailer
/// whose last bytes are `:<signature>` preceded by out-of-alphabet filler.
fn incremental_patch_bytes(prefix: &str, payload: &[u8], signature: &str) -> Vec<u8> {
    let mut bytes = prefix.as_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes.push(b':');
    bytes.extend_from_slice(signature.as_bytes());
    assert!(bytes.len() >= 350, "trailer window must be fully populated");
    bytes
}

#[test]
fn full_database_metadata() {
    let dir = TempDir::new().unwrap();
    let payload = b"signature payload data";
    let path = write_file(&dir, "daily.cvd", &full_database_bytes(FULL_HEADER_LINE, payload));

    let container = Container::open(&path).unwrap();
    assert_eq!(container.variant(), Variant::FullDatabase);
    assert_eq!(container.file_type(), "ClamAV-VDB");
    assert_eq!(container.version(), 25784);
    assert_eq!(container.signatures(), 2267600);
    assert_eq!(container.functionality_level(), 63);
    assert_eq!(container.signature_date(), "16 Apr 2020 07-58 -0400");
    assert_eq!(container.payload_md5(), "92baacd59fd26e6bcf03077add78d209");
    assert_eq!(container.builder(), "raynman");
    assert_eq!(container.created_epoch(), 1587038339);
    assert_eq!(container.header_size(), 512);
    assert_eq!(container.footer_size(), 0);
    assert_eq!(container.payload_size(), payload.len() as u64);
    assert_eq!(container.header_line(), FULL_HEADER_LINE);
}

#[test]
fn full_database_forged_signature_fails_idempotently() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "daily.cvd",
        &full_database_bytes(FULL_HEADER_LINE, b"payload"),
    );
    let container = Container::open(&path).unwrap();
    // The signature text decodes but does not recover the payload MD5.
    assert!(!ContainerVerifier::verify(&container).unwrap());
    assert!(!ContainerVerifier::verify(&container).unwrap());
}

#[test]
fn full_database_empty_signature_fails_without_decode() {
    let dir = TempDir::new().unwrap();
    let header = "ClamAV-VDB:16 Apr 2020 07-58 -0400:25784:2267600:63:92baacd59fd26e6bcf03077add78d209::raynman:1587038339";
    let path = write_file(&dir, "daily.cvd", &full_database_bytes(header, b"payload"));
    let container = Container::open(&path).unwrap();
    assert_eq!(container.signature(), "");
    assert!(!ContainerVerifier::verify(&container).unwrap());
}

#[test]
fn full_database_undecodable_signature_fails() {
    let dir = TempDir::new().unwrap();
    // '=' is outside the 64-symbol alphabet.
    let header = "ClamAV-VDB:16 Apr 2020 07-58 -0400:25784:2267600:63:92baacd59fd26e6bcf03077add78d209:bad=sig:raynman:1587038339";
    let path = write_file(&dir, "daily.cvd", &full_database_bytes(header, b"payload"));
    let container = Container::open(&path).unwrap();
    assert!(!ContainerVerifier::verify(&container).unwrap());
}

#[test]
fn full_database_shorter_than_header_window() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "short.cvd", b"ClamAV-VDB:too short");
    match Container::open(&path) {
        Err(VerifyError::TruncatedHeader { needed: 512, .. }) => {}
        other => panic!("expected TruncatedHeader, got {:?}", other),
    }
}

#[test]
fn full_database_non_numeric_version() {
    let dir = TempDir::new().unwrap();
    let header = "ClamAV-VDB:16 Apr 2020 07-58 -0400:abc:2267600:63:92baacd59fd26e6bcf03077add78d209:sig:raynman:1587038339";
    let path = write_file(&dir, "bad.cvd", &full_database_bytes(header, b""));
    match Container::open(&path) {
        Err(VerifyError::MalformedField(_)) => {}
        other => panic!("expected MalformedField, got {:?}", other),
    }
}

#[test]
fn full_database_extraction_round_trip() {
    let dir = TempDir::new().unwrap();
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let path = write_file(&dir, "daily.cvd", &full_database_bytes(FULL_HEADER_LINE, &payload));
    let container = Container::open(&path).unwrap();

    let mut extracted = Vec::new();
    let written = container.extract_payload(&mut extracted).unwrap();
    assert_eq!(written, payload.len() as u64);
    assert_eq!(extracted, payload);
}

#[test]
fn incremental_patch_metadata() {
    let dir = TempDir::new().unwrap();
    let signature = "Abc123/+xyzQ".repeat(12); // 144 valid alphabet chars
    let payload = vec![0xFFu8; 400]; // out-of-alphabet filler
    let bytes = incremental_patch_bytes("ClamAV-Diff:50:4228877:\n", &payload, &signature);
    let total = bytes.len() as u64;
    let path = write_file(&dir, "patch.cdiff", &bytes);

    let container = Container::open(&path).unwrap();
    assert_eq!(container.variant(), Variant::IncrementalPatch);
    assert_eq!(container.file_type(), "ClamAV-Diff");
    assert_eq!(container.version(), 50);
    assert_eq!(container.signatures(), 4228877);
    // len("ClamAV-Diff") + len("50") + len("4228877") + 3 separators
    assert_eq!(container.header_size(), 11 + 2 + 7 + 3);
    // The colon sits signature.len() + 1 bytes from the end of the file.
    assert_eq!(container.footer_size(), signature.len() as u64 + 1);
    assert_eq!(container.signature(), signature);
    assert_eq!(
        container.header_size() + container.footer_size() + container.payload_size(),
        total
    );
}

#[test]
fn incremental_patch_forged_signature_fails() {
    let dir = TempDir::new().unwrap();
    let signature = "Abc123/+xyzQ".repeat(12);
    let bytes = incremental_patch_bytes("ClamAV-Diff:50:4228877:\n", &[0xFF; 400], &signature);
    let path = write_file(&dir, "patch.cdiff", &bytes);
    let container = Container::open(&path).unwrap();
    // Decodes under the patch key, but the recovered padding never rehashes
    // to the embedded digest.
    assert!(!ContainerVerifier::verify(&container).unwrap());
    assert!(!ContainerVerifier::verify(&container).unwrap());
}

#[test]
fn incremental_patch_corrupted_trailer_loses_signature() {
    let dir = TempDir::new().unwrap();
    let signature = "Abc123/+xyzQ".repeat(12);
    let mut bytes =
        incremental_patch_bytes("ClamAV-Diff:50:4228877:\n", &[0xFF; 400], &signature);
    // A stray byte between the colon and the end of the trailer resets the
    // scan; the earlier find does not survive.
    let corrupt_at = bytes.len() - 40;
    bytes[corrupt_at] = b'\n';
    let path = write_file(&dir, "patch.cdiff", &bytes);

    let container = Container::open(&path).unwrap();
    assert_eq!(container.signature(), "");
    assert_eq!(container.footer_size(), 0);
    assert!(!ContainerVerifier::verify(&container).unwrap());
}

#[test]
fn incremental_patch_shorter_than_trailer_window() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "short.cdiff", b"ClamAV-Diff:50:4228877:\n");
    match Container::open(&path) {
        Err(VerifyError::TruncatedHeader { needed: 350, .. }) => {}
        other => panic!("expected TruncatedHeader, got {:?}", other),
    }
}

#[test]
fn incremental_patch_extraction_stops_before_footer() {
    let dir = TempDir::new().unwrap();
    let signature = "Abc123/+xyzQ".repeat(12);
    let prefix = "ClamAV-Diff:50:4228877:\n";
    let payload = vec![0xFFu8; 400];
    let bytes = incremental_patch_bytes(prefix, &payload, &signature);
    let path = write_file(&dir, "patch.cdiff", &bytes);
    let container = Container::open(&path).unwrap();

    let mut extracted = Vec::new();
    container.extract_payload(&mut extracted).unwrap();
    assert_eq!(extracted.len() as u64, container.payload_size());
    // The payload region starts right after the colon-counted header prefix.
    let start = container.header_size() as usize;
    let end = (container.total_size() - container.footer_size()) as usize;
    assert_eq!(extracted, bytes[start..end]);
}

#[test]
fn unknown_variant_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "random.bin", b"NotAClamFile:with some trailing data");
    let container = Container::open(&path).unwrap();
    assert_eq!(container.variant(), Variant::Unknown);
    assert_eq!(container.file_type(), "unknown");
    assert_eq!(container.version(), 0);
    assert_eq!(container.signatures(), 0);
    assert_eq!(container.builder(), "");
    assert_eq!(container.signature(), "");
    assert_eq!(container.header_size(), 0);
    assert_eq!(container.payload_size(), 0);
    assert_eq!(container.header_line(), "");
    assert!(!ContainerVerifier::verify(&container).unwrap());

    let mut extracted = Vec::new();
    assert_eq!(container.extract_payload(&mut extracted).unwrap(), 0);
    assert!(extracted.is_empty());
}

#[test]
fn source_shorter_than_magic_window() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tiny", b"ClamAV");
    match Container::open(&path) {
        Err(VerifyError::TruncatedHeader { needed: 12, .. }) => {}
        other => panic!("expected TruncatedHeader, got {:?}", other),
    }
}
