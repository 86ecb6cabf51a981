/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Container formats and header parsing.
//!
//! A [`Container`] wraps a signed ClamAV database file. The header is parsed
//! once, eagerly, on [`Container::open`] and is immutable afterwards; all
//! metadata accessors are cheap projections that return defined defaults
//! (empty string, zero) when the variant does not carry the field.

use crate::{
    error::VerifyError, FULL_DATABASE_HEADER_SIZE, FULL_DATABASE_MAGIC, INCREMENTAL_PATCH_MAGIC,
    PATCH_TRAILER_SIZE,
};
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

/// Container variant, classified from the magic prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `ClamAV-VDB`, a full signature database (`.cvd`)
    FullDatabase,
    /// `ClamAV-Diff`, an incremental patch (`.cdiff`)
    IncrementalPatch,
    /// Magic prefix not recognized
    Unknown,
}

/// Parsed, variant-dependent header fields.
#[derive(Debug, Clone)]
pub enum Header {
    FullDatabase {
        signature_date: String,
        version: u32,
        signatures: u64,
        functionality_level: u32,
        payload_md5: String,
        signature: String,
        builder: String,
        created_epoch: i64,
        payload_size: u64,
    },
    IncrementalPatch {
        version: u32,
        signatures: u64,
        /// Empty when the trailer scan found no qualifying colon.
        signature: String,
        header_size: u64,
        footer_size: u64,
        payload_size: u64,
    },
    Unknown,
}

/// A signed ClamAV container file with its eagerly parsed header.
#[derive(Debug)]
pub struct Container {
    path: PathBuf,
    total_size: u64,
    variant: Variant,
    header: Header,
}

impl Container {
    /// Open a container file and parse its header.
    ///
    /// Unrecognized magic prefixes still produce a container (with
    /// [`Variant::Unknown`] and defaulted metadata); structural defects in a
    /// recognized header are typed errors.
    pub fn open(path: &Path) -> Result<Self, VerifyError> {
        let mut file = File::open(path)?;
        let total_size = file.metadata()?.len();
        let variant = read_variant(&mut file, total_size)?;
        let header = match variant {
            Variant::FullDatabase => parse_full_database(&mut file, total_size)?,
            Variant::IncrementalPatch => parse_incremental_patch(&mut file, total_size)?,
            Variant::Unknown => Header::Unknown,
        };
        Ok(Self {
            path: path.to_path_buf(),
            total_size,
            variant,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Magic tag of the file, `"unknown"` for unrecognized variants.
    pub fn file_type(&self) -> &str {
        match self.variant {
            Variant::FullDatabase => FULL_DATABASE_MAGIC,
            Variant::IncrementalPatch => INCREMENTAL_PATCH_MAGIC,
            Variant::Unknown => "unknown",
        }
    }

    pub fn header_size(&self) -> u64 {
        match &self.header {
            Header::FullDatabase { .. } => FULL_DATABASE_HEADER_SIZE,
            Header::IncrementalPatch { header_size, .. } => *header_size,
            Header::Unknown => 0,
        }
    }

    pub fn footer_size(&self) -> u64 {
        match &self.header {
            Header::IncrementalPatch { footer_size, .. } => *footer_size,
            _ => 0,
        }
    }

    pub fn payload_size(&self) -> u64 {
        match &self.header {
            Header::FullDatabase { payload_size, .. }
            | Header::IncrementalPatch { payload_size, .. } => *payload_size,
            Header::Unknown => 0,
        }
    }

    pub fn version(&self) -> u32 {
        match &self.header {
            Header::FullDatabase { version, .. } | Header::IncrementalPatch { version, .. } => {
                *version
            }
            Header::Unknown => 0,
        }
    }

    pub fn signatures(&self) -> u64 {
        match &self.header {
            Header::FullDatabase { signatures, .. }
            | Header::IncrementalPatch { signatures, .. } => *signatures,
            Header::Unknown => 0,
        }
    }

    /// Functionality level; full database containers only, zero otherwise.
    pub fn functionality_level(&self) -> u32 {
        match &self.header {
            Header::FullDatabase {
                functionality_level,
                ..
            } => *functionality_level,
            _ => 0,
        }
    }

    pub fn signature_date(&self) -> &str {
        match &self.header {
            Header::FullDatabase { signature_date, .. } => signature_date,
            _ => "",
        }
    }

    /// Declared MD5 of the payload; full database containers only.
    pub fn payload_md5(&self) -> &str {
        match &self.header {
            Header::FullDatabase { payload_md5, .. } => payload_md5,
            _ => "",
        }
    }

    /// The custom-base64 encoded signature text, empty when absent.
    pub fn signature(&self) -> &str {
        match &self.header {
            Header::FullDatabase { signature, .. }
            | Header::IncrementalPatch { signature, .. } => signature,
            Header::Unknown => "",
        }
    }

    pub fn builder(&self) -> &str {
        match &self.header {
            Header::FullDatabase { builder, .. } => builder,
            _ => "",
        }
    }

    pub fn created_epoch(&self) -> i64 {
        match &self.header {
            Header::FullDatabase { created_epoch, .. } => *created_epoch,
            _ => 0,
        }
    }

    /// Reconstruct the logical header line of a full database container from
    /// its parsed fields. Empty for other variants.
    pub fn header_line(&self) -> String {
        match &self.header {
            Header::FullDatabase {
                signature_date,
                version,
                signatures,
                functionality_level,
                payload_md5,
                signature,
                builder,
                created_epoch,
                ..
            } => format!(
                "{}:{}:{}:{}:{}:{}:{}:{}:{}",
                FULL_DATABASE_MAGIC,
                signature_date,
                version,
                signatures,
                functionality_level,
                payload_md5,
                signature,
                builder,
                created_epoch
            ),
            _ => String::new(),
        }
    }

    /// Stream the raw signed payload into `dest`.
    ///
    /// Skips the header; for incremental patches the copy stops short of the
    /// trailer. Unknown variants copy nothing. Returns the number of bytes
    /// written.
    pub fn extract_payload<W: Write>(&self, dest: &mut W) -> Result<u64, VerifyError> {
        let mut file = File::open(&self.path)?;
        match &self.header {
            Header::FullDatabase { .. } => {
                file.seek(SeekFrom::Start(FULL_DATABASE_HEADER_SIZE))?;
                Ok(io::copy(&mut file, dest)?)
            }
            Header::IncrementalPatch {
                header_size,
                payload_size,
                ..
            } => {
                file.seek(SeekFrom::Start(*header_size))?;
                Ok(io::copy(&mut file.take(*payload_size), dest)?)
            }
            Header::Unknown => Ok(0),
        }
    }
}

/// Read the 12-byte magic window and classify the variant.
fn read_variant(file: &mut File, total_size: u64) -> Result<Variant, VerifyError> {
    if total_size < 12 {
        return Err(VerifyError::TruncatedHeader {
            needed: 12,
            actual: total_size,
        });
    }
    let mut magic = [0u8; 12];
    file.read_exact(&mut magic)?;
    let tag = magic.split(|&b| b == b':').next().unwrap_or(&magic);
    let tag = String::from_utf8_lossy(tag);
    Ok(match tag.as_ref() {
        FULL_DATABASE_MAGIC => Variant::FullDatabase,
        INCREMENTAL_PATCH_MAGIC => Variant::IncrementalPatch,
        _ => Variant::Unknown,
    })
}

fn field_str(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn parse_int<T: std::str::FromStr>(raw: &[u8], name: &str) -> Result<T, VerifyError> {
    field_str(raw)
        .parse::<T>()
        .map_err(|_| VerifyError::MalformedField(format!("{}: {:?}", name, field_str(raw))))
}

/// Full database layout: one 512-byte header, split into nine colon fields.
/// The signature field may itself contain anything from the custom base64
/// alphabet except a colon, so the split is bounded at nine parts.
fn parse_full_database(file: &mut File, total_size: u64) -> Result<Header, VerifyError> {
    if total_size < FULL_DATABASE_HEADER_SIZE {
        return Err(VerifyError::TruncatedHeader {
            needed: FULL_DATABASE_HEADER_SIZE,
            actual: total_size,
        });
    }
    let mut raw = [0u8; FULL_DATABASE_HEADER_SIZE as usize];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut raw)?;

    let fields: Vec<&[u8]> = raw.splitn(9, |&b| b == b':').collect();
    if fields.len() < 9 {
        return Err(VerifyError::MalformedField(format!(
            "full database header has {} colon fields, expected 9",
            fields.len()
        )));
    }

    Ok(Header::FullDatabase {
        signature_date: field_str(fields[1]),
        version: parse_int(fields[2], "version")?,
        signatures: parse_int(fields[3], "signatures")?,
        functionality_level: parse_int(fields[4], "functionality level")?,
        payload_md5: field_str(fields[5]),
        signature: field_str(fields[6]),
        builder: field_str(fields[7]),
        // The last field fills the rest of the 512-byte window; padding is
        // stripped before the integer parse.
        created_epoch: parse_int(field_str(fields[8]).trim_end().as_bytes(), "created epoch")?,
        payload_size: total_size - FULL_DATABASE_HEADER_SIZE,
    })
}

/// Incremental patch layout: a short colon-delimited prefix whose field
/// lengths determine the header size, plus a fixed 350-byte trailer scanned
/// for the colon that introduces the signature.
fn parse_incremental_patch(file: &mut File, total_size: u64) -> Result<Header, VerifyError> {
    if total_size < PATCH_TRAILER_SIZE as u64 {
        return Err(VerifyError::TruncatedHeader {
            needed: PATCH_TRAILER_SIZE as u64,
            actual: total_size,
        });
    }
    let mut prefix = [0u8; 40];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut prefix)?;

    let fields: Vec<&[u8]> = prefix.splitn(4, |&b| b == b':').collect();
    if fields.len() < 3 {
        return Err(VerifyError::MalformedField(
            "incremental patch header has fewer than 3 colon fields".into(),
        ));
    }
    let version: u32 = parse_int(fields[1], "version")?;
    let signatures: u64 = parse_int(fields[2], "signatures")?;
    let header_size = (fields[0].len() + fields[1].len() + fields[2].len() + 3) as u64;

    let mut trailer = [0u8; PATCH_TRAILER_SIZE];
    file.seek(SeekFrom::End(-(PATCH_TRAILER_SIZE as i64)))?;
    file.read_exact(&mut trailer)?;

    let (footer_size, signature) = match scan_trailer(&trailer) {
        Some(position) => (
            (PATCH_TRAILER_SIZE - position) as u64,
            field_str(&trailer[position + 1..]),
        ),
        None => (0, String::new()),
    };

    let payload_size = total_size
        .checked_sub(header_size + footer_size)
        .ok_or_else(|| {
            VerifyError::MalformedField(format!(
                "header ({}) + footer ({}) exceed file size ({})",
                header_size, footer_size, total_size
            ))
        })?;

    Ok(Header::IncrementalPatch {
        version,
        signatures,
        signature,
        header_size,
        footer_size,
        payload_size,
    })
}

/// Locate the colon that introduces the trailing signature.
///
/// Walks the trailer window in order, tracking the most recent colon and
/// dropping it again whenever a byte outside the signature alphabet shows up;
/// a later stray byte invalidates an earlier find even though the walk
/// continues. Only a colon followed by an uninterrupted run of alphabet bytes
/// survives to the end. The final trailer byte is deliberately left out of
/// the walk, matching the upstream layout.
fn scan_trailer(trailer: &[u8; PATCH_TRAILER_SIZE]) -> Option<usize> {
    let mut position = None;
    for (i, &byte) in trailer.iter().enumerate().take(PATCH_TRAILER_SIZE - 1) {
        if !is_signature_byte(byte) {
            position = None;
        }
        if byte == b':' {
            position = Some(i);
        }
    }
    position
}

/// Signature-alphabet valid bytes: `A-Z`, `a-z`, `0-9`, `/`, `:`, `+`.
fn is_signature_byte(byte: u8) -> bool {
    matches!(byte, b'A'..=b'Z' | b'a'..=b'z' | b'/'..=b':' | b'+')
}
