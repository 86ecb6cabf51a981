/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Error types for container parsing and verification.
//!
//! Structural header errors (`TruncatedHeader`, `MalformedField`) surface to
//! the caller as typed errors: a file that cannot describe itself cannot be
//! extracted or verified. Missing or undecodable signatures never raise; they
//! collapse into a `false` verification result inside [`crate::verification`].

use std::{fmt, io};

/// Comprehensive error type for all container operations.
#[derive(Debug)]
pub enum VerifyError {
    /// I/O errors on the source or destination file
    Io(io::Error),
    /// Magic prefix did not match any known container variant
    UnrecognizedVariant(String),
    /// Source shorter than the required header or trailer window
    TruncatedHeader { needed: u64, actual: u64 },
    /// Unparseable colon layout or non-numeric value in an integer field
    MalformedField(String),
    /// JSON (de)serialization errors on the version state file
    Json(serde_json::Error),
    /// Configuration or CLI usage errors
    Config(String),
    /// Signature decode succeeded but the cryptographic check did not match
    VerificationFailed,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Io(e) => write!(f, "I/O Error: {}", e),
            VerifyError::UnrecognizedVariant(tag) => {
                write!(f, "Unrecognized container variant: {:?}", tag)
            }
            VerifyError::TruncatedHeader { needed, actual } => write!(
                f,
                "Truncated header: need {} bytes, file has {}",
                needed, actual
            ),
            VerifyError::MalformedField(s) => write!(f, "Malformed header field: {}", s),
            VerifyError::Json(e) => write!(f, "JSON Error: {}", e),
            VerifyError::Config(s) => write!(f, "Configuration Error: {}", s),
            VerifyError::VerificationFailed => write!(f, "Signature verification failed"),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<io::Error> for VerifyError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for VerifyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
