/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! # CvdVerify Library
//!
//! Parsing and cryptographic verification of ClamAV signature database
//! containers. Supports the full-database format (`ClamAV-VDB`, `.cvd`) and
//! the incremental patch format (`ClamAV-Diff`, `.cdiff`), and provides the
//! core functionality for the `cvdverify` command-line tool.

pub mod cli;
pub mod config;
pub mod container;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod signature;
pub mod ui;
pub mod verification;
pub mod version;

pub const APP_NAME: &str = "CvdVerify";
pub const APP_BIN_NAME: &str = "cvdverify";
pub const APP_VERSION: &str = "1.0.0";
pub const APP_ABOUT: &str =
    "Parse, inspect and cryptographically verify ClamAV signature database containers.";
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Magic tag of a full database container (`.cvd`).
pub const FULL_DATABASE_MAGIC: &str = "ClamAV-VDB";
/// Magic tag of an incremental patch container (`.cdiff`).
pub const INCREMENTAL_PATCH_MAGIC: &str = "ClamAV-Diff";

/// Fixed header size of a full database container, in bytes.
pub const FULL_DATABASE_HEADER_SIZE: u64 = 512;
/// Fixed trailer window of an incremental patch container, in bytes.
pub const PATCH_TRAILER_SIZE: usize = 350;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
