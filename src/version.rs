/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Published version record, as announced in the `current.cvd.clamav.net`
//! DNS TXT entry.
//!
//! A colon-delimited line such as `0.102.2:59:25755:1584556141:1:63:49191:331`
//! describes the latest published database versions. This module converts
//! that line to and from a typed record, serializes it as JSON, and persists
//! it in a flat state file. It is a standalone companion to the container
//! core: neither side calls the other.

use crate::error::VerifyError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Default state file name, next to the working directory.
pub const STATE_FILE: &str = "clamav.state";

/// The published-version record carried in the DNS TXT entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub clam_version: String,
    pub main_version: u32,
    pub daily_version: u32,
    pub signature_date: i64,
    pub version_warning: bool,
    pub functionality_level: u32,
    pub safe_browsing_version: u32,
    pub bytecode_version: u32,
}

impl VersionRecord {
    /// Parse the colon-delimited TXT record line.
    pub fn from_txt_record(line: &str) -> Result<Self, VerifyError> {
        let fields: Vec<&str> = line.trim().split(':').collect();
        if fields.len() < 8 {
            return Err(VerifyError::MalformedField(format!(
                "version record has {} colon fields, expected 8",
                fields.len()
            )));
        }
        Ok(Self {
            clam_version: fields[0].to_string(),
            main_version: parse_field(fields[1], "main version")?,
            daily_version: parse_field(fields[2], "daily version")?,
            signature_date: parse_field(fields[3], "signature date")?,
            version_warning: parse_field::<u8>(fields[4], "version warning")? != 0,
            functionality_level: parse_field(fields[5], "functionality level")?,
            safe_browsing_version: parse_field(fields[6], "safe browsing version")?,
            bytecode_version: parse_field(fields[7], "bytecode version")?,
        })
    }

    /// Render the record back into the TXT line layout.
    pub fn to_txt_record(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}:{}:{}",
            self.clam_version,
            self.main_version,
            self.daily_version,
            self.signature_date,
            u8::from(self.version_warning),
            self.functionality_level,
            self.safe_browsing_version,
            self.bytecode_version
        )
    }

    pub fn to_json(&self) -> Result<String, VerifyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, VerifyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Persist the record as a flat JSON state file.
    pub fn save_state(&self, path: &Path) -> Result<(), VerifyError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a previously persisted record.
    pub fn load_state(path: &Path) -> Result<Self, VerifyError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, VerifyError> {
    raw.parse::<T>()
        .map_err(|_| VerifyError::MalformedField(format!("{}: {:?}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0.102.2:59:25755:1584556141:1:63:49191:331";

    #[test]
    fn txt_record_round_trips() {
        let record = VersionRecord::from_txt_record(SAMPLE).unwrap();
        assert_eq!(record.clam_version, "0.102.2");
        assert_eq!(record.main_version, 59);
        assert_eq!(record.daily_version, 25755);
        assert_eq!(record.signature_date, 1584556141);
        assert!(record.version_warning);
        assert_eq!(record.functionality_level, 63);
        assert_eq!(record.safe_browsing_version, 49191);
        assert_eq!(record.bytecode_version, 331);
        assert_eq!(record.to_txt_record(), SAMPLE);
    }

    #[test]
    fn short_record_is_malformed() {
        let err = VersionRecord::from_txt_record("0.102.2:59:25755").unwrap_err();
        assert!(matches!(err, VerifyError::MalformedField(_)));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err =
            VersionRecord::from_txt_record("0.102.2:fifty:25755:1584556141:1:63:49191:331")
                .unwrap_err();
        assert!(matches!(err, VerifyError::MalformedField(_)));
    }
}
