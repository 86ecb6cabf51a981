/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

//! Configuration parsing and validation for the CvdVerify CLI.

use crate::error::VerifyError;
use clap::ArgMatches;
use std::path::PathBuf;

/// Execution mode for the application.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Print parsed container metadata
    Info,
    /// Verify the container's signature
    Verify,
    /// Extract the raw signed payload
    Extract,
}

/// Application configuration parsed from command-line arguments.
#[derive(Debug)]
pub struct Config {
    /// Path to the container file to process
    pub input_path: PathBuf,
    /// Path where the extracted payload should be written (extract mode)
    pub output_path: Option<PathBuf>,
    /// Execution mode
    pub mode: Mode,
    /// Whether to overwrite an existing output file
    pub overwrite: bool,
    /// Whether to suppress non-error output
    pub quiet: bool,
    /// Verbosity level (0 = off, 1 = verbose, 2+ = debug)
    pub verbosity_level: u8,
}

impl Config {
    /// Parse configuration from command-line argument matches.
    pub fn from_matches(matches: &ArgMatches, ui: &crate::ui::Ui) -> Result<Self, VerifyError> {
        let quiet = matches.get_flag("quiet");
        let verbosity_level = matches.get_count("verbose");

        let (mode, sub_matches) = match matches.subcommand() {
            Some(("info", m)) => (Mode::Info, m),
            Some(("verify", m)) => (Mode::Verify, m),
            Some(("extract", m)) => (Mode::Extract, m),
            _ => {
                return Err(VerifyError::Config(
                    "No subcommand provided. Use 'info', 'verify' or 'extract'.".into(),
                ))
            }
        };

        let input_path = PathBuf::from(
            sub_matches
                .get_one::<String>("input")
                .ok_or_else(|| VerifyError::Config("No input file specified".into()))?,
        );
        if !input_path.exists() {
            return Err(VerifyError::Config(format!(
                "Input file does not exist: {}",
                input_path.display()
            )));
        }
        ui.debug(&format!("Using input file: {}", input_path.display()));

        let output_path = if matches!(mode, Mode::Extract) {
            let out = sub_matches
                .get_one::<String>("output")
                .map(PathBuf::from)
                .unwrap_or_else(|| input_path.with_extension("payload"));
            ui.debug(&format!("Using output file: {}", out.display()));
            Some(out)
        } else {
            None
        };

        let overwrite = matches!(mode, Mode::Extract) && sub_matches.get_flag("overwrite");

        Ok(Self {
            input_path,
            output_path,
            mode,
            overwrite,
            quiet,
            verbosity_level,
        })
    }
}
