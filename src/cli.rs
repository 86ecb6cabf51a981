/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

use crate::{
    config::{Config, Mode},
    container::{Container, Variant},
    error::VerifyError,
    ui::Ui,
    verification::ContainerVerifier,
    APP_ABOUT, APP_BIN_NAME, APP_NAME, APP_VERSION,
};
use clap::{Arg, ArgAction, Command};
use std::fs::File;

pub fn build_command() -> Command {
    Command::new(APP_NAME)
        .bin_name(APP_BIN_NAME)
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .disable_version_flag(true)
        .help_template("{about-with-newline}{usage-heading} {usage}\n\n{all-args}\n")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("info")
                .about("Print parsed container metadata")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Path to the container file (.cvd or .cdiff)")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify the container's signature against the built-in keys")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Path to the container file to verify")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract the raw signed payload")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Path to the container file")
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .help("Path for the extracted payload (defaults to <input>.payload)")
                        .index(2),
                )
                .arg(
                    Arg::new("overwrite")
                        .short('f')
                        .long("overwrite")
                        .action(ArgAction::SetTrue)
                        .help("Force overwrite if output exists"),
                ),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Set verbosity level (-v for verbose, -vv for debug)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress all output except errors"),
        )
        .arg(
            Arg::new("version_custom")
                .short('V')
                .long("version")
                .action(ArgAction::SetTrue)
                .help("Print version information"),
        )
}

pub fn run() -> Result<(), VerifyError> {
    let matches = build_command().get_matches();

    if matches.get_flag("version_custom") {
        Ui::default().print_version_info();
        return Ok(());
    }

    let verbosity_level = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");
    let ui = Ui::from_verbosity_level(verbosity_level, quiet);

    ui.print_banner();
    run_logic(&matches, &ui)
}

fn run_logic(matches: &clap::ArgMatches, ui: &Ui) -> Result<(), VerifyError> {
    let config = Config::from_matches(matches, ui)?;

    ui.verbose(&format!("Opening container: {}", config.input_path.display()));
    let container = Container::open(&config.input_path)?;
    ui.debug(&format!(
        "Parsed header: variant {:?}, {} bytes total",
        container.variant(),
        container.total_size()
    ));

    match config.mode {
        Mode::Info => {
            ui.print_summary(
                "Container",
                &[
                    ("File", config.input_path.display().to_string()),
                    ("Type", container.file_type().to_string()),
                    ("Version", container.version().to_string()),
                    ("Signatures", container.signatures().to_string()),
                    ("Level", container.functionality_level().to_string()),
                    ("Builder", container.builder().to_string()),
                    ("Date", container.signature_date().to_string()),
                    ("MD5", container.payload_md5().to_string()),
                    ("Header", format!("{} bytes", container.header_size())),
                    ("Footer", format!("{} bytes", container.footer_size())),
                    ("Payload", format!("{} bytes", container.payload_size())),
                ],
            );
        }
        Mode::Verify => {
            if container.variant() == Variant::Unknown {
                return Err(VerifyError::UnrecognizedVariant(
                    container.file_type().to_string(),
                ));
            }
            ui.info(&format!("Verifying: {}", config.input_path.display()));
            if ContainerVerifier::verify(&container)? {
                ui.success("Signature valid. Container authentic.");
            } else {
                return Err(VerifyError::VerificationFailed);
            }
        }
        Mode::Extract => {
            if container.variant() == Variant::Unknown {
                return Err(VerifyError::UnrecognizedVariant(
                    container.file_type().to_string(),
                ));
            }
            let output_path = config
                .output_path
                .as_deref()
                .ok_or_else(|| VerifyError::Config("No output path resolved".into()))?;
            if output_path.exists() && !config.overwrite {
                return Err(VerifyError::Config(format!(
                    "Output exists: {}. Use --overwrite.",
                    output_path.display()
                )));
            }
            ui.info(&format!("Extracting payload to: {}", output_path.display()));
            let mut dest = File::create(output_path)?;
            let written = container.extract_payload(&mut dest)?;
            ui.success(&format!("Extracted {} bytes.", written));
        }
    }

    Ok(())
}
