/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

use crate::{APP_NAME, APP_VERSION};
use colored::*;

pub struct Ui {
    pub verbose: bool,
    pub debug: bool,
    silent: bool,
    colors: bool,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(false, false, false, true)
    }
}

impl Ui {
    pub fn new(v: bool, d: bool, s: bool, c: bool) -> Self {
        Self {
            verbose: v,
            debug: d,
            silent: s,
            colors: c,
        }
    }

    pub fn from_verbosity_level(level: u8, s: bool) -> Self {
        Self::new(level >= 1, level >= 2, s, true)
    }

    fn supports_color(&self) -> bool {
        self.colors && std::env::var("NO_COLOR").is_err()
    }

    fn paint(&self, icon: &str, msg: &str, color: &str, is_error: bool, is_dim: bool) {
        if self.silent && !is_error {
            return;
        }
        if self.supports_color() {
            let ic = match color {
                "31" => icon.red().bold().to_string(),
                "32" => icon.green().bold().to_string(),
                "33" => icon.yellow().bold().to_string(),
                "34" => icon.blue().bold().to_string(),
                _ => icon.bold().to_string(),
            };
            if is_dim {
                eprintln!("{} {}", ic.dimmed(), msg.dimmed());
            } else {
                eprintln!("{} {}", ic, msg.normal());
            }
        } else {
            eprintln!("{} {}", icon, msg);
        }
    }

    pub fn print_banner(&self) {
        if self.silent || !self.verbose {
            return;
        }
        let title = format!(" {} v{} ", APP_NAME, APP_VERSION);
        let border = "-".repeat(title.len());
        if self.supports_color() {
            let tb = format!("+-{}-+", border).magenta().bold();
            let mid = format!("| {} |", title.cyan().bold());
            eprintln!("{}\n{}\n{}", tb, mid, tb);
        } else {
            eprintln!("+-{}-+\n| {} |\n+-{}-+", border, title, border);
        }
    }

    pub fn print_version_info(&self) {
        println!("{} v{}", APP_NAME, APP_VERSION);
        println!("Repository:  https://github.com/cvdverify/cvdverify");
        println!("License:     MIT");
    }

    pub fn print_summary(&self, title: &str, fields: &[(&str, String)]) {
        if self.silent {
            return;
        }
        if self.supports_color() {
            eprintln!("{}", format!("{}:", title).green().bold());
        } else {
            eprintln!("{}:", title);
        }
        let key_width = self.key_column_width(fields);
        for (key, val) in fields {
            if self.supports_color() {
                eprintln!("  {:<width$} {}", key.cyan().bold(), val.green(), width = key_width);
            } else {
                eprintln!("  {:<width$} {}", key, val, width = key_width);
            }
        }
    }

    fn key_column_width(&self, fields: &[(&str, String)]) -> usize {
        let tw = self.term_width();
        if tw < 60 {
            2
        } else {
            fields.iter().map(|(k, _)| k.len()).max().unwrap_or(8) + 1
        }
    }

    fn term_width(&self) -> usize {
        std::env::var("COLUMNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
            .unwrap_or(80)
    }

    pub fn info(&self, msg: &str) {
        if self.verbose {
            self.paint("[i]", msg, "34", false, false);
        }
    }
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            self.paint("[v]", msg, "2", false, true);
        }
    }
    pub fn debug(&self, msg: &str) {
        if self.debug {
            self.paint("[dbg]", msg, "2", false, true);
        }
    }
    pub fn success(&self, msg: &str) {
        if !self.silent {
            self.paint("[+]", msg, "32", false, false);
        }
    }
    pub fn warn(&self, msg: &str) {
        if !self.silent {
            self.paint("[!]", msg, "33", true, false);
        }
    }
    pub fn error(&self, msg: &str) {
        self.paint("[x]", msg, "31", true, false);
    }
}
