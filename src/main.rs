/*
 * CvdVerify v1.0.0
 * Copyright (c) 2026 The cvdverify developers.
 * Licensed under the MIT License.
 */

use cvdverify::cli;
use cvdverify::ui::Ui;

fn main() {
    if let Err(e) = cli::run() {
        let ui = Ui::default();
        ui.error(&format!("{}", e));
        std::process::exit(1);
    }
}
