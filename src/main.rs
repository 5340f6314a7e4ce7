//! Huebox - Command-line tool for generating, sharing and saving color palettes

use std::process::ExitCode;

use huebox::cli;

fn main() -> ExitCode {
    cli::run()
}
