//! emoji-extract - Command-line tool for slicing emoji sprite sheets

use std::process::ExitCode;

use emoji_extract::cli;

fn main() -> ExitCode {
    cli::run()
}
