//! Trackkit CLI - validate and format exercise track repositories

use std::process::ExitCode;

fn main() -> ExitCode {
    match trackkit_cli::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
