//! Glossa CLI
//!
//! Command-line interface for Glossa locale catalogues.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match glossa::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Don't print if it's an empty error (e.g., from clap usage errors)
            let msg = e.to_string();
            if !msg.is_empty() {
                eprintln!("Error: {e}");

                if matches!(e, glossa::Error::UnknownLocale(_)) {
                    eprintln!();
                    eprintln!("Run 'glossa locales' to list the available locales.");
                }
            }

            let code = e.exit_code();
            ExitCode::from(code as u8)
        },
    }
}
