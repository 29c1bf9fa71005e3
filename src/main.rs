//! pagedeps CLI entry point
//!
//! Parses arguments, runs the selected command and prints failures with the
//! suggestions from [`user_friendly_error`].

use anyhow::Result;
use clap::Parser;
use pagedeps::cli;
use pagedeps::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
