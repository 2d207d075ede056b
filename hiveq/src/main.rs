// hiveq/src/main.rs

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use miette::Diagnostic;
use tracing::{Level, error};

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    // 1. Setup Logging (Tracing): fixed INFO level on stderr, stdout keeps the summary
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match commands::export::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.code().map(|c| c.to_string()).unwrap_or_default();
            error!(kind = ?e.kind(), code = %code, "💥 {}", e);
            if let Some(help) = e.help() {
                error!("👉 {}", help);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
