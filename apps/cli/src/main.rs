//! # Madang Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        madang (this binary)                             │
//! │                                                                         │
//! │  main.rs ────► parse flags, set up logging, hand off to run()          │
//! │  lib.rs ─────► open the store, run the command                          │
//! │                                                                         │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  madang.db (local file, WAL mode)                                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use madang_cli::cli::Cli;
use madang_cli::render::OutputFormat;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    madang_cli::init_tracing(cli.log_level.as_deref());

    let format = OutputFormat::from_json_flag(cli.json);

    match madang_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format.error(&err));
            ExitCode::FAILURE
        }
    }
}
