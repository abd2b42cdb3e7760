//! # Madang CLI Library
//!
//! Terminal front-end for the Madang bookstore admin dashboard.
//!
//! ## Module Organization
//! ```text
//! madang_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── config.rs   ◄─── ConfigState (defaults, MADANG_* env, flags)
//! │   └── db.rs       ◄─── DbState (open + seed the store)
//! ├── screen.rs       ◄─── Menu, ScreenRequest, Screen, ScreenController
//! ├── commands/       ◄─── One module per screen
//! ├── render.rs       ◄─── Tables, bar charts, JSON
//! ├── shell.rs        ◄─── Interactive menu loop
//! └── error.rs        ◄─── ApiError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • --log-level > RUST_LOG > "warn,madang=info,sqlx=warn"             │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • defaults < MADANG_* environment < command-line flags              │
//! │                                                                         │
//! │  3. Open the Store ───────────────────────────────────────────────────► │
//! │     • ephemeral: drop tables, migrate, seed                             │
//! │     • persistent: migrate, seed only if empty                           │
//! │     • any failure here exits with code 1                                │
//! │                                                                         │
//! │  4. Run the Command ──────────────────────────────────────────────────► │
//! │     • one screen, the shell loop, or the init report                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod screen;
pub mod shell;
pub mod state;

use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use error::ApiError;
use render::OutputFormat;
use screen::ScreenController;
use state::{ConfigState, DbState};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,madang=info,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `--log-level debug` - Show debug messages
/// - `RUST_LOG=madang_db=trace` - Trace the database crate only
/// - Default: warnings, plus INFO from the madang crates
///
/// Logs go to stderr; stdout carries only screens.
pub fn init_tracing(level: Option<&str>) {
    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .try_init();
}

/// `--log-level` directives, else `RUST_LOG`, else [`DEFAULT_LOG_FILTER`].
/// Unparseable directives fall through to the default.
fn log_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Runs one invocation of the CLI.
///
/// ## Errors
/// Startup failures and read failures are returned; the binary turns them
/// into exit code 1. Failed writes are not errors: they render as a screen.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let format = OutputFormat::from_json_flag(cli.json);
    let config = ConfigState::from_env().with_overrides(cli.db.clone(), cli.persistent);
    let command = cli.command.unwrap_or(Command::Home);

    info!(
        path = %config.database_path.display(),
        mode = config.mode.as_str(),
        command = ?command,
        "Starting Madang bookstore admin"
    );

    let state = DbState::open(&config, Local::now().date_naive()).await?;
    let result = run_command(&command, &state, config, format).await;

    state.inner().close().await;
    result
}

async fn run_command(
    command: &Command,
    state: &DbState,
    config: ConfigState,
    format: OutputFormat,
) -> Result<(), ApiError> {
    if *command == Command::Init {
        let report = commands::store::init_report(state, &config).await?;
        println!("{}", format.init_report(&report)?);
        return Ok(());
    }

    let controller = ScreenController::new(state.inner().clone(), config);

    match command.screen_request() {
        Some(request) => {
            let page = controller.show(request).await?;
            println!("{}", format.page(&page)?);
            Ok(())
        }
        None => shell::run_shell(&controller, format).await,
    }
}
