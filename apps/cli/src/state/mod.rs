//! # State Module
//!
//! What the front-end holds for the lifetime of the process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐          │
//! │  │    ConfigState       │ ─────► │        DbState           │          │
//! │  │                      │  open  │                          │          │
//! │  │  database_path       │        │  Database (SQLite pool)  │          │
//! │  │  mode                │        │  SeedOutcome             │          │
//! │  │  identity            │        └──────────────────────────┘          │
//! │  │  recent_limit        │                                               │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  Both are read-only after startup; the pool handles its own locking.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{default_database_path, ConfigState, DB_FILE_NAME};
pub use db::DbState;
