//! # Database State
//!
//! Opens the store described by [`ConfigState`] and runs the Store
//! Initializer once per process start.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbState::open(config, today)                                          │
//! │       │                                                                 │
//! │       ├── create the data directory (file stores only)                 │
//! │       ├── Database::new   (ephemeral: drop tables, then migrate)       │
//! │       └── Database::initialize(identity, today)                        │
//! │             ├── empty store  → Seeded                                  │
//! │             └── rows present → AlreadySeeded (persistent mode only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::info;

use crate::error::ApiError;
use crate::state::ConfigState;
use madang_db::{Database, DbConfig, SeedOutcome};

/// An opened, initialized store.
///
/// The `Database` inside holds a `SqlitePool`, which is cheap to clone and
/// safe to share.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
    outcome: SeedOutcome,
}

impl DbState {
    /// Opens and seeds the configured store.
    ///
    /// Every failure here is fatal to startup.
    pub async fn open(config: &ConfigState, today: NaiveDate) -> Result<Self, ApiError> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db_config = DbConfig::new(&config.database_path).mode(config.mode);
        Self::open_with(db_config, config, today).await
    }

    /// Opens a store from an explicit `DbConfig` (in-memory for tests).
    pub async fn open_with(
        db_config: DbConfig,
        config: &ConfigState,
        today: NaiveDate,
    ) -> Result<Self, ApiError> {
        let db = Database::new(db_config).await?;
        let outcome = db.initialize(&config.identity, today).await?;

        info!(?outcome, mode = db.mode().as_str(), "Store ready");
        Ok(DbState { db, outcome })
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Whether this start wrote the seed rows.
    pub fn seed_outcome(&self) -> SeedOutcome {
        self.outcome
    }
}
