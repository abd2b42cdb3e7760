//! # Database Migrations
//!
//! Embedded SQL migrations plus the demo-mode schema reset.
//!
//! ## Startup Process
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Lifecycle                                   │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ├── StoreMode::Ephemeral?                                        │
//! │       │        │                                                        │
//! │       │        ▼                                                        │
//! │       │   reset_schema(): DROP Orders, Customer, Book,                 │
//! │       │                   _sqlx_migrations (IF EXISTS)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run_migrations(): apply 001_initial_schema.sql if not applied         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed::seed_store() (skipped when Book already has rows)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. **NEVER** modify existing migrations - always add new ones
//! 3. Add any new table to [`RESET_TABLES`] so demo mode still starts clean

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Tables dropped by [`reset_schema`], children first.
pub const RESET_TABLES: &[&str] = &["Orders", "Customer", "Book", "_sqlx_migrations"];

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Drops every store table so the next migration run rebuilds them empty.
///
/// Tables that do not exist are skipped, so this is safe on a fresh file.
pub async fn reset_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Resetting store schema");

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::MigrationFailed(e.to_string()))?;

    for table in RESET_TABLES {
        debug!(table = %table, "Dropping table");
        // Identifiers can't be bound as parameters; these names are constants.
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::MigrationFailed(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::MigrationFailed(e.to_string()))?;

    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
///
/// ## Errors
/// Fails if the bookkeeping table is missing, i.e. migrations never ran.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;
    let applied = usize::try_from(applied).map_err(|e| DbError::Internal(e.to_string()))?;

    Ok((total, applied))
}
