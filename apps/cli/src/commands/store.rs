//! # Store Command
//!
//! Backs `madang init`: the store is opened and seeded by startup, this
//! only reports what is there.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use madang_db::SeedOutcome;

/// Row counts after the Store Initializer ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub database_path: PathBuf,
    pub mode: &'static str,
    pub seeded: bool,
    /// Applied / embedded schema migrations.
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub books: i64,
    pub customers: i64,
    pub orders: i64,
}

/// Counts the rows of an opened store.
pub async fn init_report(state: &DbState, config: &ConfigState) -> Result<InitReport, ApiError> {
    let db = state.inner();
    let (migrations_total, migrations_applied) = db.migration_status().await?;

    Ok(InitReport {
        database_path: config.database_path.clone(),
        mode: db.mode().as_str(),
        seeded: state.seed_outcome() == SeedOutcome::Seeded,
        migrations_applied,
        migrations_total,
        books: db.books().count().await?,
        customers: db.customers().count().await?,
        orders: db.orders().count().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::seed_date;
    use madang_db::DbConfig;

    #[tokio::test]
    async fn test_report_after_fresh_start() {
        let config = ConfigState::from_lookup(|_| None);
        let state = DbState::open_with(DbConfig::in_memory(), &config, seed_date())
            .await
            .unwrap();

        let report = init_report(&state, &config).await.unwrap();

        assert_eq!(report.mode, "ephemeral");
        assert!(report.seeded);
        assert_eq!(report.migrations_applied, report.migrations_total);
        assert!(report.migrations_total >= 1);
        assert_eq!((report.books, report.customers, report.orders), (10, 6, 11));
    }
}
