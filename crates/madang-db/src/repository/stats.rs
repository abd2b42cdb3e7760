//! # Stats Repository
//!
//! Store-wide counters for the dashboard cards and the sidebar.

use sqlx::SqlitePool;

use crate::error::DbResult;
use madang_core::StoreSummary;

/// Repository for aggregate statistics.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    /// Creates a new StatsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatsRepository { pool }
    }

    /// Row counts plus the sum and average of all sale prices.
    ///
    /// One statement, so the five numbers describe the same snapshot.
    pub async fn summary(&self) -> DbResult<StoreSummary> {
        let summary = sqlx::query_as::<_, StoreSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM Book)           AS book_count,
                (SELECT COUNT(*) FROM Customer)       AS customer_count,
                (SELECT COUNT(*) FROM Orders)         AS order_count,
                (SELECT SUM(saleprice) FROM Orders)   AS total_sales,
                (SELECT AVG(saleprice) FROM Orders)   AS average_sale
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
