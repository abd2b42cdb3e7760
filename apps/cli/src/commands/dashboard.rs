//! # Dashboard Command

use std::time::Instant;

use tracing::info;

use crate::error::ApiError;
use crate::screen::DashboardView;
use madang_db::Database;

/// Loads the four dashboard sections.
///
/// ## Sections
/// - Counters: books, customers, orders, average sale
/// - Books per publisher (bar chart)
/// - Purchases per customer (bar chart, zero-order customers included)
/// - The `recent_limit` newest orders
pub async fn load_dashboard(db: &Database, recent_limit: u32) -> Result<DashboardView, ApiError> {
    let start = Instant::now();

    let summary = db.stats().summary().await?;
    let publishers = db.books().count_by_publisher().await?;
    let spending = db.customers().spending().await?;
    let recent_orders = db.orders().recent(recent_limit).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        orders = summary.order_count,
        "Dashboard loaded"
    );

    Ok(DashboardView {
        summary,
        publishers,
        spending,
        recent_orders,
    })
}
