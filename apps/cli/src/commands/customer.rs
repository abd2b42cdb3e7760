//! # Customer Search Command
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search box                                                             │
//! │       │                                                                 │
//! │       ├── empty ──────────► CustomerDirectory (everyone, by id)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_by_name(query)    exact match, no trimming                        │
//! │       │                                                                 │
//! │       ├── no rows ────────► CustomerNotFound { query }                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first match by custid                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  history_for(custid) ─────► CustomerFound { customer, history, .. }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::ApiError;
use crate::screen::Screen;
use madang_core::validation::search_term;
use madang_core::total_spent;
use madang_db::Database;

/// Runs the customer search screen.
pub async fn search_customers(db: &Database, query: Option<&str>) -> Result<Screen, ApiError> {
    let Some(name) = search_term(query) else {
        let customers = db.customers().list().await?;
        debug!(count = customers.len(), "Showing customer directory");
        return Ok(Screen::CustomerDirectory { customers });
    };

    let matches = db.customers().find_by_name(name).await?;
    let match_count = matches.len();

    let Some(customer) = matches.into_iter().next() else {
        info!(query = %name, "No customer with that name");
        return Ok(Screen::CustomerNotFound {
            query: name.to_string(),
        });
    };

    if match_count > 1 {
        debug!(query = %name, match_count, "Several customers share this name, showing the first");
    }

    let history = db.orders().history_for(customer.custid).await?;
    let total = total_spent(&history);

    info!(
        custid = customer.custid,
        orders = history.len(),
        total = total.amount(),
        "Customer found"
    );

    Ok(Screen::CustomerFound {
        order_count: history.len(),
        total_spent: total,
        customer,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::seeded_db;
    use madang_core::{NewCustomer, Won};

    #[tokio::test]
    async fn test_customer_without_orders() {
        let db = seeded_db().await;

        let screen = search_customers(&db, Some("박세리")).await.unwrap();
        match screen {
            Screen::CustomerFound {
                customer,
                history,
                total_spent,
                order_count,
            } => {
                assert_eq!(customer.phone, None);
                assert!(history.is_empty());
                assert_eq!(order_count, 0);
                assert_eq!(total_spent, Won::zero());
            }
            other => panic!("expected CustomerFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_is_part_of_the_query() {
        let db = seeded_db().await;

        let screen = search_customers(&db, Some("박지성 ")).await.unwrap();
        assert_eq!(
            screen,
            Screen::CustomerNotFound {
                query: "박지성 ".into()
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_names_pick_lowest_id() {
        let db = seeded_db().await;
        let twin = NewCustomer::new("김연아", "대한민국 부산", "").unwrap();
        db.customers().register(&twin).await.unwrap();

        let screen = search_customers(&db, Some("김연아")).await.unwrap();
        let Screen::CustomerFound { customer, order_count, .. } = screen else {
            panic!("expected CustomerFound");
        };
        assert_eq!(customer.custid, 2);
        assert_eq!(order_count, 2);
    }
}
