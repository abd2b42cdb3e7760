//! # Order Repository
//!
//! Order listings and order placement.
//!
//! ## Placing an Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place(OrderRequest { custid, bookid }, date)         │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── SELECT Customer WHERE custid = ?   ── none? ──► NotFound        │
//! │    ├── SELECT Book     WHERE bookid = ?   ── none? ──► NotFound        │
//! │    │                                                                    │
//! │    └── INSERT INTO Orders (custid, bookid, saleprice = book.price, ...) │
//! │        RETURNING orderid               ← max(orderid) + 1              │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings inner-join Customer and Book, so an order pointing at a missing
//! row does not appear in them.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use madang_core::{Book, Customer, Order, OrderLine, OrderRequest, PlacedOrder};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, orderid: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT orderid, custid, bookid, saleprice, orderdate
            FROM Orders
            WHERE orderid = ?1
            "#,
        )
        .bind(orderid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// The most recent orders, newest (highest id) first.
    ///
    /// ## Arguments
    /// * `limit` - Maximum rows to return (the dashboard uses 10)
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT o.orderid, o.custid, c.name, o.bookid, b.bookname,
                   o.saleprice, o.orderdate
            FROM Orders o
            JOIN Customer c ON o.custid = c.custid
            JOIN Book b ON o.bookid = b.bookid
            ORDER BY o.orderid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// A customer's full purchase history, latest date first.
    pub async fn history_for(&self, custid: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT o.orderid, o.custid, c.name, o.bookid, b.bookname,
                   o.saleprice, o.orderdate
            FROM Orders o
            JOIN Customer c ON o.custid = c.custid
            JOIN Book b ON o.bookid = b.bookid
            WHERE o.custid = ?1
            ORDER BY o.orderdate DESC, o.orderid DESC
            "#,
        )
        .bind(custid)
        .fetch_all(&self.pool)
        .await?;

        debug!(custid = custid, count = lines.len(), "Loaded order history");
        Ok(lines)
    }

    /// Places an order at the book's current list price.
    ///
    /// ## Arguments
    /// * `request` - Buyer and book, by id
    /// * `orderdate` - Date stamped on the order (normally today)
    ///
    /// ## Returns
    /// * `Ok(PlacedOrder)` - The stored order with its new id, plus the
    ///   customer and book rows read inside the same transaction
    /// * `Err(DbError::NotFound)` - Customer or book doesn't exist
    pub async fn place(
        &self,
        request: &OrderRequest,
        orderdate: NaiveDate,
    ) -> DbResult<PlacedOrder> {
        debug!(custid = request.custid, bookid = request.bookid, "Placing order");

        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            "SELECT custid, name, address, phone FROM Customer WHERE custid = ?1",
        )
        .bind(request.custid)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", request.custid))?;

        let book = sqlx::query_as::<_, Book>(
            "SELECT bookid, bookname, publisher, price FROM Book WHERE bookid = ?1",
        )
        .bind(request.bookid)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Book", request.bookid))?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO Orders (custid, bookid, saleprice, orderdate)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING orderid, custid, bookid, saleprice, orderdate
            "#,
        )
        .bind(customer.custid)
        .bind(book.bookid)
        .bind(book.price)
        .bind(orderdate)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            orderid = order.orderid,
            customer = %customer.name,
            book = %book.bookname,
            saleprice = order.saleprice,
            "Order placed"
        );

        Ok(PlacedOrder {
            order,
            customer,
            book,
        })
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{seed_date, seeded_db};

    fn order_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let db = seeded_db().await;
        let recent = db.orders().recent(10).await.unwrap();

        let ids: Vec<i64> = recent.iter().map(|l| l.orderid).collect();
        assert_eq!(ids, (2..=11).rev().collect::<Vec<i64>>());
        assert_eq!(recent[0].name, "최혜원");
        assert_eq!(recent[0].bookname, "Olympic Champions");
        assert_eq!(recent[0].orderdate, seed_date());
    }

    #[tokio::test]
    async fn test_history_latest_date_first() {
        let db = seeded_db().await;
        let history = db.orders().history_for(1).await.unwrap();

        let rows: Vec<(i64, &str, i64)> = history
            .iter()
            .map(|l| (l.orderid, l.bookname.as_str(), l.saleprice))
            .collect();
        assert_eq!(
            rows,
            vec![
                (6, "축구아는 여자", 12000),
                (2, "축구의 이해", 21000),
                (1, "축구의 역사", 6000),
            ]
        );
        assert_eq!(madang_core::total_spent(&history).amount(), 39000);
    }

    #[tokio::test]
    async fn test_history_empty_for_customer_without_orders() {
        let db = seeded_db().await;
        assert!(db.orders().history_for(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_allocates_next_id() {
        let db = seeded_db().await;
        let before = db.orders().count().await.unwrap();

        let PlacedOrder {
            order,
            customer,
            book,
        } = db
            .orders()
            .place(&OrderRequest { custid: 1, bookid: 4 }, order_day())
            .await
            .unwrap();

        assert_eq!(order.orderid, 12);
        assert_eq!(customer.name, "박지성");
        assert_eq!((book.bookid, book.price), (4, 35000));
        assert_eq!(order.saleprice, 35000);
        assert_eq!(order.orderdate, order_day());
        assert_eq!(db.orders().count().await.unwrap(), before + 1);

        let stored = db.orders().get_by_id(12).await.unwrap().unwrap();
        assert_eq!(stored, order);
    }

    #[tokio::test]
    async fn test_place_order_unknown_customer() {
        let db = seeded_db().await;

        let err = db
            .orders()
            .place(&OrderRequest { custid: 99, bookid: 1 }, order_day())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Customer"));
        assert_eq!(db.orders().count().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_place_order_unknown_book() {
        let db = seeded_db().await;

        let err = db
            .orders()
            .place(&OrderRequest { custid: 1, bookid: 99 }, order_day())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Book"));
        assert_eq!(db.orders().count().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_dangling_order_hidden_from_listings() {
        let db = seeded_db().await;

        sqlx::query(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) VALUES (50, 77, 1, 100, '2020-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let recent = db.orders().recent(100).await.unwrap();
        assert!(recent.iter().all(|l| l.orderid != 50));
        assert_eq!(db.orders().count().await.unwrap(), 12);
    }
}
