//! # Customer Repository
//!
//! Lookup, listing, spend aggregation and registration.
//!
//! ## Name Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_by_name("박지성")                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE name = ?1   ← exact, byte-for-byte                              │
//! │                                                                         │
//! │  "박지성"   → [custid 1]                                                │
//! │  "박지성 "  → []        (trailing space is part of the value)          │
//! │  "없는사람" → []        (a miss is an empty list, not an error)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use madang_core::{Customer, CustomerSpend, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, custid: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT custid, name, address, phone
            FROM Customer
            WHERE custid = ?1
            "#,
        )
        .bind(custid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Finds customers whose name equals `name` exactly.
    ///
    /// Names are not unique; all matches are returned ordered by id.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Customer>> {
        debug!(name = %name, "Looking up customer by name");

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT custid, name, address, phone
            FROM Customer
            WHERE name = ?1
            ORDER BY custid
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Customer lookup returned");
        Ok(customers)
    }

    /// Lists all customers ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT custid, name, address, phone
            FROM Customer
            ORDER BY custid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Total purchases per customer, biggest spender first.
    ///
    /// Customers without orders are included with `total = None` and sort
    /// after everyone who bought something.
    pub async fn spending(&self) -> DbResult<Vec<CustomerSpend>> {
        let spend = sqlx::query_as::<_, CustomerSpend>(
            r#"
            SELECT c.custid AS custid, c.name AS name, SUM(o.saleprice) AS total
            FROM Customer c
            LEFT JOIN Orders o ON c.custid = o.custid
            GROUP BY c.custid, c.name
            ORDER BY total IS NULL, total DESC, c.custid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(spend)
    }

    /// Registers a new customer.
    ///
    /// ## Id Allocation
    /// `custid` is left to SQLite: an `INTEGER PRIMARY KEY` insert without an
    /// id takes max(custid) + 1 inside the same statement, so there is no
    /// read-then-write window.
    ///
    /// ## Returns
    /// The stored customer, including its new id.
    pub async fn register(&self, new_customer: &NewCustomer) -> DbResult<Customer> {
        debug!(name = %new_customer.name(), "Registering customer");

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO Customer (name, address, phone)
            VALUES (?1, ?2, ?3)
            RETURNING custid, name, address, phone
            "#,
        )
        .bind(new_customer.name())
        .bind(new_customer.address())
        .bind(new_customer.phone())
        .fetch_one(&self.pool)
        .await?;

        info!(custid = customer.custid, name = %customer.name, "Customer registered");
        Ok(customer)
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Customer")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
