//! # Seed Data
//!
//! The fixed rows every fresh store starts with.
//!
//! ## What Gets Inserted
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Book      10 fixed rows   (bookid 1..=10)                              │
//! │  Customer   5 fixed rows   (custid 1..=5)                               │
//! │           + 1 identity row (custid 6, from configuration)               │
//! │  Orders    10 fixed rows   (orderid 1..=10, July 2014)                  │
//! │           + 1 identity row (orderid 11: custid 6 buys bookid 10, today) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is written in one transaction: a failure leaves the store empty.

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::DbResult;
use madang_core::{StoreIdentity, IDENTITY_BOOK_ID, IDENTITY_CUSTOMER_ID, IDENTITY_SALE_PRICE};

/// (bookid, bookname, publisher, price)
pub const SEED_BOOKS: &[(i64, &str, &str, i64)] = &[
    (1, "축구의 역사", "굿스포츠", 7000),
    (2, "축구아는 여자", "나무수", 13000),
    (3, "축구의 이해", "대한미디어", 22000),
    (4, "골프 바이블", "대한미디어", 35000),
    (5, "피겨 교본", "굿스포츠", 8000),
    (6, "역도 단계별기술", "굿스포츠", 6000),
    (7, "야구의 추억", "이상미디어", 20000),
    (8, "야구를 부탁해", "이상미디어", 13000),
    (9, "올림픽 이야기", "삼성당", 7500),
    (10, "Olympic Champions", "Pearson", 13000),
];

/// (custid, name, address, phone)
pub const SEED_CUSTOMERS: &[(i64, &str, &str, Option<&str>)] = &[
    (1, "박지성", "영국 맨체스타", Some("000-5000-0001")),
    (2, "김연아", "대한민국 서울", Some("000-6000-0001")),
    (3, "장미란", "대한민국 강원도", Some("000-7000-0001")),
    (4, "추신수", "미국 클리블랜드", Some("000-8000-0001")),
    (5, "박세리", "대한민국 대전", None),
];

/// (orderid, custid, bookid, saleprice, orderdate)
pub const SEED_ORDERS: &[(i64, i64, i64, i64, &str)] = &[
    (1, 1, 1, 6000, "2014-07-01"),
    (2, 1, 3, 21000, "2014-07-03"),
    (3, 2, 5, 8000, "2014-07-03"),
    (4, 3, 6, 6000, "2014-07-04"),
    (5, 4, 7, 20000, "2014-07-05"),
    (6, 1, 2, 12000, "2014-07-07"),
    (7, 4, 8, 13000, "2014-07-07"),
    (8, 3, 10, 12000, "2014-07-08"),
    (9, 2, 10, 7000, "2014-07-09"),
    (10, 3, 8, 13000, "2014-07-10"),
];

/// Order id given to the identity's startup purchase.
pub const IDENTITY_ORDER_ID: i64 = 11;

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed rows were written.
    Seeded,

    /// The store already had books; nothing was written.
    AlreadySeeded,
}

/// Seeds an empty store.
///
/// ## Arguments
/// * `identity` - The configured user, stored as customer 6
/// * `today` - Date for order 11
///
/// ## Returns
/// `SeedOutcome::AlreadySeeded` without writing when `Book` has any rows,
/// which only happens in persistent mode.
pub async fn seed_store(
    pool: &SqlitePool,
    identity: &StoreIdentity,
    today: NaiveDate,
) -> DbResult<SeedOutcome> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Book")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        info!(books = existing, "Store already seeded, skipping");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut tx = pool.begin().await?;

    insert_books(&mut tx).await?;
    insert_customers(&mut tx, identity).await?;
    insert_orders(&mut tx, today).await?;

    tx.commit().await?;

    info!(
        books = SEED_BOOKS.len(),
        customers = SEED_CUSTOMERS.len() + 1,
        orders = SEED_ORDERS.len() + 1,
        "Seed data written"
    );

    Ok(SeedOutcome::Seeded)
}

async fn insert_books(tx: &mut Transaction<'_, Sqlite>) -> DbResult<()> {
    for (bookid, bookname, publisher, price) in SEED_BOOKS {
        sqlx::query("INSERT INTO Book (bookid, bookname, publisher, price) VALUES (?1, ?2, ?3, ?4)")
            .bind(bookid)
            .bind(bookname)
            .bind(publisher)
            .bind(price)
            .execute(&mut **tx)
            .await?;
    }

    debug!(count = SEED_BOOKS.len(), "Books seeded");
    Ok(())
}

async fn insert_customers(tx: &mut Transaction<'_, Sqlite>, identity: &StoreIdentity) -> DbResult<()> {
    let identity_row = identity.as_customer(IDENTITY_CUSTOMER_ID);

    let fixed = SEED_CUSTOMERS
        .iter()
        .map(|(custid, name, address, phone)| (*custid, *name, *address, *phone));
    let configured = std::iter::once((
        identity_row.custid,
        identity_row.name.as_str(),
        identity_row.address.as_str(),
        identity_row.phone.as_deref(),
    ));

    for (custid, name, address, phone) in fixed.chain(configured) {
        sqlx::query("INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)")
            .bind(custid)
            .bind(name)
            .bind(address)
            .bind(phone)
            .execute(&mut **tx)
            .await?;
    }

    debug!(identity = %identity.name, "Customers seeded");
    Ok(())
}

async fn insert_orders(tx: &mut Transaction<'_, Sqlite>, today: NaiveDate) -> DbResult<()> {
    for (orderid, custid, bookid, saleprice, orderdate) in SEED_ORDERS {
        sqlx::query(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(orderid)
        .bind(custid)
        .bind(bookid)
        .bind(saleprice)
        .bind(orderdate)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(IDENTITY_ORDER_ID)
    .bind(IDENTITY_CUSTOMER_ID)
    .bind(IDENTITY_BOOK_ID)
    .bind(IDENTITY_SALE_PRICE)
    .bind(today)
    .execute(&mut **tx)
    .await?;

    debug!(date = %today, "Orders seeded");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
