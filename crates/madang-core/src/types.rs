//! # Domain Types
//!
//! Rows of the three store tables plus the aggregate shapes the screens read.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    Customer     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bookid         │   │  custid         │   │  orderid        │       │
//! │  │  bookname       │   │  name           │   │  custid  ──►    │       │
//! │  │  publisher      │   │  address        │   │  bookid  ──►    │       │
//! │  │  price          │   │  phone (opt)    │   │  saleprice      │       │
//! │  └─────────────────┘   └─────────────────┘   │  orderdate      │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Views: StoreSummary, PublisherCount, CustomerSpend, OrderLine,        │
//! │         BookOption                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are plain integers allocated by the store (max + 1).
//! References between rows are by convention only; nothing enforces them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Won;
use crate::validation::{normalize_phone, validate_address, validate_customer_name};

// =============================================================================
// Rows
// =============================================================================

/// A book in the catalog. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    pub bookid: i64,
    pub bookname: String,
    pub publisher: String,
    /// List price in won.
    pub price: i64,
}

/// A store customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub custid: i64,
    pub name: String,
    pub address: String,
    /// `None` when no phone number was given; never an empty string.
    pub phone: Option<String>,
}

/// A single book sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub orderid: i64,
    pub custid: i64,
    pub bookid: i64,
    pub saleprice: i64,
    pub orderdate: NaiveDate,
}

impl Book {
    pub fn price(&self) -> Won {
        Won::new(self.price)
    }
}

impl Order {
    pub fn saleprice(&self) -> Won {
        Won::new(self.saleprice)
    }
}

// =============================================================================
// Write Requests
// =============================================================================

/// A validated customer registration.
///
/// ## Construction
/// Only [`NewCustomer::new`] builds one, so a value of this type has already
/// passed the form rules: name and address present, empty phone dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    name: String,
    address: String,
    phone: Option<String>,
}

impl NewCustomer {
    /// Validates registration form input.
    ///
    /// ## Example
    /// ```rust
    /// use madang_core::NewCustomer;
    ///
    /// let ok = NewCustomer::new("홍길동", "서울특별시 강남구", "").unwrap();
    /// assert_eq!(ok.phone(), None);
    ///
    /// assert!(NewCustomer::new("홍길동", "", "010-0000-0000").is_err());
    /// ```
    pub fn new(name: &str, address: &str, phone: &str) -> Result<Self, ValidationError> {
        validate_customer_name(name)?;
        validate_address(address)?;

        Ok(NewCustomer {
            name: name.to_string(),
            address: address.to_string(),
            phone: normalize_phone(phone),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// An order to be placed: which customer buys which book.
///
/// The sale price is not part of the request; it is taken from the book row
/// at the moment the order is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub custid: i64,
    pub bookid: i64,
}

/// A committed order together with the rows it was priced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer: Customer,
    pub book: Book,
}

// =============================================================================
// Seed Identity
// =============================================================================

/// The configured store user, seeded as customer 6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreIdentity {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

impl StoreIdentity {
    pub fn new(name: impl Into<String>, address: impl Into<String>, phone: Option<String>) -> Self {
        StoreIdentity {
            name: name.into(),
            address: address.into(),
            phone: phone.and_then(|p| normalize_phone(&p)),
        }
    }

    /// The customer row this identity seeds.
    pub fn as_customer(&self, custid: i64) -> Customer {
        Customer {
            custid,
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl Default for StoreIdentity {
    fn default() -> Self {
        StoreIdentity::new("최혜원", "대한민국 인천시", Some("010-1234-5678".to_string()))
    }
}

// =============================================================================
// Aggregate Views
// =============================================================================

/// Store-wide counters shown on the dashboard and in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreSummary {
    pub book_count: i64,
    pub customer_count: i64,
    pub order_count: i64,
    /// `None` when there are no orders.
    pub total_sales: Option<i64>,
    /// `None` when there are no orders.
    pub average_sale: Option<f64>,
}

impl StoreSummary {
    pub fn total_sales(&self) -> Won {
        Won::new(self.total_sales.unwrap_or(0))
    }

    pub fn average_sale(&self) -> Won {
        self.average_sale.map(Won::from_average).unwrap_or_default()
    }
}

/// Number of catalog books per publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PublisherCount {
    pub publisher: String,
    pub count: i64,
}

/// A customer's total purchases; `total` is `None` for customers with no orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CustomerSpend {
    pub custid: i64,
    pub name: String,
    pub total: Option<i64>,
}

impl CustomerSpend {
    pub fn total(&self) -> Won {
        Won::new(self.total.unwrap_or(0))
    }
}

/// An order joined with its customer's name and its book's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub orderid: i64,
    pub custid: i64,
    pub name: String,
    pub bookid: i64,
    pub bookname: String,
    pub saleprice: i64,
    pub orderdate: NaiveDate,
}

impl OrderLine {
    pub fn saleprice(&self) -> Won {
        Won::new(self.saleprice)
    }
}

/// A selectable catalog entry: the id travels with the fields it displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BookOption {
    pub bookid: i64,
    pub bookname: String,
    pub price: i64,
}

impl BookOption {
    pub fn price(&self) -> Won {
        Won::new(self.price)
    }

    /// Display label for selectors, e.g. `축구의 역사 - 7,000원`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.bookname, self.price())
    }
}

/// Sums the sale prices of a set of order lines.
pub fn total_spent(lines: &[OrderLine]) -> Won {
    lines.iter().map(OrderLine::saleprice).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(orderid: i64, saleprice: i64) -> OrderLine {
        OrderLine {
            orderid,
            custid: 1,
            name: "박지성".to_string(),
            bookid: 1,
            bookname: "축구의 역사".to_string(),
            saleprice,
            orderdate: NaiveDate::from_ymd_opt(2014, 7, 1).unwrap(),
        }
    }

    #[test]
    fn test_new_customer_drops_empty_phone() {
        let c = NewCustomer::new("홍길동", "서울", "").unwrap();
        assert_eq!(c.phone(), None);

        let c = NewCustomer::new("홍길동", "서울", "   ").unwrap();
        assert_eq!(c.phone(), Some("   "));

        let c = NewCustomer::new("홍길동", "서울", "010-1111-2222").unwrap();
        assert_eq!(c.phone(), Some("010-1111-2222"));
    }

    #[test]
    fn test_new_customer_requires_name_and_address() {
        let err = NewCustomer::new("", "서울", "").unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = NewCustomer::new("홍길동", "", "").unwrap_err();
        assert_eq!(err.to_string(), "address is required");

        assert!(NewCustomer::new("  ", "  ", "").is_ok());
    }

    #[test]
    fn test_new_customer_keeps_input_verbatim() {
        let c = NewCustomer::new(" 홍길동", "서울 ", "").unwrap();
        assert_eq!(c.name(), " 홍길동");
        assert_eq!(c.address(), "서울 ");
    }

    #[test]
    fn test_identity_as_customer() {
        let identity = StoreIdentity::default();
        let customer = identity.as_customer(6);
        assert_eq!(customer.custid, 6);
        assert_eq!(customer.name, "최혜원");
        assert_eq!(customer.phone.as_deref(), Some("010-1234-5678"));

        let no_phone = StoreIdentity::new("A", "B", Some(String::new()));
        assert_eq!(no_phone.phone, None);
    }

    #[test]
    fn test_book_option_label() {
        let option = BookOption {
            bookid: 1,
            bookname: "축구의 역사".to_string(),
            price: 7000,
        };
        assert_eq!(option.label(), "축구의 역사 - 7,000원");
    }

    #[test]
    fn test_summary_handles_empty_store() {
        let summary = StoreSummary {
            book_count: 0,
            customer_count: 0,
            order_count: 0,
            total_sales: None,
            average_sale: None,
        };
        assert_eq!(summary.total_sales(), Won::zero());
        assert_eq!(summary.average_sale(), Won::zero());
    }

    #[test]
    fn test_total_spent() {
        let lines = vec![line(6, 12000), line(2, 21000), line(1, 6000)];
        assert_eq!(total_spent(&lines), Won::new(39000));
        assert_eq!(total_spent(&[]), Won::zero());
    }
}
