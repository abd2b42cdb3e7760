//! # madang-core: Pure Domain Logic for the Madang Bookstore
//!
//! Types, validation and formatting shared by the database layer and the
//! terminal front-end. Nothing in here touches a file, a socket or a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Madang Bookstore Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 madang-cli (Screen Controller)                  │   │
//! │  │    Dashboard ── Customer Search ── Order Entry ── Registration  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ madang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Book      │  │   Won     │  │  form     │                  │   │
//! │  │   │ Customer  │  │  "7,000원" │  │  rules    │                  │   │
//! │  │   │ Order     │  │           │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  madang-db (Database Layer)                     │   │
//! │  │         SQLite schema, seed data, queries, mutations            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rows (Book, Customer, Order) and aggregate views
//! - [`money`] - `Won` amounts with thousands-separated display
//! - [`error`] - Domain error types
//! - [`validation`] - Registration form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use madang_core::money::Won;
//!
//! let price = Won::new(13000);
//! assert_eq!(price.to_string(), "13,000원");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Won;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer id reserved for the configured store user in the seed data.
pub const IDENTITY_CUSTOMER_ID: i64 = 6;

/// Book the configured store user is recorded as having bought at startup.
pub const IDENTITY_BOOK_ID: i64 = 10;

/// Sale price of the identity's startup order.
pub const IDENTITY_SALE_PRICE: i64 = 13000;

/// Number of rows shown in the dashboard's "recent orders" table.
pub const DEFAULT_RECENT_ORDERS: u32 = 10;
