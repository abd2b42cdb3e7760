//! # madang-db: Database Layer for the Madang Bookstore
//!
//! SQLite storage for books, customers and orders, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Madang Data Flow                                 │
//! │                                                                         │
//! │  Screen (dashboard, search, order, register)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     madang-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Initializer │  │   │
//! │  │   │   (pool.rs)   │    │ book/customer │    │ migrations + │  │   │
//! │  │   │               │◄───│ order/stats   │    │ seed.rs      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (madang.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, store mode, initialization
//! - [`migrations`] - Embedded schema migrations and the demo-mode reset
//! - [`seed`] - Fixed seed rows plus the configured identity
//! - [`error`] - Database error types
//! - [`repository`] - Query and mutation repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use madang_db::{Database, DbConfig, StoreMode};
//!
//! let db = Database::new(DbConfig::new("madang.db").mode(StoreMode::Ephemeral)).await?;
//! db.initialize(&identity, today).await?;
//!
//! let summary = db.stats().summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, StoreMode};
pub use seed::SeedOutcome;

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::stats::StatsRepository;
