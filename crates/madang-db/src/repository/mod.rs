//! # Repository Module
//!
//! Database repository implementations for the bookstore.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Screen                                                                │
//! │       │                                                                 │
//! │       │  db.customers().find_by_name("박지성")                          │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── find_by_name(&self, name)                                         │
//! │  ├── list(&self)                                                       │
//! │  ├── spending(&self)                                                   │
//! │  └── register(&self, new_customer)                                     │
//! │       │                                                                 │
//! │       │  SQL with bound parameters                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BookRepository`](book::BookRepository) - Catalog and publisher counts
//! - [`CustomerRepository`](customer::CustomerRepository) - Lookup, listing, spend, registration
//! - [`OrderRepository`](order::OrderRepository) - Recent orders, history, order placement
//! - [`StatsRepository`](stats::StatsRepository) - Store-wide counters

pub mod book;
pub mod customer;
pub mod order;
pub mod stats;
