//! # Commands Module
//!
//! One module per screen. Each function reads or writes through the
//! repositories and returns the screen to show.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── dashboard.rs  ◄─── Home: counters, charts, recent orders
//! ├── customer.rs   ◄─── Customer search and directory
//! ├── order.rs      ◄─── Order form and order placement
//! ├── register.rs   ◄─── New customer registration
//! └── store.rs      ◄─── `madang init` report
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScreenController::dispatch(request)                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::order::place_order(                                          │
//! │      db: &Database,              ◄── Shared pool                        │
//! │      customer: Option<&CustomerRef>,                                    │
//! │      bookid: i64,                                                       │
//! │      ..                                                                 │
//! │  ) -> Result<Screen, ApiError>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Screen::OrderPlaced { order, customer, book }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod dashboard;
pub mod order;
pub mod register;
pub mod store;
