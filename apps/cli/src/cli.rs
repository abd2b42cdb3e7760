//! Command-line interface definitions.
//!
//! Global flags pick the store and output format; each subcommand maps to
//! one screen request, except `shell` (menu loop) and `init` (store report).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::screen::{CustomerRef, ScreenRequest};

/// 마당 북스토어 admin dashboard
#[derive(Parser, Debug)]
#[command(name = "madang")]
#[command(version)]
pub struct Cli {
    /// SQLite file to use [default: platform data directory]
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Keep data between runs instead of reseeding on start
    #[arg(long, global = true)]
    pub persistent: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter, e.g. `debug` or `madang_db=trace` (overrides RUST_LOG)
    #[arg(long, global = true, env = "MADANG_LOG", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Defaults to `home`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dashboard: counters, charts and recent orders
    Home,

    /// Look up a customer by exact name, or list everyone
    Search {
        /// Customer name (exact match); omit to list all customers
        name: Option<String>,
    },

    /// Show the order form, or place an order when --book is given
    Order {
        /// Buyer name (exact match) [default: the configured user]
        #[arg(long)]
        customer: Option<String>,

        /// Book id to order
        #[arg(long)]
        book: Option<i64>,
    },

    /// Register a new customer
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Interactive menu
    Shell,

    /// Initialize the store and print row counts
    Init,
}

impl Command {
    /// The screen request for one-shot commands; `None` for `shell`/`init`.
    pub fn screen_request(&self) -> Option<ScreenRequest> {
        match self {
            Command::Home => Some(ScreenRequest::Dashboard),
            Command::Search { name } => Some(ScreenRequest::CustomerSearch { query: name.clone() }),
            Command::Order { customer, book } => Some(ScreenRequest::OrderEntry {
                customer: customer.clone().map(CustomerRef::Name),
                book: *book,
            }),
            Command::Register {
                name,
                address,
                phone,
            } => Some(ScreenRequest::Registration {
                name: name.clone(),
                address: address.clone(),
                phone: phone.clone(),
            }),
            Command::Shell | Command::Init => None,
        }
    }
}
