//! # Screen Controller
//!
//! Maps a menu request to the data each screen shows.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScreenRequest                         Screen                           │
//! │  ─────────────                         ──────                           │
//! │  Dashboard ──────────────────────────► Dashboard(DashboardView)         │
//! │                                                                         │
//! │  CustomerSearch { query: None | "" } ► CustomerDirectory                │
//! │  CustomerSearch { query: "박지성" } ─► CustomerFound | CustomerNotFound │
//! │                                                                         │
//! │  OrderEntry { book: None } ──────────► OrderForm | ActionFailed         │
//! │  OrderEntry { book: Some(id) } ──────► OrderPlaced | ActionFailed       │
//! │                                                                         │
//! │  Registration { .. } ────────────────► CustomerRegistered               │
//! │                                        | ValidationWarning (no write)   │
//! │                                        | ActionFailed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: every dispatch reads the store again, so a screen shown
//! after a mutation already reflects it. [`ScreenController::show`] wraps the
//! screen in a [`Page`] together with the sidebar's [`QuickStats`].

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands;
use crate::error::{ApiError, ErrorCode};
use crate::state::ConfigState;
use madang_core::{
    Book, BookOption, Customer, CustomerSpend, Order, OrderLine, PublisherCount, StoreSummary, Won,
};
use madang_db::Database;

// =============================================================================
// Requests
// =============================================================================

/// The four sidebar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Menu {
    Dashboard,
    CustomerSearch,
    OrderEntry,
    Registration,
}

impl Menu {
    /// Sidebar order.
    pub const ALL: [Menu; 4] = [
        Menu::Dashboard,
        Menu::CustomerSearch,
        Menu::OrderEntry,
        Menu::Registration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Menu::Dashboard => "홈",
            Menu::CustomerSearch => "고객 조회",
            Menu::OrderEntry => "주문하기",
            Menu::Registration => "고객 등록",
        }
    }
}

/// How the order form names its buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// Picked from the customer list.
    Id(i64),

    /// Typed by the user; resolved with an exact name match.
    Name(String),
}

/// A request for one screen, carrying that screen's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Dashboard,

    /// `None` or an empty string lists every customer.
    CustomerSearch { query: Option<String> },

    /// Without a book this only shows the form; with one it places the order.
    /// A missing customer falls back to the form's default customer.
    OrderEntry {
        customer: Option<CustomerRef>,
        book: Option<i64>,
    },

    Registration {
        name: String,
        address: String,
        phone: String,
    },
}

impl ScreenRequest {
    pub fn menu(&self) -> Menu {
        match self {
            ScreenRequest::Dashboard => Menu::Dashboard,
            ScreenRequest::CustomerSearch { .. } => Menu::CustomerSearch,
            ScreenRequest::OrderEntry { .. } => Menu::OrderEntry,
            ScreenRequest::Registration { .. } => Menu::Registration,
        }
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Everything on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: StoreSummary,
    pub publishers: Vec<PublisherCount>,
    pub spending: Vec<CustomerSpend>,
    pub recent_orders: Vec<OrderLine>,
}

/// Sidebar counters, shown next to every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub customer_count: i64,
    pub order_count: i64,
    pub total_sales: Won,
}

impl From<&StoreSummary> for QuickStats {
    fn from(summary: &StoreSummary) -> Self {
        QuickStats {
            customer_count: summary.customer_count,
            order_count: summary.order_count,
            total_sales: summary.total_sales(),
        }
    }
}

/// What a screen shows after handling its request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Dashboard(DashboardView),

    CustomerDirectory {
        customers: Vec<Customer>,
    },

    CustomerFound {
        customer: Customer,
        history: Vec<OrderLine>,
        total_spent: Won,
        order_count: usize,
    },

    CustomerNotFound {
        query: String,
    },

    OrderForm {
        customers: Vec<Customer>,
        default_customer: Option<Customer>,
        books: Vec<BookOption>,
    },

    OrderPlaced {
        order: Order,
        customer: Customer,
        book: Book,
    },

    CustomerRegistered {
        customer: Customer,
    },

    /// Input was rejected before anything was written.
    ValidationWarning {
        message: String,
    },

    /// A write failed; the store is unchanged.
    ActionFailed {
        message: String,
    },
}

/// A rendered screen plus the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub menu: Menu,
    pub quick_stats: QuickStats,
    #[serde(flatten)]
    pub screen: Screen,
}

// =============================================================================
// Controller
// =============================================================================

/// Stateless dispatcher from requests to screens.
#[derive(Debug, Clone)]
pub struct ScreenController {
    db: Database,
    config: ConfigState,
    order_date: Option<NaiveDate>,
}

impl ScreenController {
    pub fn new(db: Database, config: ConfigState) -> Self {
        ScreenController {
            db,
            config,
            order_date: None,
        }
    }

    /// Stamps new orders with a fixed date instead of today.
    pub fn with_order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.order_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Handles one request.
    ///
    /// ## Errors
    /// Read failures are returned as `Err`. Write failures are not: they come
    /// back as `Screen::ActionFailed` so the caller can keep going.
    pub async fn dispatch(&self, request: ScreenRequest) -> Result<Screen, ApiError> {
        debug!(menu = ?request.menu(), "Dispatching screen request");

        match request {
            ScreenRequest::Dashboard => {
                let view = commands::dashboard::load_dashboard(&self.db, self.config.recent_limit)
                    .await?;
                Ok(Screen::Dashboard(view))
            }

            ScreenRequest::CustomerSearch { query } => {
                commands::customer::search_customers(&self.db, query.as_deref()).await
            }

            ScreenRequest::OrderEntry { customer, book: None } => {
                let form =
                    commands::order::order_form(&self.db, customer.as_ref(), &self.config.identity)
                        .await;
                match form {
                    // A mistyped buyer is the user's error, not a broken store
                    Err(err) if err.code == ErrorCode::NotFound => Ok(action_failed(err)),
                    other => other,
                }
            }

            ScreenRequest::OrderEntry {
                customer,
                book: Some(bookid),
            } => {
                let placed = commands::order::place_order(
                    &self.db,
                    customer.as_ref(),
                    bookid,
                    &self.config.identity,
                    self.today(),
                )
                .await;
                Ok(placed.unwrap_or_else(action_failed))
            }

            ScreenRequest::Registration {
                name,
                address,
                phone,
            } => {
                let registered =
                    commands::register::register_customer(&self.db, &name, &address, &phone)
                        .await;
                Ok(registered.unwrap_or_else(action_failed))
            }
        }
    }

    /// Sidebar counters as of now.
    pub async fn quick_stats(&self) -> Result<QuickStats, ApiError> {
        let summary = self.db.stats().summary().await?;
        Ok(QuickStats::from(&summary))
    }

    /// Dispatches and attaches the sidebar.
    ///
    /// The counters are read after the screen, so they include its write.
    pub async fn show(&self, request: ScreenRequest) -> Result<Page, ApiError> {
        let menu = request.menu();
        let screen = self.dispatch(request).await?;
        let quick_stats = self.quick_stats().await?;

        Ok(Page {
            menu,
            quick_stats,
            screen,
        })
    }
}

fn action_failed(err: ApiError) -> Screen {
    warn!(code = %err.code, message = %err.message, "Action failed");
    Screen::ActionFailed {
        message: err.message,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::DbState;
    use madang_db::DbConfig;

    pub(crate) fn seed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    pub(crate) fn order_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    /// A freshly seeded in-memory store.
    pub(crate) async fn seeded_db() -> Database {
        let config = ConfigState::from_lookup(|_| None);
        let state = DbState::open_with(DbConfig::in_memory(), &config, seed_date())
            .await
            .unwrap();
        state.inner().clone()
    }

    /// A controller over a freshly seeded in-memory store.
    pub(crate) async fn controller() -> ScreenController {
        let config = ConfigState::from_lookup(|_| None);
        ScreenController::new(seeded_db().await, config).with_order_date(order_date())
    }

    fn order_request(customer: Option<CustomerRef>, book: i64) -> ScreenRequest {
        ScreenRequest::OrderEntry {
            customer,
            book: Some(book),
        }
    }

    #[test]
    fn test_menu_labels_in_sidebar_order() {
        let labels: Vec<&str> = Menu::ALL.iter().map(Menu::label).collect();
        assert_eq!(labels, vec!["홈", "고객 조회", "주문하기", "고객 등록"]);
    }

    #[tokio::test]
    async fn test_dashboard_screen() {
        let controller = controller().await;
        let screen = controller.dispatch(ScreenRequest::Dashboard).await.unwrap();

        let Screen::Dashboard(view) = screen else {
            panic!("expected dashboard");
        };
        assert_eq!(view.summary.book_count, 10);
        assert_eq!(view.summary.total_sales(), Won::new(131000));
        assert_eq!(view.publishers[0].publisher, "굿스포츠");
        assert_eq!(view.spending[0].name, "박지성");
        assert_eq!(view.recent_orders.len(), 10);
        assert_eq!(view.recent_orders[0].orderid, 11);
    }

    #[tokio::test]
    async fn test_search_found_with_history() {
        let controller = controller().await;
        let screen = controller
            .dispatch(ScreenRequest::CustomerSearch {
                query: Some("박지성".into()),
            })
            .await
            .unwrap();

        match screen {
            Screen::CustomerFound {
                customer,
                history,
                total_spent,
                order_count,
            } => {
                assert_eq!(customer.custid, 1);
                assert_eq!(customer.address, "영국 맨체스타");
                assert_eq!(history.len(), 3);
                assert_eq!(order_count, 3);
                assert_eq!(total_spent, Won::new(39000));
            }
            other => panic!("expected CustomerFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_miss_and_directory() {
        let controller = controller().await;

        let miss = controller
            .dispatch(ScreenRequest::CustomerSearch {
                query: Some("없는사람".into()),
            })
            .await
            .unwrap();
        assert_eq!(
            miss,
            Screen::CustomerNotFound {
                query: "없는사람".into()
            }
        );

        for query in [None, Some(String::new())] {
            let screen = controller
                .dispatch(ScreenRequest::CustomerSearch { query })
                .await
                .unwrap();
            let Screen::CustomerDirectory { customers } = screen else {
                panic!("expected directory");
            };
            assert_eq!(customers.len(), 6);
        }
    }

    #[tokio::test]
    async fn test_order_form_defaults_to_identity() {
        let controller = controller().await;
        let screen = controller
            .dispatch(ScreenRequest::OrderEntry {
                customer: None,
                book: None,
            })
            .await
            .unwrap();

        let Screen::OrderForm {
            customers,
            default_customer,
            books,
        } = screen
        else {
            panic!("expected order form");
        };
        assert_eq!(customers.len(), 6);
        assert_eq!(default_customer.map(|c| c.custid), Some(6));
        assert_eq!(books.len(), 10);
        assert_eq!(books[0].label(), "축구의 역사 - 7,000원");
    }

    #[tokio::test]
    async fn test_order_form_honours_given_customer() {
        let controller = controller().await;

        let screen = controller
            .dispatch(ScreenRequest::OrderEntry {
                customer: Some(CustomerRef::Name("김연아".into())),
                book: None,
            })
            .await
            .unwrap();
        let Screen::OrderForm { default_customer, .. } = screen else {
            panic!("expected order form");
        };
        assert_eq!(default_customer.map(|c| c.custid), Some(2));

        let unknown = controller
            .dispatch(ScreenRequest::OrderEntry {
                customer: Some(CustomerRef::Name("없는사람".into())),
                book: None,
            })
            .await
            .unwrap();
        assert_eq!(
            unknown,
            Screen::ActionFailed {
                message: "Customer not found: 없는사람".into()
            }
        );
    }

    #[tokio::test]
    async fn test_place_order_by_name_and_default() {
        let controller = controller().await;

        let screen = controller
            .dispatch(order_request(Some(CustomerRef::Name("김연아".into())), 3))
            .await
            .unwrap();
        let Screen::OrderPlaced { order, customer, book } = screen else {
            panic!("expected OrderPlaced");
        };
        assert_eq!(order.orderid, 12);
        assert_eq!(order.saleprice, 22000);
        assert_eq!(order.orderdate, order_date());
        assert_eq!(customer.name, "김연아");
        assert_eq!(book.bookname, "축구의 이해");

        let screen = controller.dispatch(order_request(None, 1)).await.unwrap();
        let Screen::OrderPlaced { order, customer, .. } = screen else {
            panic!("expected OrderPlaced");
        };
        assert_eq!(order.orderid, 13);
        assert_eq!(customer.custid, 6);
    }

    #[tokio::test]
    async fn test_failed_orders_do_not_write() {
        let controller = controller().await;

        let unknown_name = controller
            .dispatch(order_request(Some(CustomerRef::Name("없는사람".into())), 1))
            .await
            .unwrap();
        assert!(matches!(unknown_name, Screen::ActionFailed { .. }));

        let unknown_book = controller
            .dispatch(order_request(Some(CustomerRef::Id(1)), 99))
            .await
            .unwrap();
        assert_eq!(
            unknown_book,
            Screen::ActionFailed {
                message: "Book not found: 99".into()
            }
        );

        let stats = controller.quick_stats().await.unwrap();
        assert_eq!(stats.order_count, 11);
    }

    #[tokio::test]
    async fn test_registration_outcomes() {
        let controller = controller().await;

        let warning = controller
            .dispatch(ScreenRequest::Registration {
                name: "홍길동".into(),
                address: "".into(),
                phone: "010-0000-0000".into(),
            })
            .await
            .unwrap();
        assert!(matches!(warning, Screen::ValidationWarning { .. }));
        assert_eq!(controller.quick_stats().await.unwrap().customer_count, 6);

        let registered = controller
            .dispatch(ScreenRequest::Registration {
                name: "홍길동".into(),
                address: "서울특별시 강남구".into(),
                phone: "".into(),
            })
            .await
            .unwrap();
        let Screen::CustomerRegistered { customer } = registered else {
            panic!("expected CustomerRegistered");
        };
        assert_eq!(customer.custid, 7);
        assert_eq!(customer.phone, None);
    }

    #[tokio::test]
    async fn test_show_reads_stats_after_write() {
        let controller = controller().await;

        let page = controller
            .show(order_request(Some(CustomerRef::Id(2)), 10))
            .await
            .unwrap();

        assert_eq!(page.menu, Menu::OrderEntry);
        assert_eq!(page.quick_stats.order_count, 12);
        assert_eq!(page.quick_stats.total_sales, Won::new(144000));
    }

    #[tokio::test]
    async fn test_page_json_shape() {
        let controller = controller().await;
        let page = controller
            .show(ScreenRequest::CustomerSearch {
                query: Some("없는사람".into()),
            })
            .await
            .unwrap();

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["menu"], "customer_search");
        assert_eq!(json["screen"], "customer_not_found");
        assert_eq!(json["query"], "없는사람");
        assert_eq!(json["quick_stats"]["customer_count"], 6);
        assert_eq!(json["quick_stats"]["total_sales"], 131000);
    }
}
