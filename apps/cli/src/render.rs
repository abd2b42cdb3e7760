//! # Terminal Rendering
//!
//! Turns a [`Page`] into text (tables and bar charts) or JSON.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  마당 북스토어 · 고객 조회                                              │
//! │  총 고객 6명 · 총 주문 11건 · 총 매출 131,000원      ◄── QuickStats     │
//! │                                                                         │
//! │  <screen body>                                       ◄── Screen         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering never queries anything; it prints what the screen carries.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::commands::store::InitReport;
use crate::error::ApiError;
use crate::screen::{DashboardView, Page, QuickStats, Screen};
use madang_core::{BookOption, Customer, OrderLine, Won};

/// Width of the longest bar in a chart.
pub const BAR_WIDTH: usize = 30;

const TITLE: &str = "마당 북스토어";

/// Text or JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn page(&self, page: &Page) -> Result<String, ApiError> {
        match self {
            OutputFormat::Text => Ok(render_page(page)),
            OutputFormat::Json => to_json(page),
        }
    }

    pub fn init_report(&self, report: &InitReport) -> Result<String, ApiError> {
        match self {
            OutputFormat::Text => Ok(render_init(report)),
            OutputFormat::Json => to_json(report),
        }
    }

    pub fn error(&self, err: &ApiError) -> String {
        match self {
            OutputFormat::Text => format!("오류: {}", err.message),
            OutputFormat::Json => to_json(err).unwrap_or_else(|_| err.to_string()),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// Table Rows
// =============================================================================

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "주문번호")]
    orderid: i64,
    #[tabled(rename = "고객")]
    name: String,
    #[tabled(rename = "도서")]
    bookname: String,
    #[tabled(rename = "금액")]
    saleprice: Won,
    #[tabled(rename = "주문일")]
    orderdate: String,
}

impl From<&OrderLine> for OrderRow {
    fn from(line: &OrderLine) -> Self {
        OrderRow {
            orderid: line.orderid,
            name: line.name.clone(),
            bookname: line.bookname.clone(),
            saleprice: line.saleprice(),
            orderdate: line.orderdate.to_string(),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "주문번호")]
    orderid: i64,
    #[tabled(rename = "도서")]
    bookname: String,
    #[tabled(rename = "금액")]
    saleprice: Won,
    #[tabled(rename = "주문일")]
    orderdate: String,
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "고객 ID")]
    custid: i64,
    #[tabled(rename = "이름")]
    name: String,
    #[tabled(rename = "주소")]
    address: String,
    #[tabled(rename = "전화번호")]
    phone: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        CustomerRow {
            custid: c.custid,
            name: c.name.clone(),
            address: c.address.clone(),
            phone: phone_or_dash(c),
        }
    }
}

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "도서 ID")]
    bookid: i64,
    #[tabled(rename = "도서")]
    label: String,
}

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "항목")]
    label: String,
    #[tabled(rename = "값")]
    value: String,
    #[tabled(rename = "")]
    bar: String,
}

fn table<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn phone_or_dash(customer: &Customer) -> String {
    customer.phone.clone().unwrap_or_else(|| "-".to_string())
}

/// A bar of `value / max` of [`BAR_WIDTH`] blocks. Any positive value gets at
/// least one block.
pub fn bar(value: i64, max: i64) -> String {
    if value <= 0 || max <= 0 {
        return String::new();
    }
    let scaled = (value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(scaled.clamp(1, BAR_WIDTH))
}

// =============================================================================
// Pages
// =============================================================================

/// Renders a page as text.
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    line(&mut out, format!("{} · {}", TITLE, page.menu.label()));
    line(&mut out, render_quick_stats(&page.quick_stats));
    line(&mut out, "");
    out.push_str(&render_screen(&page.screen));
    out
}

pub fn render_quick_stats(stats: &QuickStats) -> String {
    format!(
        "총 고객 {}명 · 총 주문 {}건 · 총 매출 {}",
        stats.customer_count, stats.order_count, stats.total_sales
    )
}

/// Renders one screen body.
pub fn render_screen(screen: &Screen) -> String {
    let mut out = String::new();

    match screen {
        Screen::Dashboard(view) => render_dashboard(&mut out, view),

        Screen::CustomerDirectory { customers } => {
            line(&mut out, "위 검색창에 고객 이름을 입력하세요. (madang search <이름>)");
            line(&mut out, "");
            line(&mut out, "전체 고객 목록");
            line(&mut out, table(customers.iter().map(CustomerRow::from).collect()));
        }

        Screen::CustomerFound {
            customer,
            history,
            total_spent,
            order_count,
        } => {
            line(&mut out, "고객을 찾았습니다!");
            line(&mut out, format!("  고객 ID   {}", customer.custid));
            line(&mut out, format!("  주소      {}", customer.address));
            line(&mut out, format!("  전화번호  {}", phone_or_dash(customer)));
            line(&mut out, "");
            line(&mut out, format!("{}님의 구매 내역", customer.name));
            if history.is_empty() {
                line(&mut out, "구매 내역이 없습니다.");
            } else {
                let rows: Vec<HistoryRow> = history
                    .iter()
                    .map(|l| HistoryRow {
                        orderid: l.orderid,
                        bookname: l.bookname.clone(),
                        saleprice: l.saleprice(),
                        orderdate: l.orderdate.to_string(),
                    })
                    .collect();
                line(&mut out, table(rows));
                line(
                    &mut out,
                    format!("총 구매 금액: {} ({}건)", total_spent, order_count),
                );
            }
        }

        Screen::CustomerNotFound { query } => {
            line(&mut out, format!("찾는 고객이 없습니다. ({})", query));
        }

        Screen::OrderForm {
            customers,
            default_customer,
            books,
        } => render_order_form(&mut out, customers, default_customer.as_ref(), books),

        Screen::OrderPlaced {
            order,
            customer,
            book,
        } => {
            line(&mut out, "주문이 완료되었습니다!");
            line(&mut out, format!("  주문번호  {}", order.orderid));
            line(&mut out, format!("  구매자    {}", customer.name));
            line(&mut out, format!("  도서      {}", book.bookname));
            line(&mut out, format!("  금액      {}", order.saleprice()));
            line(&mut out, format!("  주문일    {}", order.orderdate));
        }

        Screen::CustomerRegistered { customer } => {
            line(
                &mut out,
                format!(
                    "{}님이 성공적으로 등록되었습니다! (고객 ID {})",
                    customer.name, customer.custid
                ),
            );
        }

        Screen::ValidationWarning { message } => {
            line(&mut out, format!("경고: {}", message));
        }

        Screen::ActionFailed { message } => {
            line(&mut out, format!("오류가 발생했습니다: {}", message));
        }
    }

    out
}

fn render_dashboard(out: &mut String, view: &DashboardView) {
    let summary = &view.summary;

    line(out, "대시보드");
    line(
        out,
        format!(
            "전체 도서 {} · 전체 고객 {} · 전체 주문 {} · 평균 주문액 {}",
            summary.book_count,
            summary.customer_count,
            summary.order_count,
            summary.average_sale()
        ),
    );
    line(out, "");

    line(out, "출판사별 도서 수");
    let max = view.publishers.iter().map(|p| p.count).max().unwrap_or(0);
    let rows: Vec<BarRow> = view
        .publishers
        .iter()
        .map(|p| BarRow {
            label: p.publisher.clone(),
            value: p.count.to_string(),
            bar: bar(p.count, max),
        })
        .collect();
    line(out, table(rows));
    line(out, "");

    line(out, "고객별 구매 금액");
    let max = view.spending.iter().filter_map(|s| s.total).max().unwrap_or(0);
    let rows: Vec<BarRow> = view
        .spending
        .iter()
        .map(|s| BarRow {
            label: s.name.clone(),
            value: s.total.map(|t| Won::new(t).to_string()).unwrap_or_else(|| "-".into()),
            bar: bar(s.total.unwrap_or(0), max),
        })
        .collect();
    line(out, table(rows));
    line(out, "");

    line(out, "최근 주문 내역");
    line(out, table(view.recent_orders.iter().map(OrderRow::from).collect()));
}

fn render_order_form(
    out: &mut String,
    customers: &[Customer],
    default_customer: Option<&Customer>,
    books: &[BookOption],
) {
    line(out, "새 주문 등록");
    match default_customer {
        Some(c) => line(out, format!("구매자 (기본값): {} [고객 ID {}]", c.name, c.custid)),
        None => line(out, "등록된 고객이 없습니다."),
    }
    line(out, "");
    line(out, "구매자 선택");
    line(out, table(customers.iter().map(CustomerRow::from).collect()));
    line(out, "");
    line(out, "도서 선택");
    let rows: Vec<BookRow> = books
        .iter()
        .map(|b| BookRow {
            bookid: b.bookid,
            label: b.label(),
        })
        .collect();
    line(out, table(rows));
    line(out, "");
    line(out, "주문하려면: madang order --customer <이름> --book <도서 ID>");
}

/// Renders the `madang init` report.
pub fn render_init(report: &InitReport) -> String {
    let status = if report.seeded {
        "초기 데이터를 적재했습니다"
    } else {
        "기존 데이터를 유지합니다"
    };

    let mut out = String::new();
    line(&mut out, format!("{} ({}, {})", TITLE, status, report.mode));
    line(&mut out, format!("  파일      {}", report.database_path.display()));
    line(
        &mut out,
        format!(
            "  스키마    {}/{} migrations",
            report.migrations_applied, report.migrations_total
        ),
    );
    line(&mut out, format!("  Book      {}", report.books));
    line(&mut out, format!("  Customer  {}", report.customers));
    line(&mut out, format!("  Orders    {}", report.orders));
    out
}

fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::controller;
    use crate::screen::{Menu, ScreenRequest};

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(3, 3).chars().count(), BAR_WIDTH);
        assert_eq!(bar(1, 3).chars().count(), 10);
        assert_eq!(bar(1, 1000).chars().count(), 1);
        assert_eq!(bar(0, 3), "");
        assert_eq!(bar(5, 0), "");
    }

    #[test]
    fn test_quick_stats_line() {
        let stats = QuickStats {
            customer_count: 6,
            order_count: 11,
            total_sales: Won::new(131000),
        };
        assert_eq!(
            render_quick_stats(&stats),
            "총 고객 6명 · 총 주문 11건 · 총 매출 131,000원"
        );
    }

    #[test]
    fn test_messages() {
        let text = render_screen(&Screen::CustomerNotFound {
            query: "없는사람".into(),
        });
        assert!(text.contains("찾는 고객이 없습니다."));

        let text = render_screen(&Screen::ActionFailed {
            message: "Book not found: 99".into(),
        });
        assert!(text.contains("Book not found: 99"));
    }

    #[tokio::test]
    async fn test_dashboard_text() {
        let controller = controller().await;
        let page = controller.show(ScreenRequest::Dashboard).await.unwrap();

        let text = render_page(&page);
        assert!(text.starts_with("마당 북스토어 · 홈"));
        assert!(text.contains("총 매출 131,000원"));
        assert!(text.contains("평균 주문액 11,909원"));
        assert!(text.contains("굿스포츠"));
        assert!(text.contains("Olympic Champions"));
    }

    #[tokio::test]
    async fn test_customer_found_text() {
        let controller = controller().await;
        let page = controller
            .show(ScreenRequest::CustomerSearch {
                query: Some("박지성".into()),
            })
            .await
            .unwrap();

        assert_eq!(page.menu, Menu::CustomerSearch);
        let text = render_page(&page);
        assert!(text.contains("영국 맨체스타"));
        assert!(text.contains("총 구매 금액: 39,000원 (3건)"));
    }

    #[tokio::test]
    async fn test_json_output_is_the_view_model() {
        let controller = controller().await;
        let page = controller.show(ScreenRequest::Dashboard).await.unwrap();

        let json = OutputFormat::Json.page(&page).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["screen"], "dashboard");
        assert_eq!(value["summary"]["order_count"], 11);
        assert_eq!(value["recent_orders"][0]["orderdate"], "2026-10-16");
    }
}
