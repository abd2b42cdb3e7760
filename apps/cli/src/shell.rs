//! # Interactive Shell
//!
//! A menu loop over the four screens, for `madang shell`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  loop                                                                   │
//! │    Select menu ──► 홈 | 고객 조회 | 주문하기 | 고객 등록 | 종료         │
//! │        │                                                                │
//! │        ├── 고객 조회: Input name (empty lists everyone)                 │
//! │        ├── 주문하기:  Select buyer, Select book, Confirm               │
//! │        └── 고객 등록: Input name, address, phone                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │    ScreenController::show(request) ──► print page                      │
//! │    errors are printed and the loop continues                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! dialoguer blocks on the terminal, so every prompt runs on
//! `spawn_blocking` to keep the runtime free.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::render::OutputFormat;
use crate::screen::{CustomerRef, Menu, Screen, ScreenController, ScreenRequest};
use madang_core::{BookOption, Customer};

const QUIT_LABEL: &str = "종료";

/// Runs the menu loop until the user quits.
pub async fn run_shell(controller: &ScreenController, format: OutputFormat) -> Result<(), ApiError> {
    info!("Interactive shell started");

    loop {
        let Some(menu) = prompt(select_menu).await? else {
            break;
        };

        let request = match menu {
            Menu::Dashboard => Some(ScreenRequest::Dashboard),
            Menu::CustomerSearch => Some(prompt(search_form).await?),
            Menu::OrderEntry => order_flow(controller).await?,
            Menu::Registration => Some(prompt(registration_form).await?),
        };

        let Some(request) = request else {
            debug!("Order cancelled");
            println!("주문을 취소했습니다.");
            continue;
        };

        match controller.show(request).await {
            Ok(page) => println!("{}", format.page(&page)?),
            Err(err) => eprintln!("{}", format.error(&err)),
        }
        println!();
    }

    info!("Interactive shell closed");
    Ok(())
}

/// Runs a blocking prompt off the async runtime.
async fn prompt<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("prompt task failed: {}", e)))?
}

/// Sidebar entries followed by the quit entry.
pub fn menu_items() -> Vec<&'static str> {
    Menu::ALL
        .iter()
        .map(Menu::label)
        .chain(std::iter::once(QUIT_LABEL))
        .collect()
}

fn select_menu() -> Result<Option<Menu>, ApiError> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("메뉴")
        .items(&menu_items())
        .default(0)
        .interact()?;

    Ok(Menu::ALL.get(choice).copied())
}

fn search_form() -> Result<ScreenRequest, ApiError> {
    let query: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("고객 이름 검색 (비우면 전체 목록)")
        .allow_empty(true)
        .interact_text()?;

    Ok(ScreenRequest::CustomerSearch { query: Some(query) })
}

fn registration_form() -> Result<ScreenRequest, ApiError> {
    let theme = ColorfulTheme::default();

    // Blank answers are allowed here so the form can report them
    let name: String = Input::with_theme(&theme)
        .with_prompt("이름")
        .allow_empty(true)
        .interact_text()?;
    let address: String = Input::with_theme(&theme)
        .with_prompt("주소")
        .allow_empty(true)
        .interact_text()?;
    let phone: String = Input::with_theme(&theme)
        .with_prompt("전화번호 (선택)")
        .allow_empty(true)
        .interact_text()?;

    Ok(ScreenRequest::Registration {
        name,
        address,
        phone,
    })
}

/// Shows the order form and asks for buyer, book and confirmation.
///
/// Returns `None` when the user cancels or there is nothing to order.
async fn order_flow(controller: &ScreenController) -> Result<Option<ScreenRequest>, ApiError> {
    let form = controller
        .dispatch(ScreenRequest::OrderEntry {
            customer: None,
            book: None,
        })
        .await?;

    let Screen::OrderForm {
        customers,
        default_customer,
        books,
    } = form
    else {
        return Ok(None);
    };

    if customers.is_empty() || books.is_empty() {
        return Ok(None);
    }

    let default_index = default_customer
        .as_ref()
        .and_then(|d| customers.iter().position(|c| c.custid == d.custid))
        .unwrap_or(0);

    prompt(move || order_prompts(&customers, default_index, &books)).await
}

fn order_prompts(
    customers: &[Customer],
    default_index: usize,
    books: &[BookOption],
) -> Result<Option<ScreenRequest>, ApiError> {
    let theme = ColorfulTheme::default();

    let customer_labels: Vec<String> = customers.iter().map(customer_label).collect();
    let who = Select::with_theme(&theme)
        .with_prompt("구매자 선택")
        .items(&customer_labels)
        .default(default_index)
        .interact()?;

    let book_labels: Vec<String> = books.iter().map(BookOption::label).collect();
    let which = Select::with_theme(&theme)
        .with_prompt("도서 선택")
        .items(&book_labels)
        .default(0)
        .interact()?;

    let (Some(customer), Some(book)) = (customers.get(who), books.get(which)) else {
        return Ok(None);
    };

    println!("구매자: {}", customer.name);
    println!("도서: {}", book.bookname);
    println!("금액: {}", book.price());

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("주문 완료?")
        .default(true)
        .interact()?;

    if !confirmed {
        return Ok(None);
    }

    Ok(Some(ScreenRequest::OrderEntry {
        customer: Some(CustomerRef::Id(customer.custid)),
        book: Some(book.bookid),
    }))
}

/// Buyer entry in the selector; the id tells apart customers sharing a name.
pub fn customer_label(customer: &Customer) -> String {
    format!("{} (#{})", customer.name, customer.custid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_items_end_with_quit() {
        assert_eq!(
            menu_items(),
            vec!["홈", "고객 조회", "주문하기", "고객 등록", "종료"]
        );
        // The quit entry maps to no menu
        assert_eq!(Menu::ALL.get(menu_items().len() - 1), None);
    }

    #[test]
    fn test_customer_label() {
        let customer = Customer {
            custid: 6,
            name: "최혜원".into(),
            address: "대한민국 인천시".into(),
            phone: None,
        };
        assert_eq!(customer_label(&customer), "최혜원 (#6)");
    }
}
