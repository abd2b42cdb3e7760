//! # Registration Command

use tracing::{info, warn};

use crate::error::ApiError;
use crate::screen::Screen;
use madang_core::{NewCustomer, ValidationError};
use madang_db::Database;

/// Shown when name or address is left empty.
pub const REQUIRED_FIELDS_WARNING: &str = "이름과 주소는 필수 입력 항목입니다.";

/// Registers a customer from raw form input.
///
/// Validation runs first; a rejected form returns
/// `Screen::ValidationWarning` without touching the store.
pub async fn register_customer(
    db: &Database,
    name: &str,
    address: &str,
    phone: &str,
) -> Result<Screen, ApiError> {
    let new_customer = match NewCustomer::new(name, address, phone) {
        Ok(valid) => valid,
        Err(err) => {
            warn!(error = %err, "Registration rejected");
            return Ok(Screen::ValidationWarning {
                message: warning_for(&err),
            });
        }
    };

    let customer = db.customers().register(&new_customer).await?;
    info!(custid = customer.custid, "Registration complete");

    Ok(Screen::CustomerRegistered { customer })
}

fn warning_for(err: &ValidationError) -> String {
    match err {
        ValidationError::Required { .. } => REQUIRED_FIELDS_WARNING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::seeded_db;

    #[tokio::test]
    async fn test_empty_name_writes_nothing() {
        let db = seeded_db().await;

        let screen = register_customer(&db, "", "서울", "").await.unwrap();
        assert_eq!(
            screen,
            Screen::ValidationWarning {
                message: REQUIRED_FIELDS_WARNING.into()
            }
        );
        assert_eq!(db.customers().count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_whitespace_and_long_input_is_stored() {
        let db = seeded_db().await;

        let long_address = "가".repeat(101);
        let screen = register_customer(&db, " ", &long_address, "  ").await.unwrap();
        let Screen::CustomerRegistered { customer } = screen else {
            panic!("expected CustomerRegistered");
        };
        assert_eq!(customer.name, " ");
        assert_eq!(customer.address, long_address);
        assert_eq!(customer.phone.as_deref(), Some("  "));
        assert_eq!(db.customers().count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_values_stored_verbatim() {
        let db = seeded_db().await;

        let screen = register_customer(&db, "홍길동", " 서울특별시 강남구 ", "010-1234-0000")
            .await
            .unwrap();
        let Screen::CustomerRegistered { customer } = screen else {
            panic!("expected CustomerRegistered");
        };
        assert_eq!(customer.custid, 7);
        assert_eq!(customer.address, " 서울특별시 강남구 ");
        assert_eq!(customer.phone.as_deref(), Some("010-1234-0000"));
    }
}
