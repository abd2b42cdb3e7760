//! # Order Commands
//!
//! The order form and placing an order from it.
//!
//! The form hands back identifiers: the buyer by id (or a typed name that is
//! resolved to an id here) and the book by id. The price is never read back
//! from the form; the repository takes it from the Book row.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ApiError;
use crate::screen::{CustomerRef, Screen};
use madang_core::{CoreError, Customer, OrderRequest, PlacedOrder, StoreIdentity};
use madang_db::{Database, DbError};

/// Builds the order form: buyers, preselected buyer, and the book selector.
///
/// A buyer passed in is preselected; otherwise the form falls back to
/// [`default_customer`].
///
/// ## Errors
/// `NOT_FOUND` when the passed-in buyer matches no customer.
pub async fn order_form(
    db: &Database,
    preselect: Option<&CustomerRef>,
    identity: &StoreIdentity,
) -> Result<Screen, ApiError> {
    let customers = db.customers().list().await?;
    let books = db.books().catalog().await?;

    let default_customer = match preselect {
        None => default_customer(&customers, identity).cloned(),
        Some(wanted) => Some(preselected(&customers, wanted)?.clone()),
    };

    Ok(Screen::OrderForm {
        customers,
        default_customer,
        books,
    })
}

/// The preselected buyer: the configured user when present, else the first
/// customer.
pub fn default_customer<'a>(
    customers: &'a [Customer],
    identity: &StoreIdentity,
) -> Option<&'a Customer> {
    customers
        .iter()
        .find(|c| c.name == identity.name)
        .or_else(|| customers.first())
}

// `customers` is ordered by custid, so a shared name picks the lowest id
fn preselected<'a>(
    customers: &'a [Customer],
    wanted: &CustomerRef,
) -> Result<&'a Customer, ApiError> {
    let found = match wanted {
        CustomerRef::Id(custid) => customers.iter().find(|c| c.custid == *custid),
        CustomerRef::Name(name) => customers.iter().find(|c| &c.name == name),
    };

    found.ok_or_else(|| match wanted {
        CustomerRef::Id(custid) => DbError::not_found("Customer", *custid).into(),
        CustomerRef::Name(name) => CoreError::CustomerNotFound(name.clone()).into(),
    })
}

/// Places an order.
///
/// ## Arguments
/// * `customer` - Buyer; `None` uses the form's default buyer
/// * `bookid` - Book to buy
/// * `orderdate` - Date stamped on the order
///
/// ## Errors
/// Unknown buyer name, unknown ids, or any database failure. Nothing is
/// written in those cases.
pub async fn place_order(
    db: &Database,
    customer: Option<&CustomerRef>,
    bookid: i64,
    identity: &StoreIdentity,
    orderdate: NaiveDate,
) -> Result<Screen, ApiError> {
    let custid = resolve_customer(db, customer, identity).await?;
    debug!(custid, bookid, "Resolved order buyer");

    let PlacedOrder {
        order,
        customer,
        book,
    } = db
        .orders()
        .place(&OrderRequest { custid, bookid }, orderdate)
        .await?;

    Ok(Screen::OrderPlaced {
        order,
        customer,
        book,
    })
}

async fn resolve_customer(
    db: &Database,
    customer: Option<&CustomerRef>,
    identity: &StoreIdentity,
) -> Result<i64, ApiError> {
    match customer {
        Some(CustomerRef::Id(custid)) => Ok(*custid),
        Some(CustomerRef::Name(name)) => {
            let matches = db.customers().find_by_name(name).await?;
            matches
                .first()
                .map(|c| c.custid)
                .ok_or_else(|| CoreError::CustomerNotFound(name.clone()).into())
        }
        None => {
            let customers = db.customers().list().await?;
            default_customer(&customers, identity)
                .map(|c| c.custid)
                .ok_or_else(|| CoreError::CustomerNotFound(identity.name.clone()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::screen::tests::{order_date, seeded_db};

    fn customer(custid: i64, name: &str) -> Customer {
        Customer {
            custid,
            name: name.into(),
            address: "주소".into(),
            phone: None,
        }
    }

    #[test]
    fn test_default_customer_prefers_identity() {
        let customers = vec![customer(1, "박지성"), customer(6, "최혜원")];

        let identity = StoreIdentity::default();
        assert_eq!(default_customer(&customers, &identity).map(|c| c.custid), Some(6));

        let stranger = StoreIdentity::new("홍길동", "서울", None);
        assert_eq!(default_customer(&customers, &stranger).map(|c| c.custid), Some(1));

        assert!(default_customer(&[], &identity).is_none());
    }

    #[tokio::test]
    async fn test_form_preselects_given_customer() {
        let db = seeded_db().await;
        let identity = StoreIdentity::default();

        let by_name = order_form(&db, Some(&CustomerRef::Name("김연아".into())), &identity)
            .await
            .unwrap();
        let Screen::OrderForm { default_customer, .. } = by_name else {
            panic!("expected order form");
        };
        assert_eq!(default_customer.map(|c| c.custid), Some(2));

        let by_id = order_form(&db, Some(&CustomerRef::Id(4)), &identity)
            .await
            .unwrap();
        let Screen::OrderForm { default_customer, .. } = by_id else {
            panic!("expected order form");
        };
        assert_eq!(default_customer.map(|c| c.name), Some("추신수".to_string()));

        let err = order_form(&db, Some(&CustomerRef::Name("없는사람".into())), &identity)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_name_is_not_found() {
        let db = seeded_db().await;

        let err = place_order(
            &db,
            Some(&CustomerRef::Name("없는사람".into())),
            1,
            &StoreIdentity::default(),
            order_date(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Customer not found: 없는사람");
        assert_eq!(db.orders().count().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_unknown_customer_id_is_not_found() {
        let db = seeded_db().await;

        let err = place_order(
            &db,
            Some(&CustomerRef::Id(42)),
            1,
            &StoreIdentity::default(),
            order_date(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.message, "Customer not found: 42");
    }

    #[tokio::test]
    async fn test_price_comes_from_book_row() {
        let db = seeded_db().await;

        let screen = place_order(
            &db,
            Some(&CustomerRef::Id(5)),
            9,
            &StoreIdentity::default(),
            order_date(),
        )
        .await
        .unwrap();

        let Screen::OrderPlaced {
            order,
            customer,
            book,
        } = screen
        else {
            panic!("expected OrderPlaced");
        };
        assert_eq!(order.saleprice, book.price);
        assert_eq!(order.saleprice, 7500);
        assert_eq!(customer.custid, 5);
        assert_eq!(book.bookname, "올림픽 이야기");
    }
}
