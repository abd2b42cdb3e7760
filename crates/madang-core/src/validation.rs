//! # Validation Module
//!
//! Form rules for the customer registration screen.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Registration form                                                      │
//! │                                                                         │
//! │  이름     (required)  ── empty? ──► ValidationError::Required           │
//! │  주소     (required)  ── empty? ──► ValidationError::Required           │
//! │  전화번호 (optional)  ── empty? ──► stored as NULL                      │
//! │                                                                         │
//! │  Only the empty string counts as missing. Everything else, spaces      │
//! │  included, is stored exactly as typed.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a customer name.
///
/// ## Example
/// ```rust
/// use madang_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("박지성").is_ok());
/// assert!(validate_customer_name("").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    require("name", name)
}

/// Validates a customer address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    require("address", address)
}

/// Turns an optional phone field into a stored value.
///
/// An empty field means "no phone" and becomes `None`, never `Some("")`.
pub fn normalize_phone(phone: &str) -> Option<String> {
    if phone.is_empty() {
        None
    } else {
        Some(phone.to_string())
    }
}

/// Interprets the customer search box.
///
/// An empty box means "no search" (list everyone). Anything else, spaces
/// included, is searched for exactly as given.
pub fn search_term(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !s.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
