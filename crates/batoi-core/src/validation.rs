//! # Validation Module
//!
//! Book form validation for Batoi Books.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Book Form Rules                                    │
//! │                                                                         │
//! │  moduleCode   required                                                  │
//! │  publisher    required, at least 2 characters                           │
//! │  price        required, a number, >= 0, at most 2 decimals              │
//! │  pages        required, a whole number, >= 1                            │
//! │  status       required, one of good | new | bad                         │
//! │  comments     optional                                                  │
//! │                                                                         │
//! │  Every field is checked; each failing field reports its first error.    │
//! │  The stores downstream trust a BookDraft and never re-validate.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use batoi_core::validation::BookForm;
//!
//! let form = BookForm {
//!     module_code: "0021".into(),
//!     publisher: "McGraw Hill".into(),
//!     price: "19.99".into(),
//!     pages: "320".into(),
//!     status: "good".into(),
//!     ..BookForm::default()
//! };
//! let draft = form.validate().unwrap();
//! assert_eq!(draft.price.cents(), 1999);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, FormErrors, ValidationError};
use crate::money::Money;
use crate::types::{Book, BookDraft, BookStatus};
use crate::MIN_PUBLISHER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Book Form
// =============================================================================

/// Raw book form input, every field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub module_code: String,
    pub publisher: String,
    pub price: String,
    pub pages: String,
    pub status: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl BookForm {
    /// Prefills the form from an existing record (edit view).
    pub fn from_book(book: &Book) -> Self {
        BookForm {
            module_code: book.module_code.clone(),
            publisher: book.publisher.clone(),
            price: book.price.to_string(),
            pages: book.pages.to_string(),
            status: book.status.to_string(),
            comments: book.comments.clone(),
            photo: book.photo.clone(),
        }
    }

    /// Checks every field and builds a draft when all of them pass.
    pub fn validate(&self) -> Result<BookDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let module_code = validate_module_code(&self.module_code).map_err(|e| errors.push(e));
        let publisher = validate_publisher(&self.publisher).map_err(|e| errors.push(e));
        let price = validate_price(&self.price).map_err(|e| errors.push(e));
        let pages = validate_pages(&self.pages).map_err(|e| errors.push(e));
        let status = validate_status(&self.status).map_err(|e| errors.push(e));

        match (module_code, publisher, price, pages, status) {
            (Ok(module_code), Ok(publisher), Ok(price), Ok(pages), Ok(status)) => Ok(BookDraft {
                module_code,
                publisher,
                price,
                pages,
                status,
                photo: non_blank(self.photo.as_deref()),
                comments: non_blank(self.comments.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Module code must be present.
pub fn validate_module_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "moduleCode".to_string(),
        });
    }
    Ok(code.to_string())
}

/// Publisher must be present and at least two characters long.
///
/// Blank input counts as missing. The length is measured on the text as
/// entered, surrounding spaces included, and the value is kept verbatim.
///
/// ```rust
/// use batoi_core::validation::validate_publisher;
///
/// assert_eq!(validate_publisher(" a").unwrap(), " a");
/// assert!(validate_publisher("a").is_err());
/// assert!(validate_publisher("   ").is_err());
/// ```
pub fn validate_publisher(publisher: &str) -> ValidationResult<String> {
    if publisher.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "publisher".to_string(),
        });
    }
    if publisher.chars().count() < MIN_PUBLISHER_LEN {
        return Err(ValidationError::TooShort {
            field: "publisher".to_string(),
            min: MIN_PUBLISHER_LEN,
        });
    }
    Ok(publisher.to_string())
}

/// Price must be a non-negative number with at most two decimals.
///
/// Amounts are never rounded: `"10.555"` is an error, not 10.56.
///
/// ```rust
/// use batoi_core::validation::validate_price;
///
/// assert!(validate_price("0").is_ok());
/// assert!(validate_price("12.5").is_ok());
/// assert!(validate_price("-1").is_err());
/// assert!(validate_price("10.555").is_err());
/// assert!(validate_price("twelve").is_err());
/// ```
pub fn validate_price(price: &str) -> ValidationResult<Money> {
    let price = price.trim();
    if price.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }
    let money: Money = price.parse().map_err(|err| match err {
        CoreError::SubCentPrice(_) => ValidationError::TooManyDecimals {
            field: "price".to_string(),
            max: 2,
        },
        _ => ValidationError::NotANumber {
            field: "price".to_string(),
        },
    })?;
    if money.is_negative() {
        return Err(ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: 0,
        });
    }
    Ok(money)
}

/// Pages must be a whole number of at least one.
pub fn validate_pages(pages: &str) -> ValidationResult<u32> {
    let pages = pages.trim();
    if pages.is_empty() {
        return Err(ValidationError::Required {
            field: "pages".to_string(),
        });
    }
    let value: f64 = pages.parse().map_err(|_| ValidationError::NotANumber {
        field: "pages".to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "pages".to_string(),
        });
    }
    if value < 1.0 {
        return Err(ValidationError::BelowMinimum {
            field: "pages".to_string(),
            min: 1,
        });
    }
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ValidationError::NotAnInteger {
            field: "pages".to_string(),
        });
    }
    Ok(value as u32)
}

/// Status must be one of the known conditions.
pub fn validate_status(status: &str) -> ValidationResult<BookStatus> {
    if status.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "status".to_string(),
        });
    }
    status.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookForm {
        BookForm {
            module_code: "0021".to_string(),
            publisher: "McGraw Hill".to_string(),
            price: "19.99".to_string(),
            pages: "320".to_string(),
            status: "new".to_string(),
            comments: Some("  ".to_string()),
            photo: None,
        }
    }

    #[test]
    fn test_valid_form_builds_draft() {
        let draft = valid_form().validate().unwrap();

        assert_eq!(draft.module_code, "0021");
        assert_eq!(draft.price.cents(), 1999);
        assert_eq!(draft.pages, 320);
        assert_eq!(draft.status, BookStatus::New);
        assert_eq!(draft.comments, None);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = BookForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 5);
        for field in ["moduleCode", "publisher", "price", "pages", "status"] {
            assert!(
                matches!(
                    errors.for_field(field),
                    Some(ValidationError::Required { .. })
                ),
                "missing required error for {}",
                field
            );
        }
        assert!(errors.for_field("comments").is_none());
    }

    #[test]
    fn test_validate_publisher() {
        assert!(validate_publisher("SM").is_ok());
        assert!(matches!(
            validate_publisher("S"),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
    }

    #[test]
    fn test_publisher_length_counts_raw_input() {
        assert_eq!(validate_publisher(" a").unwrap(), " a");
        assert!(matches!(
            validate_publisher("  "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price("0").unwrap().cents(), 0);
        assert!(matches!(
            validate_price("abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_price("-0.01"),
            Err(ValidationError::BelowMinimum { min: 0, .. })
        ));
    }

    #[test]
    fn test_price_with_sub_cent_digits_is_rejected() {
        assert!(matches!(
            validate_price("10.555"),
            Err(ValidationError::TooManyDecimals { max: 2, .. })
        ));
        assert_eq!(validate_price("10.55").unwrap().cents(), 1055);

        let form = BookForm {
            price: "10.555".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(matches!(
            errors.for_field("price"),
            Some(ValidationError::TooManyDecimals { .. })
        ));
    }

    #[test]
    fn test_validate_pages() {
        assert_eq!(validate_pages("1").unwrap(), 1);
        assert!(matches!(
            validate_pages("0"),
            Err(ValidationError::BelowMinimum { min: 1, .. })
        ));
        assert!(matches!(
            validate_pages("12.5"),
            Err(ValidationError::NotAnInteger { .. })
        ));
        assert!(matches!(
            validate_pages("many"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("good").unwrap(), BookStatus::Good);
        assert!(matches!(
            validate_status("mint"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            validate_status(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_from_book_prefills_form() {
        let draft = valid_form().validate().unwrap();
        let book = Book::from_draft("3".into(), draft);
        let form = BookForm::from_book(&book);

        assert_eq!(form.price, "19.99");
        assert_eq!(form.pages, "320");
        assert_eq!(form.status, "new");
        assert_eq!(form.validate().unwrap(), book.to_draft());
    }
}
