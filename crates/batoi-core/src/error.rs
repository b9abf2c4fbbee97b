//! # Error Types
//!
//! Domain-specific error types for batoi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  batoi-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One field failing one rule                     │
//! │  └── FormErrors       - Every failing field of a submitted form        │
//! │                                                                         │
//! │  batoi-db errors      └── DbError      - Local storage failures        │
//! │  batoi-api errors     └── ClientError  - Remote service failures       │
//! │  CLI errors           └── AppError     - What the user sees            │
//! │                                                                         │
//! │  Flow: ValidationError → FormErrors → CoreError → AppError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No book with this id in the current catalog snapshot.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// No module with this code.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// A path that matches no route.
    #[error("No route matches '{0}'")]
    UnknownRoute(String),

    /// A price that cannot be represented as money.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// A price with a fraction of a cent.
    #[error("Price has more than two decimals: {0}")]
    SubCentPrice(String),

    /// A submitted form failed validation.
    #[error("Invalid book form: {0}")]
    InvalidForm(#[from] FormErrors),

    /// Single-field validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the field it belongs to so the form can show the
/// message next to the right input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value is not a number at all.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Value is a number but not a whole one.
    #[error("{field} must be a whole number")]
    NotAnInteger { field: String },

    /// Numeric value has more decimal places than allowed.
    #[error("{field} must have at most {max} decimals")]
    TooManyDecimals { field: String, max: u32 },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::NotANumber { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::TooManyDecimals { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// All field errors of one form submission, in field order.
///
/// At most one error per field: the first rule a field breaks wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the field already has one.
    pub fn push(&mut self, error: ValidationError) {
        if self.for_field(error.field()).is_none() {
            self.errors.push(error);
        }
    }

    /// The error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
