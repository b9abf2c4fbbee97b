//! # Domain Types
//!
//! Core domain types used throughout Batoi Books.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    BookDraft    │   │     Module      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (BookId)    │   │  (Book - id)    │   │  code           │       │
//! │  │  module_code    │   │  form output,   │   │  cliteral       │       │
//! │  │  price (Money)  │   │  create/update  │   │  vliteral       │       │
//! │  │  status         │   │  payload        │   └─────────────────┘       │
//! │  └────────┬────────┘   └─────────────────┘                             │
//! │           │ copied on add-to-cart                                       │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌──────────────────┐      │
//! │  │   CartEntry     │   │   BookStatus    │   │ NotificationKind │      │
//! │  │  (Book snapshot)│   │  good/new/bad   │   │  success/error   │      │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Normalization
//! The books service hands out ids as numbers or strings depending on how a
//! record was created. [`BookId`] always holds the string form, so `5` and
//! `"5"` compare equal everywhere past the deserialization boundary.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Book Id
// =============================================================================

/// Normalized book identifier (always a string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[ts(export)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        BookId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        BookId(id.to_string())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        BookId(id)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        BookId(id.to_string())
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BookIdVisitor)
    }
}

struct BookIdVisitor;

impl<'de> Visitor<'de> for BookIdVisitor {
    type Value = BookId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a book id as a string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BookId, E> {
        Ok(BookId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<BookId, E> {
        Ok(BookId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BookId, E> {
        Ok(BookId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BookId, E> {
        Ok(BookId(v.to_string()))
    }
}

// =============================================================================
// Book Status
// =============================================================================

/// Physical condition of a second-hand book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Good,
    New,
    Bad,
}

impl BookStatus {
    /// Every status, in the order the form offers them.
    pub const ALL: [BookStatus; 3] = [BookStatus::Good, BookStatus::New, BookStatus::Bad];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Good => "good",
            BookStatus::New => "new",
            BookStatus::Bad => "bad",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "good" => Ok(BookStatus::Good),
            "new" => Ok(BookStatus::New),
            "bad" => Ok(BookStatus::Bad),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: BookStatus::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book record as held by the remote service.
///
/// Fields this crate does not model (`userId`, `soldDate`, ...) are kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,

    /// Code of the course module the book belongs to.
    pub module_code: String,

    pub publisher: String,

    pub price: Money,

    pub pages: u32,

    pub status: BookStatus,

    /// Cover image file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Builds a record from a draft and the id the service assigned.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Book {
            id,
            module_code: draft.module_code,
            publisher: draft.publisher,
            price: draft.price,
            pages: draft.pages,
            status: draft.status,
            photo: draft.photo,
            comments: draft.comments,
            extra: Map::new(),
        }
    }

    /// The editable part of this record.
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            module_code: self.module_code.clone(),
            publisher: self.publisher.clone(),
            price: self.price,
            pages: self.pages,
            status: self.status,
            photo: self.photo.clone(),
            comments: self.comments.clone(),
        }
    }
}

// =============================================================================
// Book Draft
// =============================================================================

/// A book without an id: what a validated form produces and what create and
/// update requests carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub module_code: String,
    pub publisher: String,
    pub price: Money,
    pub pages: u32,
    pub status: BookStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

// =============================================================================
// Cart Entry
// =============================================================================

/// A book frozen at the moment it was put in the cart.
///
/// Stored exactly as the book record, so the cart snapshot reads as a plain
/// JSON array of books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct CartEntry(Book);

impl CartEntry {
    pub fn id(&self) -> &BookId {
        &self.0.id
    }

    pub fn price(&self) -> Money {
        self.0.price
    }

    pub fn book(&self) -> &Book {
        &self.0
    }
}

impl From<&Book> for CartEntry {
    fn from(book: &Book) -> Self {
        CartEntry(book.clone())
    }
}

// =============================================================================
// Module
// =============================================================================

/// A course module books are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub code: String,

    /// Spanish name.
    pub cliteral: String,

    /// Valencian name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vliteral: Option<String>,

    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Notification Kind
// =============================================================================

/// How a transient notification is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

// =============================================================================
// Unit Tests
// =============================================================================
