//! # Route Table
//!
//! Static path-to-view map of the application.
//!
//! ```text
//! /                      → home
//! /view-book/:bookId     → view-book
//! /edit-book/:bookId     → edit-book
//! /add-book              → add-book
//! /cart                  → cart
//! /about                 → about
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::BookId;

/// A resolved location in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ViewBook(BookId),
    EditBook(BookId),
    AddBook,
    Cart,
    About,
}

impl Route {
    /// Resolves a path. A trailing slash is ignored; anything else that
    /// matches no entry is an error.
    ///
    /// ```rust
    /// use batoi_core::routes::Route;
    ///
    /// assert_eq!(Route::parse("/cart").unwrap(), Route::Cart);
    /// assert_eq!(Route::parse("/view-book/12").unwrap(), Route::ViewBook("12".into()));
    /// assert!(Route::parse("/nowhere").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Route, CoreError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["view-book", id] => Ok(Route::ViewBook(BookId::from(*id))),
            ["edit-book", id] => Ok(Route::EditBook(BookId::from(*id))),
            ["add-book"] => Ok(Route::AddBook),
            ["cart"] => Ok(Route::Cart),
            ["about"] => Ok(Route::About),
            _ => Err(CoreError::UnknownRoute(trimmed.to_string())),
        }
    }

    /// Route name.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::ViewBook(_) => "view-book",
            Route::EditBook(_) => "edit-book",
            Route::AddBook => "add-book",
            Route::Cart => "cart",
            Route::About => "about",
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ViewBook(id) => format!("/view-book/{}", id),
            Route::EditBook(id) => format!("/edit-book/{}", id),
            Route::AddBook => "/add-book".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::About => "/about".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_route() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
        assert_eq!(Route::parse("/add-book").unwrap(), Route::AddBook);
        assert_eq!(Route::parse("/about/").unwrap(), Route::About);
        assert_eq!(
            Route::parse("/edit-book/abc").unwrap(),
            Route::EditBook(BookId::from("abc"))
        );
    }

    #[test]
    fn test_rejects_unknown_and_incomplete_paths() {
        assert!(Route::parse("/view-book").is_err());
        assert!(Route::parse("/view-book/1/extra").is_err());
        assert!(matches!(
            Route::parse("/books"),
            Err(CoreError::UnknownRoute(p)) if p == "/books"
        ));
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [
            Route::Home,
            Route::ViewBook("4".into()),
            Route::EditBook("4".into()),
            Route::AddBook,
            Route::Cart,
            Route::About,
        ] {
            assert_eq!(Route::parse(&route.path()).unwrap(), route);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Route::ViewBook("1".into()).name(), "view-book");
        assert_eq!(Route::Home.name(), "home");
    }
}
