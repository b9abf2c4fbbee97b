//! # Catalog Rules
//!
//! Cover images for books added without a photo. Each course module has a
//! reference textbook whose cover stands in for the missing picture.

/// Image used when a module has no reference cover.
pub const DEFAULT_BOOK_IMAGE: &str = "logoBatoi.png";

const MODULE_IMAGES: &[(&str, &str)] = &[
    ("0021", "9788448635015.jpg"),
    ("0374", "9788448626648.jpg"),
    ("0375", "9788448626655.jpg"),
    ("0376", "9788448626662.jpg"),
    ("0378", "9788448626686.jpg"),
    ("0612", "9788448632663.jpg"),
    ("1371", "9788448638719_1.jpg"),
    ("1349", "9788448638900.jpg"),
    ("1353", "9788448638986.jpg"),
];

/// Returns the cover image for a module code.
///
/// ```rust
/// use batoi_core::catalog::{module_image, DEFAULT_BOOK_IMAGE};
///
/// assert_eq!(module_image("0021"), "9788448635015.jpg");
/// assert_eq!(module_image("9999"), DEFAULT_BOOK_IMAGE);
/// ```
pub fn module_image(module_code: &str) -> &'static str {
    let code = module_code.trim();
    MODULE_IMAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_BOOK_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_modules() {
        assert_eq!(module_image("0021"), "9788448635015.jpg");
        assert_eq!(module_image("0612"), "9788448632663.jpg");
        assert_eq!(module_image("1371"), "9788448638719_1.jpg");
    }

    #[test]
    fn test_unknown_module_falls_back() {
        assert_eq!(module_image("9999"), "logoBatoi.png");
        assert_eq!(module_image(""), DEFAULT_BOOK_IMAGE);
    }
}
