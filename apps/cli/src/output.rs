//! Plain-text rendering of command results.

use std::fmt::Write;

use serde::Serialize;

use batoi_core::{Book, BookForm, Money};

use crate::commands::book::CatalogView;
use crate::commands::cart::CartView;
use crate::commands::module::ModuleView;
use crate::commands::navigation::View;

/// Result of one command, ready to print.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Catalog(CatalogView),
    Book(Book),
    Cart(CartView),
    Modules(Vec<ModuleView>),
    View(View),
    Done,
}

pub fn to_text(out: &Output) -> String {
    match out {
        Output::Catalog(catalog) => catalog_text(catalog),
        Output::Book(book) => book_text(book),
        Output::Cart(cart) => cart_text(cart),
        Output::Modules(modules) => modules_text(modules),
        Output::View(view) => view_text(view),
        Output::Done => String::new(),
    }
}

fn catalog_text(catalog: &CatalogView) -> String {
    let mut text = String::new();
    for book in &catalog.books {
        let _ = writeln!(text, "{}", book_row(book));
    }
    let _ = write!(
        text,
        "{} books, {} € in total",
        catalog.count, catalog.total_price
    );
    text
}

fn book_row(book: &Book) -> String {
    format!(
        "{:>5}  {:<6} {:<28} {:>10}  {}",
        book.id,
        book.module_code,
        book.publisher,
        book.price.format_eur(),
        book.status
    )
}

fn book_text(book: &Book) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Id:        {}", book.id);
    let _ = writeln!(text, "Module:    {}", book.module_code);
    let _ = writeln!(text, "Publisher: {}", book.publisher);
    let _ = writeln!(text, "Price:     {}", book.price.format_eur());
    let _ = writeln!(text, "Pages:     {}", book.pages);
    let _ = writeln!(text, "Status:    {}", book.status);
    if let Some(photo) = &book.photo {
        let _ = writeln!(text, "Photo:     {}", photo);
    }
    if let Some(comments) = &book.comments {
        let _ = writeln!(text, "Comments:  {}", comments);
    }
    text.trim_end().to_string()
}

fn cart_text(cart: &CartView) -> String {
    if cart.items.is_empty() {
        return "The cart is empty".to_string();
    }

    let mut text = String::new();
    for entry in &cart.items {
        let _ = writeln!(text, "{}", book_row(entry.book()));
    }
    let _ = write!(text, "{} in cart, total {} €", cart.count, cart.total);
    text
}

fn modules_text(modules: &[ModuleView]) -> String {
    modules
        .iter()
        .map(|m| format!("{}  {}  ({})", m.code, m.literal, m.image))
        .collect::<Vec<_>>()
        .join("\n")
}

fn form_text(form: &BookForm) -> String {
    let price = form
        .price
        .parse::<Money>()
        .map(|m| m.format_eur())
        .unwrap_or_else(|_| form.price.clone());
    format!(
        "module={} publisher={} price={} pages={} status={}",
        form.module_code, form.publisher, price, form.pages, form.status
    )
}

fn view_text(view: &View) -> String {
    let body = match view {
        View::Home(catalog) => catalog_text(catalog),
        View::ViewBook(book) => book_text(book),
        View::EditBook(form) => form_text(form),
        View::AddBook(_) => "Empty book form".to_string(),
        View::Cart(cart) => cart_text(cart),
        View::About(about) => about.clone(),
    };
    format!("== {} ==\n{}", view.name(), body)
}
