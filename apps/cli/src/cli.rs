//! # Command Line
//!
//! ```text
//! batoi [--config <file>] [--json] <command>
//!
//!   books list | show <id> | add <fields> | edit <id> <fields> | delete <id>
//!   cart  show | add <id>  | remove <id>  | clear
//!   modules list
//!   open <path>            e.g. `open /view-book/12`
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use batoi_core::{BookForm, BookId};

use crate::commands::{book, cart, module, navigation};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::output::{self, Output};

#[derive(Debug, Parser)]
#[command(name = "batoi", version, about = "Batoi Books catalog and cart")]
pub struct Cli {
    /// Config file (defaults to batoi.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit the catalog
    Books {
        #[command(subcommand)]
        action: BooksCommand,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Course modules
    Modules {
        #[command(subcommand)]
        action: ModulesCommand,
    },
    /// Open an application path such as `/cart` or `/view-book/3`
    Open { path: String },
}

#[derive(Debug, Subcommand)]
pub enum BooksCommand {
    List,
    Show { id: String },
    Add(BookFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ModulesCommand {
    List,
}

/// Book form fields. On `edit`, omitted fields keep their current value.
#[derive(Debug, Clone, Default, Args)]
pub struct BookFields {
    #[arg(long = "module")]
    pub module_code: Option<String>,
    #[arg(long)]
    pub publisher: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub pages: Option<String>,
    /// good, new or bad
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub comments: Option<String>,
    #[arg(long)]
    pub photo: Option<String>,
}

impl BookFields {
    /// Writes the given fields over `form`.
    pub fn apply(self, mut form: BookForm) -> BookForm {
        if let Some(v) = self.module_code {
            form.module_code = v;
        }
        if let Some(v) = self.publisher {
            form.publisher = v;
        }
        if let Some(v) = self.price {
            form.price = v;
        }
        if let Some(v) = self.pages {
            form.pages = v;
        }
        if let Some(v) = self.status {
            form.status = v;
        }
        if self.comments.is_some() {
            form.comments = self.comments;
        }
        if self.photo.is_some() {
            form.photo = self.photo;
        }
        form
    }
}

/// Runs one command against the context.
pub async fn execute(ctx: &AppContext, command: Command) -> AppResult<Output> {
    debug!(?command, "Executing command");

    let out = match command {
        Command::Books { action } => match action {
            BooksCommand::List => Output::Catalog(book::list_books(ctx).await?),
            BooksCommand::Show { id } => Output::Book(book::get_book(ctx, &BookId::new(id)).await?),
            BooksCommand::Add(fields) => {
                Output::Book(book::add_book(ctx, fields.apply(BookForm::default())).await?)
            }
            BooksCommand::Edit { id, fields } => {
                let id = BookId::new(id);
                let current = book::get_book(ctx, &id).await?;
                let form = fields.apply(BookForm::from_book(&current));
                Output::Book(book::edit_book(ctx, &id, form).await?)
            }
            BooksCommand::Delete { id } => {
                book::delete_book(ctx, &BookId::new(id)).await?;
                Output::Done
            }
        },
        Command::Cart { action } => Output::Cart(match action {
            CartCommand::Show => cart::get_cart(ctx),
            CartCommand::Add { id } => cart::add_to_cart(ctx, &BookId::new(id)).await?,
            CartCommand::Remove { id } => cart::remove_from_cart(ctx, &BookId::new(id)).await?,
            CartCommand::Clear => cart::clear_cart(ctx).await?,
        }),
        Command::Modules {
            action: ModulesCommand::List,
        } => Output::Modules(module::list_modules(ctx).await?),
        Command::Open { path } => Output::View(navigation::open_path(ctx, &path).await?),
    };
    Ok(out)
}

/// Renders `out` as text or JSON.
pub fn render(out: &Output, json: bool) -> AppResult<String> {
    if json {
        serde_json::to_string_pretty(out).map_err(|e| AppError::internal(e.to_string()))
    } else {
        Ok(output::to_text(out))
    }
}
