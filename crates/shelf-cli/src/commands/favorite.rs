//! Favorite command handlers

use anyhow::Result;

use shelf_core::{KeyValueStore, Session};

use crate::commands::book::resolve_book;
use crate::output::Output;

/// Toggle a book's favorite status
pub fn toggle<S: KeyValueStore>(
    session: &mut Session<S>,
    query: String,
    output: &Output,
) -> Result<()> {
    let book = resolve_book(session, &query)?;
    let id = book.id.clone();
    let title = book.short_title().to_string();

    let added = session.toggle_favorite(&id)?;
    if added {
        output.success(&format!("Added '{}' to favorites", title));
    } else {
        output.success(&format!("Removed '{}' from favorites", title));
    }

    if let Some(error) = session.storage_warning() {
        output.warn(&format!(
            "Favorites could not be saved and will be lost on exit: {}",
            error
        ));
    }
    Ok(())
}

/// List favorites in the order they were added
pub fn list<S: KeyValueStore>(session: &Session<S>, output: &Output) -> Result<()> {
    let books = session.favorite_books();
    if books.is_empty() && !output.is_quiet() && !output.is_json() {
        println!("No favorites yet. Add one with: shelf favorite <id>");
        return Ok(());
    }
    output.print_books(&books, |_| true);

    let missing = session.favorites().len() - books.len();
    if missing > 0 {
        output.warn(&format!(
            "{} favorite(s) refer to books not in the current dataset",
            missing
        ));
    }
    Ok(())
}
