//! Book command handlers

use anyhow::{bail, Result};

use shelf_core::{category_summary, Book, BookId, KeyValueStore, Session, FAVORITES_LABEL};

use crate::commands::category::resolve_category;
use crate::output::Output;

/// List books for a view: optionally favorites only and/or one category
///
/// Applies the same transitions as the TUI: the favorites view first, then
/// the category (which leaves the favorites view unless it is "All").
pub fn list<S: KeyValueStore>(
    session: &mut Session<S>,
    category: Option<String>,
    favorites: bool,
    output: &Output,
) -> Result<()> {
    if favorites {
        session.view_mut().show_favorites_view();
    }

    if let Some(query) = category {
        match resolve_category(&query, session.categories()) {
            Some(label) => {
                session.view_mut().set_category(&label);
            }
            None => {
                output.message(&format!("Category not found: {}", query));
                output.print_books(&[], |_| false);
                return Ok(());
            }
        }
    }

    let state = session.state().clone();
    let summary = if state.show_favorites {
        category_summary(FAVORITES_LABEL)
    } else {
        category_summary(&state.active_category)
    };
    output.print_view_header(&state, summary);

    let books = session.visible_books();
    if books.is_empty() && !output.is_quiet() && !output.is_json() {
        if state.show_favorites {
            println!("No books found. Add some favorites!");
        } else {
            println!("No books found. Try a different category.");
        }
        return Ok(());
    }
    output.print_books(&books, |b| session.is_favorite(&b.id));
    Ok(())
}

/// Show a single book
pub fn show<S: KeyValueStore>(session: &Session<S>, query: String, output: &Output) -> Result<()> {
    let book = resolve_book(session, &query)?;
    output.print_book(book, session.is_favorite(&book.id));
    Ok(())
}

/// Open a book's purchase link in the browser
///
/// The selection is reported first. Failing to launch a browser is not an
/// error; the link is printed instead.
pub fn open<S: KeyValueStore>(session: &Session<S>, query: String, output: &Output) -> Result<()> {
    let book = resolve_book(session, &query)?;
    session.report_selection(book);

    if book.purchase_link.is_empty() {
        output.warn(&format!("'{}' has no purchase link", book.short_title()));
        return Ok(());
    }

    match open::that(&book.purchase_link) {
        Ok(()) => output.success(&format!("Opened '{}'", book.short_title())),
        Err(e) => {
            output.warn(&format!("Could not open browser: {}", e));
            output.message(&book.purchase_link);
        }
    }
    Ok(())
}

/// Find a book by exact id, or by a unique case-insensitive title prefix
pub fn resolve_book<'a, S: KeyValueStore>(session: &'a Session<S>, query: &str) -> Result<&'a Book> {
    if let Some(book) = session.book(&BookId::new(query)) {
        return Ok(book);
    }

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        bail!("Book not found: '{}'", query);
    }

    let matches: Vec<&Book> = session
        .dataset()
        .iter()
        .filter(|b| b.title.to_lowercase().starts_with(&needle))
        .collect();

    match matches.len() {
        0 => bail!("Book not found: '{}'", query),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple books match '{}':", query);
            for book in &matches {
                eprintln!("  {} - {}", book.id, book.short_title());
            }
            bail!("Ambiguous book. Use the ID or more of the title.");
        }
    }
}
