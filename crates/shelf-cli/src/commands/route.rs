//! Deep-link resolution

use anyhow::Result;

use shelf_core::{category_summary, KeyValueStore, Page, Session};

use crate::commands::about;
use crate::output::Output;

/// Resolve a path such as `/category/ux-design` and print the resulting page
pub fn resolve<S: KeyValueStore>(
    session: &mut Session<S>,
    path: String,
    output: &Output,
) -> Result<()> {
    match session.navigate(&path) {
        Page::Books => {
            let state = session.state().clone();
            output.print_view_header(&state, category_summary(&state.active_category));
            let books = session.visible_books();
            output.print_books(&books, |b| session.is_favorite(&b.id));
        }
        Page::About => about::show(output)?,
        Page::CategoryNotFound(slug) => {
            output.message(&format!("Category not found: {}", slug));
            output.message("Back to all books: /");
        }
        Page::NotFound(path) => {
            output.message(&format!("Page not found: {}", path));
        }
    }
    Ok(())
}
