//! Book selection reporting
//!
//! Opening a book's purchase link reports an event with its title and
//! category. Reporting is best-effort: a reporter must never fail the
//! operation that triggered it.

use tracing::info;

use crate::models::Book;

/// Receives selection events
pub trait EventReporter {
    fn book_selected(&self, book: &Book);
}

/// Emits selection events as structured log records on `shelf::analytics`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl EventReporter for TracingReporter {
    fn book_selected(&self, book: &Book) {
        info!(
            target: "shelf::analytics",
            book_id = %book.id,
            book_title = %book.title,
            book_category = %book.category,
            "book selected"
        );
    }
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl EventReporter for NoopReporter {
    fn book_selected(&self, _book: &Book) {}
}

/// Pick a reporter based on the `analytics` config flag
pub fn reporter(enabled: bool) -> Box<dyn EventReporter> {
    if enabled {
        Box::new(TracingReporter)
    } else {
        Box::new(NoopReporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_reporters_do_not_panic() {
        let book = Book::new("1", "Sprint", "Design Process");
        reporter(true).book_selected(&book);
        reporter(false).book_selected(&book);
    }
}
