//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use shelf_core::{Book, ViewState};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book, favorite: bool) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", book.id);
                println!("Title:    {}", book.short_title());
                if let Some(subtitle) = book.subtitle() {
                    println!("Subtitle: {}", subtitle);
                }
                println!("Category: {}", book.category);
                println!("Link:     {}", book.purchase_link);
                if !book.image_url.is_empty() {
                    println!("Cover:    {}", book.image_url);
                }
                println!("Favorite: {}", if favorite { "yes" } else { "no" });
            }
            OutputFormat::Json => {
                println!("{}", book_json(book, favorite));
            }
            OutputFormat::Quiet => {
                println!("{}", book.id);
            }
        }
    }

    /// Print a list of books; `is_favorite` marks favorited entries
    pub fn print_books<F>(&self, books: &[&Book], is_favorite: F)
    where
        F: Fn(&Book) -> bool,
    {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                let id_width = books.iter().map(|b| b.id.as_str().len()).max().unwrap_or(0);
                for book in books {
                    let marker = if is_favorite(*book) { "♥" } else { " " };
                    println!(
                        "{} {:>width$} | {} | {}",
                        marker,
                        book.id.as_str(),
                        truncate(book.short_title(), 40),
                        book.category,
                        width = id_width
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = books
                    .iter()
                    .map(|book| book_json(book, is_favorite(*book)))
                    .collect();
                println!("{}", pretty(&serde_json::Value::Array(json)));
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print a heading describing the current view
    pub fn print_view_header(&self, state: &ViewState, summary: Option<&str>) {
        if self.format != OutputFormat::Human {
            return;
        }
        let title = if state.show_favorites {
            "Favorites".to_string()
        } else if state.has_category_filter() {
            state.active_category.clone()
        } else {
            "All Books".to_string()
        };
        println!("{}", title);
        println!("{}", "─".repeat(title.chars().count()));
        if let Some(summary) = summary {
            println!("{}", summary);
        }
        println!();
    }

    /// Print categories with counts and slugs
    pub fn print_categories(&self, categories: &[(String, usize, String)]) {
        match self.format {
            OutputFormat::Human => {
                let width = categories
                    .iter()
                    .map(|(name, _, _)| name.chars().count())
                    .max()
                    .unwrap_or(0);
                for (name, count, slug) in categories {
                    println!("{:<width$}  {:>3}  /category/{}", name, count, slug, width = width);
                }
                println!("\n{} category(ies)", categories.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(name, count, slug)| {
                        serde_json::json!({"name": name, "count": count, "slug": slug})
                    })
                    .collect();
                println!("{}", pretty(&serde_json::Value::Array(json)));
            }
            OutputFormat::Quiet => {
                for (name, _, _) in categories {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a non-fatal warning to stderr
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn book_json(book: &Book, favorite: bool) -> serde_json::Value {
    serde_json::json!({
        "id": book.id,
        "title": book.title,
        "short_title": book.short_title(),
        "category": book.category,
        "image_url": book.image_url,
        "link": book.purchase_link,
        "favorite": favorite,
    })
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("Crème brûlée recipes", 8), "Crème...");
    }

    #[test]
    fn test_book_json() {
        let book = Book::new("7", "Sprint: Five Days", "Design Process");
        let json = book_json(&book, true);
        assert_eq!(json["id"], "7");
        assert_eq!(json["short_title"], "Sprint");
        assert_eq!(json["favorite"], true);
    }
}
