//! Category derivation
//!
//! Categories are never stored; they are derived from the dataset with the
//! synthetic "All" category first, then every distinct label in the order it
//! first appears.

use std::collections::HashSet;

use crate::models::Book;

/// Pseudo-category meaning "no category filter"
pub const ALL_CATEGORY: &str = "All";

/// Label used for the favorites view
pub const FAVORITES_LABEL: &str = "Favorites";

/// Derive the category list: "All" followed by distinct labels in first-seen order
pub fn derive_categories(books: &[Book]) -> Vec<String> {
    let mut seen = HashSet::from([ALL_CATEGORY]);
    let mut categories = vec![ALL_CATEGORY.to_string()];
    for book in books {
        if seen.insert(book.category.as_str()) {
            categories.push(book.category.clone());
        }
    }
    categories
}

/// Number of books per derived category (including "All")
pub fn category_counts(books: &[Book]) -> Vec<(String, usize)> {
    derive_categories(books)
        .into_iter()
        .map(|category| {
            let count = if category == ALL_CATEGORY {
                books.len()
            } else {
                books.iter().filter(|b| b.category == category).count()
            };
            (category, count)
        })
        .collect()
}

/// Short blurb describing a category
pub fn category_summary(category: &str) -> Option<&'static str> {
    let summary = match category {
        ALL_CATEGORY => "A complete collection of UI/UX design books covering everything from basic principles to advanced research methods to soft skills.",
        "UX Design" => "Essential reading for understanding user behavior, usability, and the strategy behind successful digital products.",
        "UI Design" => "Books focused on visual hierarchy, typography, color theory, and the aesthetics of interface design.",
        "Interaction Design" => "Guides on how users engage with products, focusing on flow, feedback, and interactive patterns.",
        "Design Fundamentals" => "Mastering core principles is the secret to better AI prompting. Understanding hierarchy and color theory allows you to direct AI tools with precision instead of trial and error.",
        "User Research" => "Methodologies for gathering deep insights into user needs and testing design assumptions.",
        "Portfolio" => "Strategies for showcasing your design process and landing roles in the UI/UX industry.",
        "Design Process" => "Frameworks like Design Thinking and Lean UX that help teams build the right things efficiently.",
        "Complementary Skills" => "Soft skills that help you grow beyond just pixels.",
        FAVORITES_LABEL => "Your curated collection of design wisdom. Favorites are saved locally so you can easily reference them later.",
        _ => return None,
    };
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(categories: &[&str]) -> Vec<Book> {
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| Book::new(i.to_string(), format!("Book {}", i), *c))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_all() {
        assert_eq!(derive_categories(&[]), vec!["All"]);
    }

    #[test]
    fn test_first_seen_order_without_duplicates() {
        let books = books(&["UX", "UI", "UX", "Research", "UI"]);
        assert_eq!(derive_categories(&books), vec!["All", "UX", "UI", "Research"]);
    }

    #[test]
    fn test_all_is_first_and_labels_unique() {
        let books = books(&["B", "A", "C", "A", "B", "D"]);
        let categories = derive_categories(&books);
        assert_eq!(categories[0], ALL_CATEGORY);
        let unique: HashSet<_> = categories.iter().collect();
        assert_eq!(unique.len(), categories.len());
    }

    #[test]
    fn test_literal_all_label_is_not_repeated() {
        let books = books(&["All", "UX"]);
        assert_eq!(derive_categories(&books), vec!["All", "UX"]);
    }

    #[test]
    fn test_category_counts() {
        let books = books(&["UX", "UI", "UX"]);
        assert_eq!(
            category_counts(&books),
            vec![
                ("All".to_string(), 3),
                ("UX".to_string(), 2),
                ("UI".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_category_summary() {
        assert!(category_summary("All").is_some());
        assert!(category_summary("UX Design").unwrap().contains("usability"));
        assert!(category_summary("Favorites").is_some());
        assert!(category_summary("Knitting").is_none());
    }
}
