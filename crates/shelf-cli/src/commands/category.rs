//! Category command handlers

use anyhow::Result;

use shelf_core::categories::category_counts;
use shelf_core::{category_from_slug, slugify, KeyValueStore, Session};

use crate::output::Output;

/// List categories with book counts and deep-link paths
pub fn list<S: KeyValueStore>(session: &Session<S>, output: &Output) -> Result<()> {
    let categories: Vec<(String, usize, String)> = category_counts(session.dataset().books())
        .into_iter()
        .map(|(name, count)| {
            let slug = slugify(&name);
            (name, count, slug)
        })
        .collect();

    output.print_categories(&categories);
    Ok(())
}

/// Resolve a user-supplied category: exact label, case-insensitive label, or slug
pub fn resolve_category(query: &str, categories: &[String]) -> Option<String> {
    if let Some(exact) = categories.iter().find(|c| c.as_str() == query) {
        return Some(exact.clone());
    }
    if let Some(folded) = categories.iter().find(|c| c.eq_ignore_ascii_case(query)) {
        return Some(folded.clone());
    }
    category_from_slug(query, categories)
}
