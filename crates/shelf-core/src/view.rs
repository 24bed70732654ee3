//! View state and book filtering
//!
//! The controller owns the two pieces of navigation state (active category
//! and whether the favorites view is shown). The visible book list is never
//! stored; [`filtered_books`] derives it from the dataset, the view state and
//! the favorites set whenever any of them changes.
//!
//! Deep links are a one-way projection of the view state: [`route_for`]
//! renders a path, and [`ViewController::navigate`] resolves a path once per
//! navigation. Nothing watches the path for changes.

use serde::Serialize;

use crate::categories::ALL_CATEGORY;
use crate::models::{Book, Favorites};

/// Navigation state that selects the visible books
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub active_category: String,
    pub show_favorites: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            show_favorites: false,
        }
    }
}

impl ViewState {
    /// Whether a concrete category filter is applied
    pub fn has_category_filter(&self) -> bool {
        self.active_category != ALL_CATEGORY
    }
}

/// A parsed deep-link path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/category/<slug>`
    Category(String),
    /// `/about`
    About,
    /// Anything else
    NotFound(String),
}

impl Route {
    /// Parse a path such as `/category/ux-design`
    ///
    /// Leading/trailing slashes are optional.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["category", slug] => Route::Category(slug.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }
}

/// What the presentation should show after a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The book list for the current view state
    Books,
    /// The static about page
    About,
    /// A category slug that matches no known category
    CategoryNotFound(String),
    /// An unrecognized path
    NotFound(String),
}

/// Owns the view state and applies navigation transitions
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    /// Start in the initial state ("All", not showing favorites)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Select a category
    ///
    /// Selecting a concrete category leaves the favorites view; selecting
    /// "All" keeps whichever view is active.
    pub fn set_category(&mut self, category: &str) -> &ViewState {
        self.state.active_category = category.to_string();
        if category != ALL_CATEGORY {
            self.state.show_favorites = false;
        }
        &self.state
    }

    /// Show every favorited book, regardless of the previous category
    pub fn show_favorites_view(&mut self) -> &ViewState {
        self.state.show_favorites = true;
        self.state.active_category = ALL_CATEGORY.to_string();
        &self.state
    }

    /// Show the whole catalog
    pub fn show_all_view(&mut self) -> &ViewState {
        self.state.show_favorites = false;
        self.state.active_category = ALL_CATEGORY.to_string();
        &self.state
    }

    /// Apply a deep link once
    ///
    /// The resulting state depends only on the route: `/category/all` is the
    /// same as `/`. An unknown category slug resets to the initial state and
    /// reports [`Page::CategoryNotFound`]; the about page leaves the state
    /// alone.
    pub fn navigate(&mut self, route: &Route, categories: &[String]) -> Page {
        match route {
            Route::Home => {
                self.show_all_view();
                Page::Books
            }
            Route::Category(slug) => match category_from_slug(slug, categories) {
                Some(category) if category == ALL_CATEGORY => {
                    self.show_all_view();
                    Page::Books
                }
                Some(category) => {
                    self.set_category(&category);
                    Page::Books
                }
                None => {
                    self.show_all_view();
                    Page::CategoryNotFound(slug.clone())
                }
            },
            Route::About => Page::About,
            Route::NotFound(path) => Page::NotFound(path.clone()),
        }
    }
}

/// Encode a category label for use in a path
///
/// Lowercases, turns each whitespace run into one hyphen, then drops any
/// character outside `[a-z0-9_-]`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// Find the category whose slug equals `slug`
pub fn category_from_slug(slug: &str, categories: &[String]) -> Option<String> {
    categories.iter().find(|c| slugify(c) == slug).cloned()
}

/// Deep-link path for a view state
pub fn route_for(state: &ViewState) -> String {
    if state.show_favorites || !state.has_category_filter() {
        "/".to_string()
    } else {
        format!("/category/{}", slugify(&state.active_category))
    }
}

/// Books visible for the given state, in dataset order
///
/// In the favorites view only favorited books are considered; the category
/// filter then applies unless it is "All".
pub fn filtered_books<'a>(
    books: &'a [Book],
    state: &ViewState,
    favorites: &Favorites,
) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| !state.show_favorites || favorites.contains(&book.id))
        .filter(|book| !state.has_category_filter() || book.category == state.active_category)
        .collect()
}
