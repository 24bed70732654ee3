//! Browsing session
//!
//! A `Session` wires the immutable dataset, the derived categories, the
//! favorites store and the view controller together. It is the entry point
//! used by both the CLI commands and the TUI.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open(&config)?;
//!
//! session.view_mut().set_category("UX Design");
//! for book in session.visible_books() {
//!     println!("{}", book.short_title());
//! }
//!
//! session.toggle_favorite(&BookId::new("3"))?;
//! ```

use anyhow::{Context, Result};
use tracing::debug;

use crate::analytics::{self, EventReporter};
use crate::categories::derive_categories;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::favorites::FavoritesStore;
use crate::models::{Book, BookId, Favorites};
use crate::storage::{FileStorage, KeyValueStore};
use crate::view::{filtered_books, Page, Route, ViewController, ViewState};

/// Dataset, favorites and view state for one browsing session
pub struct Session<S: KeyValueStore> {
    dataset: Dataset,
    categories: Vec<String>,
    favorites: FavoritesStore<S>,
    view: ViewController,
    reporter: Box<dyn EventReporter>,
}

impl Session<FileStorage> {
    /// Open a session using the configured dataset and on-disk favorites
    ///
    /// Fails only if the dataset cannot be loaded.
    pub fn open(config: &Config) -> Result<Self> {
        let dataset = Dataset::load(config.dataset_path.as_deref())
            .context("Failed to load book dataset")?;
        let storage = FileStorage::new(&config.data_dir);

        Ok(Self::new(
            dataset,
            storage,
            &config.favorites_key,
            analytics::reporter(config.analytics),
        ))
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Assemble a session and restore favorites from `storage`
    pub fn new(
        dataset: Dataset,
        storage: S,
        favorites_key: &str,
        reporter: Box<dyn EventReporter>,
    ) -> Self {
        let categories = derive_categories(dataset.books());
        let mut favorites = FavoritesStore::new(storage, favorites_key);
        favorites.hydrate(&dataset);
        debug!(
            "Session opened: {} books, {} categories, {} favorites",
            dataset.len(),
            categories.len(),
            favorites.len()
        );

        Self {
            dataset,
            categories,
            favorites,
            view: ViewController::new(),
            reporter,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Derived categories, "All" first
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn favorites(&self) -> &Favorites {
        self.favorites.favorites()
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    /// Books for the current view state
    pub fn visible_books(&self) -> Vec<&Book> {
        filtered_books(
            self.dataset.books(),
            self.view.state(),
            self.favorites.favorites(),
        )
    }

    /// Favorited books in the order they were added
    pub fn favorite_books(&self) -> Vec<&Book> {
        self.favorites
            .favorites()
            .iter()
            .filter_map(|id| self.dataset.get(id))
            .collect()
    }

    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.dataset.get(id)
    }

    pub fn is_favorite(&self, id: &BookId) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Toggle a favorite; returns true if the book is now a favorite
    ///
    /// Unknown ids are rejected so typos never end up in storage.
    pub fn toggle_favorite(&mut self, id: &BookId) -> Result<bool> {
        if !self.dataset.contains_id(id) {
            anyhow::bail!("Book not found: {}", id);
        }
        Ok(self.favorites.toggle(id).contains(id))
    }

    /// Message of the last failed favorites write, if any
    pub fn storage_warning(&self) -> Option<&str> {
        self.favorites.last_write_error()
    }

    /// Apply a deep-link path
    pub fn navigate(&mut self, path: &str) -> Page {
        let route = Route::parse(path);
        self.view.navigate(&route, &self.categories)
    }

    /// Report that a book was selected for purchase
    pub fn report_selection(&self, book: &Book) {
        self.reporter.book_selected(book);
    }
}
