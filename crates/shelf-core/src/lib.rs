//! Shelf Core Library
//!
//! This crate provides the core functionality for shelf, a curated catalog
//! of design books with locally persisted favorites.
//!
//! # Architecture
//!
//! - **Dataset**: immutable book list, bundled or loaded from a file
//! - **Favorites**: id set persisted through a [`storage::KeyValueStore`]
//! - **View**: category / favorites-view state and the derived book list
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut session = Session::open(&config)?;
//!
//! session.view_mut().set_category("UX Design");
//! let books = session.visible_books();
//! ```
//!
//! # Modules
//!
//! - `session`: Composition of dataset, favorites and view (main entry point)
//! - `models`: Book, BookId and the favorites set
//! - `dataset`: Dataset loading and validation
//! - `categories`: Category derivation and summaries
//! - `favorites`: Favorites persistence and legacy migration
//! - `view`: View state, filtering, slugs and deep-link routes
//! - `storage`: Key-value storage port and adapters
//! - `analytics`: Book selection reporting
//! - `config`: Application configuration

pub mod analytics;
pub mod categories;
pub mod config;
pub mod dataset;
pub mod favorites;
pub mod models;
pub mod session;
pub mod storage;
pub mod view;

pub use categories::{category_summary, derive_categories, ALL_CATEGORY, FAVORITES_LABEL};
pub use config::Config;
pub use dataset::{Dataset, DatasetError};
pub use favorites::{migrate_if_legacy, FavoritesStore, FAVORITES_STORAGE_KEY};
pub use models::{Book, BookId, Favorites};
pub use session::Session;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use view::{
    category_from_slug, filtered_books, route_for, slugify, Page, Route, ViewController,
    ViewState,
};
