//! Book dataset loading
//!
//! The catalog ships inside the binary (`data/books.json`). A different
//! dataset file can be supplied through `Config::dataset_path`. Either way the
//! dataset is parsed once at startup and is immutable afterwards; a missing or
//! malformed dataset is fatal because there is nothing to show without it.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Book, BookId};

/// Dataset compiled into the binary
const BUNDLED_DATASET: &str = include_str!("../data/books.json");

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("Failed to read dataset '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Dataset is not a JSON array of books
    #[error("Invalid dataset format: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is empty
    #[error("Book #{index} has an empty '{field}' field")]
    EmptyField { index: usize, field: &'static str },
}

/// Immutable, ordered sequence of books
#[derive(Debug, Clone)]
pub struct Dataset {
    books: Vec<Book>,
}

impl Dataset {
    /// Load the dataset bundled with the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load a dataset from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&content)?;
        debug!("Loaded {} books from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    /// Load the configured dataset, falling back to the bundled one
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    /// Parse a dataset from JSON text
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let books: Vec<Book> = serde_json::from_str(json)?;
        Self::from_books(books)
    }

    /// Build a dataset from already-parsed books
    ///
    /// Every book must have a non-empty id and category. Duplicate ids are
    /// accepted (lookups return the first match) but logged.
    pub fn from_books(books: Vec<Book>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for (index, book) in books.iter().enumerate() {
            if book.id.is_empty() {
                return Err(DatasetError::EmptyField { index, field: "id" });
            }
            if book.category.trim().is_empty() {
                return Err(DatasetError::EmptyField {
                    index,
                    field: "Category",
                });
            }
            if !seen.insert(&book.id) {
                warn!(
                    "Duplicate book id '{}' in dataset; first entry wins",
                    book.id
                );
            }
        }
        Ok(Self { books })
    }

    /// All books in dataset order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// First book with the given id
    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn contains_id(&self, id: &BookId) -> bool {
        self.get(id).is_some()
    }

    /// First book whose full title matches exactly
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }
}
