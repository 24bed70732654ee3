//! Data models for shelf
//!
//! Defines the catalog entry (`Book`), its identifier (`BookId`) and the
//! user's favorites set. Field names on `Book` follow the bundled dataset
//! file exactly (`Title`, `Category`, `Image URL`, `Link`).

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a book
///
/// The dataset may author ids as JSON strings or integers. Both forms are
/// normalized to their textual representation, so `7` and `"7"` refer to
/// the same book.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Create an id from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Id for a numeric JSON value
    ///
    /// Integral values print without a fraction, so `7`, `7.0` and `"7"`
    /// are the same id wherever they were read from.
    pub fn from_number(n: &serde_json::Number) -> Self {
        let text = if let Some(i) = n.as_i64() {
            i.to_string()
        } else if let Some(u) = n.as_u64() {
            u.to_string()
        } else {
            // f64 Display drops a zero fraction: 7.0 prints as "7"
            n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
        };
        Self(text)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for BookId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => BookId(s),
            RawId::Number(n) => BookId::from_number(&n),
        })
    }
}

/// A catalog entry
///
/// Loaded once from the dataset and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: BookId,
    /// Full title, optionally with a colon-delimited subtitle
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Image URL", default)]
    pub image_url: String,
    /// Purchase link
    #[serde(rename = "Link", default)]
    pub purchase_link: String,
}

impl Book {
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            image_url: String::new(),
            purchase_link: String::new(),
        }
    }

    /// Display title: everything before the first colon
    pub fn short_title(&self) -> &str {
        self.title
            .split(':')
            .next()
            .unwrap_or(&self.title)
            .trim()
    }

    /// Subtitle after the first colon, if any
    pub fn subtitle(&self) -> Option<&str> {
        self.title
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }
}

/// The user's favorited book ids
///
/// Behaves as a set (no duplicates) but remembers the order in which
/// entries were added, so listings are stable across sessions.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Favorites(Vec<BookId>);

impl Favorites {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether the id is a member
    pub fn contains(&self, id: &BookId) -> bool {
        self.0.contains(id)
    }

    /// Add an id; returns false if it was already present
    pub fn insert(&mut self, id: BookId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove an id; returns false if it was absent
    pub fn remove(&mut self, id: &BookId) -> bool {
        if let Some(pos) = self.0.iter().position(|f| f == id) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    /// Flip membership of `id`. Returns true if it is now a favorite.
    pub fn toggle(&mut self, id: &BookId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookId> {
        self.0.iter()
    }

    /// Ids in insertion order
    pub fn as_slice(&self) -> &[BookId] {
        &self.0
    }
}

impl FromIterator<BookId> for Favorites {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            favorites.insert(id);
        }
        favorites
    }
}
