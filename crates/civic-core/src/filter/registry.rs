//! Category registry
//!
//! The set of selectable categories is owned by the caller and shared with
//! the orchestrator through a [`RegistryHandle`]. Categories created at
//! runtime become valid filter values immediately.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::criteria::ALL_SENTINEL;

/// Shared, mutable handle to a registry
pub type RegistryHandle = Arc<RwLock<CategoryRegistry>>;

/// Default categories for the news feed
const ARTICLE_CATEGORIES: &[&str] = &[
    "politics",
    "economy",
    "health",
    "education",
    "security",
    "environment",
    "governance",
];

/// Default categories for the political archive
const POLITICIAN_CATEGORIES: &[&str] = &[
    "president",
    "deputy president",
    "governor",
    "senator",
    "mp",
    "women representative",
    "mca",
];

/// Errors from registry mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("category name is empty")]
    Empty,

    #[error("category already exists: {0}")]
    AlreadyExists(String),

    #[error("category name is reserved: {0}")]
    Reserved(String),
}

/// Ordered list of known categories, compared case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the given names. Invalid or duplicate names are skipped.
    pub fn with_categories(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut registry = Self::new();
        for name in names {
            let _ = registry.create(name);
        }
        registry
    }

    pub fn for_articles() -> Self {
        Self::with_categories(ARTICLE_CATEGORIES.iter().copied())
    }

    pub fn for_politicians() -> Self {
        Self::with_categories(POLITICIAN_CATEGORIES.iter().copied())
    }

    /// Register a new category.
    pub fn create(&mut self, name: impl Into<String>) -> Result<(), RegistryError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RegistryError::Empty);
        }
        if name.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Err(RegistryError::Reserved(name));
        }
        if self.contains(&name) {
            return Err(RegistryError::AlreadyExists(name));
        }
        self.categories.push(name);
        Ok(())
    }

    /// Returns `true` if the category was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| !c.eq_ignore_ascii_case(name.trim()));
        self.categories.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_handle(self) -> RegistryHandle {
        Arc::new(RwLock::new(self))
    }
}
