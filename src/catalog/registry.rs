//! Catalog of matchable entries.
//!
//! The `Catalog` keeps entries in definition order (so seeded decks are
//! reproducible) and indexes them by id for lookup.

use rustc_hash::FxHashMap;

use super::entry::{CatalogEntry, EntryId, GroupFilter};
use crate::error::{GameError, Result};

/// Registry of catalog entries.
///
/// ## Example
///
/// ```
/// use flag_match::catalog::{Catalog, CatalogEntry, GroupFilter};
///
/// let catalog = Catalog::from_entries(vec![
///     CatalogEntry::new("HU", "Magyarország", "europe"),
///     CatalogEntry::new("JP", "Japán", "asia"),
/// ]).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.in_group(&GroupFilter::group("asia")).count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<EntryId, usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of entries.
    ///
    /// # Errors
    /// Returns `GameError::DuplicateEntry` if two entries share an id.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.register(entry)?;
        }
        Ok(catalog)
    }

    /// Add an entry.
    ///
    /// # Errors
    /// Returns `GameError::DuplicateEntry` if the id is already registered.
    pub fn register(&mut self, entry: CatalogEntry) -> Result<()> {
        if self.index.contains_key(&entry.id) {
            return Err(GameError::DuplicateEntry(entry.id.to_string()));
        }
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Get an entry by id.
    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: &EntryId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Entries admitted by a group filter, in definition order.
    pub fn in_group<'a>(&'a self, filter: &'a GroupFilter) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries.iter().filter(move |e| filter.accepts(e))
    }

    /// Distinct group names, in order of first appearance.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !groups.contains(&entry.group.as_str()) {
                groups.push(&entry.group);
            }
        }
        groups
    }
}
