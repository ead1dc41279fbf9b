//! Catalog entries and group filters.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry (an ISO 3166 alpha-2 code for countries).
///
/// Also the key an external renderer uses to resolve the entry's image.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Create a new entry ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single matchable catalog item.
///
/// Immutable once built. Every entry selected for a round produces exactly
/// one image card and one text card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier.
    pub id: EntryId,

    /// Name shown on the text card.
    pub display_name: String,

    /// Group used for round filtering (continent for countries).
    pub group: String,
}

impl CatalogEntry {
    /// Create a new catalog entry.
    #[must_use]
    pub fn new(
        id: impl Into<EntryId>,
        display_name: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            group: group.into(),
        }
    }
}

/// Which entries a round may draw from.
///
/// Serialized as a plain string: `"all"` or a group name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupFilter {
    /// Every entry in the catalog.
    All,
    /// Only entries whose group equals this name.
    Group(String),
}

impl GroupFilter {
    /// Filter on a single group.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }

    /// Does this filter admit the entry?
    #[must_use]
    pub fn accepts(&self, entry: &CatalogEntry) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(name) => entry.group == *name,
        }
    }
}

impl Default for GroupFilter {
    fn default() -> Self {
        Self::group("europe")
    }
}

impl From<String> for GroupFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Group(value)
        }
    }
}

impl From<GroupFilter> for String {
    fn from(filter: GroupFilter) -> Self {
        match filter {
            GroupFilter::All => "all".to_string(),
            GroupFilter::Group(name) => name,
        }
    }
}

impl std::fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupFilter::All => f.write_str("all"),
            GroupFilter::Group(name) => f.write_str(name),
        }
    }
}
