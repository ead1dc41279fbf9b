//! Reference data: the entries a deck is built from.
//!
//! ## Key Types
//!
//! - `EntryId`: Identifier of an entry (ISO country code)
//! - `CatalogEntry`: `{id, display_name, group}`, immutable
//! - `GroupFilter`: Which entries a round may draw from
//! - `Catalog`: Ordered, indexed collection of entries
//!
//! Image resolution for an entry is the renderer's job; it keys on `EntryId`.

pub mod countries;
pub mod entry;
pub mod registry;

pub use entry::{CatalogEntry, EntryId, GroupFilter};
pub use registry::Catalog;
