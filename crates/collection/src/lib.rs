//! Weighted, nested content collections.
//!
//! A [`Collection`] holds an ordered list of weighted [`Entry`] values. Each
//! entry is either a leaf asset or a reference to another collection. The
//! first read after an edit compiles an [`IndexRegistry`] (one
//! [`WeightedIndex`] over every included entry plus one per category), and
//! every later read picks from it without locking beyond an `Arc` clone.
//!
//! # Modules
//!
//! - [`index`] - compiled pick arrays and [`PickPolicy`]
//! - [`registry`] - Main plus per-category indices
//! - [`collection`] - entries, editing API and the compiled cache
//! - [`resolve`] - `get_entry*` with descent into sub-collections
//! - [`cycle`] - write-time cycle gate
//! - [`size`] - memoized grammar size aggregation
//! - [`flatten`] - hierarchy to single-level copy

pub mod collection;
pub mod cycle;
pub mod entry;
pub mod error;
pub mod flatten;
pub mod grammar;
pub mod index;
pub mod registry;
pub mod resolve;
pub mod size;

pub use collection::{CacheStatus, Collection, CollectionId, CollectionKind, CollectionSettings, CollectionSnapshot, EntryRef};
pub use cycle::has_circular_dependency;
pub use entry::{AssetDescriptor, CollectionRef, Entry, EntryPayload};
pub use error::{CollectionError, Result};
pub use flatten::flatten;
pub use grammar::{AssetGrammar, AssetSizeMode, CollectionGrammar, CollectionSizeMode};
pub use index::{PickPolicy, WeightedIndex, WeightedIndexBuilder};
pub use registry::IndexRegistry;
pub use resolve::{HostRef, Resolved, TagInheritance};
pub use size::{SizeCache, SizeKey, collection_size, entry_size};

#[cfg(test)]
use criterion as _;
