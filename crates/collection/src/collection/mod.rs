//! Collections: ordered entries plus a lazily compiled index.
//!
//! # Mental Model
//!
//! 1. **Authoring:** entries are edited through [`Collection`] methods. Every
//!    edit that adds a sub-collection edge passes the cycle gate first, then
//!    commits and invalidates the compiled cache.
//! 2. **Compilation:** the first read after an invalidation copies the
//!    entries into an immutable [`CollectionSnapshot`] and compiles its
//!    [`crate::IndexRegistry`].
//! 3. **Resolution:** readers clone the snapshot `Arc` under a read lock and
//!    pick without further locking. [`EntryRef`] pins the snapshot it was
//!    resolved from.
//!
//! # Concurrency
//!
//! - **Reads:** shared lock on the cache slot, held only long enough to clone
//!   an `Arc`.
//! - **Compilation:** exclusive lock with a re-check, so concurrent first
//!   readers compile once and everyone else blocks until the snapshot is
//!   published.
//! - **Edits:** authoring is expected to be single-threaded per collection.
//!   Edits carrying sub-collection edges are serialized across all
//!   collections by the cycle gate (see [`crate::cycle`]). Invalidating while other threads resolve is allowed but they keep
//!   resolving against the snapshot they already pinned.
//!
//! # Invariants
//!
//! - Compilation is idempotent.
//!   - Enforced in: [`Collection::snapshot`] (publish once, re-check under write lock).
//!   - Tested by: `invariants::test_compile_is_idempotent`.
//! - Concurrent readers never observe a partially built index.
//!   - Enforced in: [`Collection::snapshot`].
//!   - Tested by: `invariants::test_concurrent_first_reads_compile_once`.
//! - No edit can close a sub-collection cycle.
//!   - Enforced in: [`Collection::edit_entries`], [`Collection::push_entry`],
//!     [`Collection::set_sub_collection`].
//!   - Tested by: `tests::reverse_edge_is_rejected`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use scatter_primitives::TagSet;
use serde::{Deserialize, Serialize};

use crate::entry::{CollectionRef, Entry, EntryPayload};
use crate::error::{CollectionError, Result};
use crate::grammar::CollectionGrammar;

mod cache;

pub use cache::{CacheStatus, CollectionSnapshot, EntryRef};
use cache::CacheState;

#[cfg(any(test, doc))]
pub(crate) mod invariants;

#[cfg(test)]
mod tests;

/// Process-unique collection identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}

	#[inline]
	pub const fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for CollectionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Concrete entry kind held by a collection.
///
/// Only collections of the same kind may be flattened into each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
	/// Static meshes.
	#[default]
	Mesh,
	/// Spawnable actors.
	Actor,
	/// Opaque data assets.
	Data,
}

impl fmt::Display for CollectionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Mesh => write!(f, "mesh"),
			Self::Actor => write!(f, "actor"),
			Self::Data => write!(f, "data"),
		}
	}
}

/// Collection-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
	/// Keep zero-weight entries in every index.
	pub do_not_ignore_invalid_entries: bool,
	/// Size aggregation used when this collection is measured as a whole.
	pub grammar: CollectionGrammar,
}

/// Mutable authoring state.
#[derive(Default)]
struct Content {
	entries: Vec<Entry>,
	collection_tags: TagSet,
	settings: CollectionSettings,
}

/// Ordered, weighted entries with a lazily compiled pick index.
///
/// Collections are shared as `Arc<Collection>`; sub-collection entries hold
/// weak references to them.
pub struct Collection {
	id: CollectionId,
	name: String,
	kind: CollectionKind,
	content: RwLock<Content>,
	cache: RwLock<CacheState>,
}

impl Collection {
	/// Creates an empty collection with default settings.
	pub fn new(name: impl Into<String>, kind: CollectionKind) -> Arc<Self> {
		Self::with_settings(name, kind, CollectionSettings::default())
	}

	/// Creates an empty collection.
	pub fn with_settings(name: impl Into<String>, kind: CollectionKind, settings: CollectionSettings) -> Arc<Self> {
		Arc::new(Self {
			id: CollectionId::next(),
			name: name.into(),
			kind,
			content: RwLock::new(Content {
				settings,
				..Content::default()
			}),
			cache: RwLock::new(CacheState::Empty),
		})
	}

	#[inline]
	pub fn id(&self) -> CollectionId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn kind(&self) -> CollectionKind {
		self.kind
	}

	/// Number of entries, included or not.
	pub fn len(&self) -> usize {
		self.content.read().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.content.read().entries.is_empty()
	}

	/// Copy of the current entries.
	pub fn entries(&self) -> Vec<Entry> {
		self.content.read().entries.clone()
	}

	/// Copy of the entry at `index`.
	pub fn entry(&self, index: usize) -> Option<Entry> {
		self.content.read().entries.get(index).cloned()
	}

	pub fn collection_tags(&self) -> TagSet {
		self.content.read().collection_tags.clone()
	}

	pub fn set_collection_tags(&self, tags: TagSet) {
		self.content.write().collection_tags = tags;
		self.invalidate();
	}

	pub fn settings(&self) -> CollectionSettings {
		self.content.read().settings.clone()
	}

	pub fn set_settings(&self, settings: CollectionSettings) {
		self.content.write().settings = settings;
		self.invalidate();
	}

	/// Appends an entry and returns its position.
	///
	/// A sub-collection entry that would close a cycle is refused.
	pub fn push_entry(&self, entry: Entry) -> Result<usize> {
		let _gate = self.check_edges(std::slice::from_ref(&entry))?;
		let index = {
			let mut content = self.content.write();
			content.entries.push(entry);
			content.entries.len() - 1
		};
		self.invalidate();
		Ok(index)
	}

	/// Points the entry at `index` to `target`, keeping its weight, category,
	/// tags and grammar.
	pub fn set_sub_collection(&self, index: usize, target: &Arc<Collection>) -> Result<()> {
		let len = self.len();
		if index >= len {
			return Err(self.out_of_range(index, len));
		}
		self.edit_entries(|entries| {
			if let Some(entry) = entries.get_mut(index) {
				entry.payload = EntryPayload::SubCollection(CollectionRef::new(target));
			}
		})
	}

	/// Applies `edit` to a copy of the entries and commits it.
	///
	/// The edited list passes the cycle gate before it replaces the current
	/// one; on rejection nothing changes. Concurrent edits of the same
	/// collection are last-writer-wins.
	pub fn edit_entries<R>(&self, edit: impl FnOnce(&mut Vec<Entry>) -> R) -> Result<R> {
		let mut entries = self.content.read().entries.clone();
		let out = edit(&mut entries);
		let _gate = self.check_edges(&entries)?;
		self.content.write().entries = entries;
		self.invalidate();
		Ok(out)
	}

	/// Replaces every entry.
	pub fn replace_entries(&self, entries: Vec<Entry>) -> Result<()> {
		self.edit_entries(move |current| *current = entries)
	}

	/// Resets the collection to `count` default entries.
	pub fn init_num_entries(&self, count: usize) {
		self.content.write().entries = vec![Entry::default(); count];
		self.invalidate();
	}

	/// Visits every entry in order.
	pub fn for_each_entry(&self, mut visit: impl FnMut(usize, &Entry)) {
		for (index, entry) in self.content.read().entries.iter().enumerate() {
			visit(index, entry);
		}
	}

	/// Visits every entry mutably, then commits through the cycle gate.
	pub fn for_each_entry_mut(&self, mut visit: impl FnMut(usize, &mut Entry)) -> Result<()> {
		self.edit_entries(|entries| {
			for (index, entry) in entries.iter_mut().enumerate() {
				visit(index, entry);
			}
		})
	}

	/// Writes the asset path of the entry at `index`.
	pub fn set_asset_path(&self, index: usize, path: impl Into<String>) -> Result<()> {
		let path = path.into();
		{
			let mut content = self.content.write();
			let len = content.entries.len();
			let entry = content.entries.get_mut(index).ok_or_else(|| self.out_of_range(index, len))?;
			entry.set_asset_path(path);
		}
		self.invalidate();
		Ok(())
	}

	/// Live sub-collection targets of the current entries.
	pub(crate) fn sub_collection_targets(&self) -> Vec<Arc<Collection>> {
		self.content
			.read()
			.entries
			.iter()
			.filter_map(|entry| entry.sub_collection_ref()?.upgrade())
			.collect()
	}

	fn out_of_range(&self, index: usize, len: usize) -> CollectionError {
		CollectionError::EntryOutOfRange {
			collection: self.name.clone(),
			index,
			len,
		}
	}
}

impl fmt::Debug for Collection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Collection")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("status", &self.cache_status())
			.finish()
	}
}
