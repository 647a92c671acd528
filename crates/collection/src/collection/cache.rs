//! Compiled snapshot publication and pinning handles.
//!
//! # Role
//!
//! This module owns the `{Empty, Compiling, Ready}` lifecycle of a
//! collection's compiled index. It contains no pick logic.
//!
//! # Invariants
//!
//! - [`EntryRef`] must hold its source [`CollectionSnapshot`] alive while held
//!   (see `invariants::test_entry_ref_survives_invalidate`).

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use scatter_primitives::{Symbol, TagSet};

use super::{Collection, CollectionId, CollectionSettings};
use crate::entry::Entry;
use crate::index::WeightedIndex;
use crate::registry::IndexRegistry;

pub(super) enum CacheState {
	Empty,
	Ready(Arc<CollectionSnapshot>),
}

/// Observable state of a collection's compiled cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
	/// Never compiled, or invalidated since.
	Empty,
	/// A writer holds the cache slot (compiling or invalidating).
	Compiling,
	/// A compiled snapshot is published.
	Ready,
}

/// Immutable view of a collection at compile time.
pub struct CollectionSnapshot {
	collection: CollectionId,
	entries: Vec<Entry>,
	collection_tags: TagSet,
	settings: CollectionSettings,
	registry: IndexRegistry,
}

impl CollectionSnapshot {
	/// Identity of the collection this snapshot was compiled from.
	#[inline]
	pub fn collection_id(&self) -> CollectionId {
		self.collection
	}

	/// Entries at compile time, included or not.
	#[inline]
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	#[inline]
	pub fn collection_tags(&self) -> &TagSet {
		&self.collection_tags
	}

	#[inline]
	pub fn settings(&self) -> &CollectionSettings {
		&self.settings
	}

	#[inline]
	pub fn registry(&self) -> &IndexRegistry {
		&self.registry
	}

	/// Main index, or the index of `category` when given.
	#[inline]
	pub(crate) fn scoped_index(&self, category: Option<Symbol>) -> Option<&WeightedIndex> {
		match category {
			None => Some(self.registry.main()),
			Some(category) => self.registry.category(category),
		}
	}
}

/// Handle to one entry of a compiled snapshot.
///
/// Dereferences to [`Entry`]. The snapshot stays alive for as long as the
/// handle does, even if the collection is invalidated or dropped meanwhile.
#[derive(Clone)]
pub struct EntryRef {
	snap: Arc<CollectionSnapshot>,
	index: u32,
}

impl EntryRef {
	pub(crate) fn new(snap: Arc<CollectionSnapshot>, index: u32) -> Option<Self> {
		((index as usize) < snap.entries.len()).then_some(Self { snap, index })
	}

	/// Position of the entry in its collection.
	#[inline]
	pub fn index(&self) -> usize {
		self.index as usize
	}

	/// Identity of the collection owning the entry.
	#[inline]
	pub fn collection_id(&self) -> CollectionId {
		self.snap.collection
	}

	/// Snapshot the entry was resolved from.
	#[inline]
	pub fn snapshot(&self) -> &Arc<CollectionSnapshot> {
		&self.snap
	}
}

impl Deref for EntryRef {
	type Target = Entry;

	fn deref(&self) -> &Entry {
		&self.snap.entries[self.index as usize]
	}
}

impl fmt::Debug for EntryRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntryRef")
			.field("collection", &self.snap.collection)
			.field("index", &self.index)
			.field("entry", &**self)
			.finish()
	}
}

impl Collection {
	/// Returns the compiled snapshot, compiling it first if needed.
	pub fn snapshot(&self) -> Arc<CollectionSnapshot> {
		if let CacheState::Ready(snap) = &*self.cache.read() {
			return Arc::clone(snap);
		}

		let mut cache = self.cache.write();
		// Another reader may have compiled while we waited for the write lock.
		if let CacheState::Ready(snap) = &*cache {
			return Arc::clone(snap);
		}

		let snap = Arc::new(self.build_snapshot());
		*cache = CacheState::Ready(Arc::clone(&snap));
		snap
	}

	/// Compiles the index now instead of on first resolution.
	pub fn compile(&self) {
		self.snapshot();
	}

	/// Discards the compiled index; the next resolution recompiles.
	///
	/// Callers must not invalidate while other threads still expect fresh
	/// results. Handles already resolved keep their pinned snapshot.
	pub fn invalidate(&self) {
		*self.cache.write() = CacheState::Empty;
	}

	/// Returns true if a compiled snapshot is published.
	pub fn is_compiled(&self) -> bool {
		self.cache_status() == CacheStatus::Ready
	}

	/// Current cache state, without blocking.
	pub fn cache_status(&self) -> CacheStatus {
		match self.cache.try_read() {
			None => CacheStatus::Compiling,
			Some(state) => match &*state {
				CacheState::Empty => CacheStatus::Empty,
				CacheState::Ready(_) => CacheStatus::Ready,
			},
		}
	}

	fn build_snapshot(&self) -> CollectionSnapshot {
		let content = self.content.read();
		let registry = IndexRegistry::compile(
			content.entries.iter().map(|entry| (entry.category, entry.weight)),
			content.settings.do_not_ignore_invalid_entries,
		);

		tracing::debug!(
			collection = %self.name,
			id = %self.id,
			entries = content.entries.len(),
			included = registry.main().len(),
			categories = registry.category_count(),
			total_weight = registry.total_weight(),
			"compiled collection index"
		);

		CollectionSnapshot {
			collection: self.id,
			entries: content.entries.clone(),
			collection_tags: content.collection_tags.clone(),
			settings: content.settings.clone(),
			registry,
		}
	}
}
