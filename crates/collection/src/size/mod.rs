//! Memoized grammar size aggregation.
//!
//! # Purpose
//!
//! The grammar size is a scalar footprint used by downstream layout code.
//! Leaves measure their bounds through [`crate::grammar::AssetSizeMode`]; sub-collection
//! entries and whole collections aggregate the sizes of every entry included
//! in their Main index through [`CollectionSizeMode`].
//!
//! # Invariants
//!
//! - Every key is computed at most once per [`SizeCache`].
//!   - Tested by: `tests::shared_child_is_measured_once`.
//! - A key is marked in progress before its children are visited; a revisit
//!   while in progress has no valid size, so the recursion always terminates.
//!   - Tested by: `tests::in_progress_key_has_no_size`.
//! - `Average` divides by the number of children with a valid size only, and
//!   zero valid children aggregate to `0.0` under every mode.
//!   - Tested by: `tests::average_ignores_invalid_children`,
//!     `tests::empty_collection_is_zero`.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::collection::{Collection, CollectionId, EntryRef};
use crate::grammar::CollectionSizeMode;


/// Identity of a measured node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeKey {
	/// One entry of one collection.
	Entry { collection: CollectionId, index: usize },
	/// A collection measured as a whole under its own grammar.
	Collection(CollectionId),
}

#[derive(Debug, Clone, Copy)]
enum Slot {
	InProgress,
	Done(Option<f64>),
}

/// Sizes computed during one aggregation pass.
///
/// The cache is transient: build one per query (or per batch of queries
/// against unchanged collections) and drop it afterwards.
#[derive(Debug, Default)]
pub struct SizeCache {
	slots: FxHashMap<SizeKey, Slot>,
}

impl SizeCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Completed size of `key`, if it was computed and valid.
	pub fn get(&self, key: SizeKey) -> Option<f64> {
		match self.slots.get(&key)? {
			Slot::Done(size) => *size,
			Slot::InProgress => None,
		}
	}

	/// Number of keys visited so far.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// `Some(size)` if `key` was already visited; an in-progress key reports
	/// no valid size.
	fn cached(&self, key: SizeKey) -> Option<Option<f64>> {
		self.slots.get(&key).map(|slot| match slot {
			Slot::InProgress => None,
			Slot::Done(size) => *size,
		})
	}

	fn begin(&mut self, key: SizeKey) {
		self.slots.insert(key, Slot::InProgress);
	}

	fn finish(&mut self, key: SizeKey, size: Option<f64>) -> Option<f64> {
		self.slots.insert(key, Slot::Done(size));
		size
	}
}

/// Size of `collection` under its own grammar.
pub fn collection_size(collection: &Arc<Collection>, cache: &mut SizeCache) -> f64 {
	let mode = collection.snapshot().settings().grammar.size;
	aggregate(collection, mode, SizeKey::Collection(collection.id()), cache).unwrap_or(0.0)
}

/// Size of one entry, or `None` if it has no valid size.
///
/// Leaves without bounds (unless fixed), dropped sub-collections and entries
/// revisited during their own computation have no valid size.
pub fn entry_size(entry: &EntryRef, cache: &mut SizeCache) -> Option<f64> {
	let key = SizeKey::Entry {
		collection: entry.collection_id(),
		index: entry.index(),
	};

	let Some(target) = entry.sub_collection_ref() else {
		if let Some(size) = cache.cached(key) {
			return size;
		}
		let size = entry.grammar.size.measure(entry.asset().and_then(|asset| asset.bounds.as_ref()));
		return cache.finish(key, size);
	};

	let Some(sub) = target.upgrade() else {
		return cache.finish(key, None);
	};
	let mode = match entry.sub_grammar {
		Some(grammar) => grammar.size,
		None => sub.snapshot().settings().grammar.size,
	};
	aggregate(&sub, mode, key, cache)
}

fn aggregate(collection: &Arc<Collection>, mode: CollectionSizeMode, key: SizeKey, cache: &mut SizeCache) -> Option<f64> {
	if let Some(size) = cache.cached(key) {
		return size;
	}
	if let CollectionSizeMode::Fixed(size) = mode {
		return cache.finish(key, Some(size));
	}

	cache.begin(key);
	let snap = collection.snapshot();
	let mut fold = SizeFold::default();
	for &index in snap.registry().main().order_indices() {
		let Some(child) = EntryRef::new(Arc::clone(&snap), index) else {
			continue;
		};
		if let Some(size) = entry_size(&child, cache) {
			fold.push(size);
		}
	}

	let size = fold.finish(mode);
	tracing::trace!(collection = %collection.name(), ?key, ?mode, size, valid = fold.count, "aggregated size");
	cache.finish(key, Some(size))
}

#[derive(Debug, Clone, Copy)]
struct SizeFold {
	count: usize,
	sum: f64,
	min: f64,
	max: f64,
}

impl Default for SizeFold {
	fn default() -> Self {
		Self {
			count: 0,
			sum: 0.0,
			min: f64::MAX,
			max: f64::MIN,
		}
	}
}

impl SizeFold {
	fn push(&mut self, size: f64) {
		self.count += 1;
		self.sum += size;
		self.min = self.min.min(size);
		self.max = self.max.max(size);
	}

	fn finish(self, mode: CollectionSizeMode) -> f64 {
		if self.count == 0 {
			return match mode {
				CollectionSizeMode::Fixed(size) => size,
				_ => 0.0,
			};
		}
		match mode {
			CollectionSizeMode::Fixed(size) => size,
			CollectionSizeMode::Min => self.min,
			CollectionSizeMode::Max => self.max,
			CollectionSizeMode::Average => self.sum / self.count as f64,
		}
	}
}

impl Collection {
	/// Size of this collection under its own grammar, with a fresh cache.
	pub fn grammar_size(self: &Arc<Self>) -> f64 {
		collection_size(self, &mut SizeCache::new())
	}
}
