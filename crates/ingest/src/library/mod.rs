//! Named collections owned by one library.
//!
//! # Role
//!
//! Sub-collection entries only hold weak references, so something must own
//! every collection for as long as resolutions may reach it. A [`Library`]
//! is that owner: it publishes an immutable name table behind an
//! [`ArcSwap`], so lookups never lock and registration retries on contention.
//!
//! # Invariants
//!
//! - Names are unique within a library.
//!   - Enforced in: [`Library::register`].
//!   - Tested by: `tests::duplicate_names_are_refused`.
//! - Every manifest edge passes the cycle gate.
//!   - Enforced in: [`Library::from_manifest`] (through `Collection::set_sub_collection`).
//!   - Tested by: `tests::manifest_cycle_is_reported`.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;
use scatter_collection::{AssetDescriptor, Collection, Entry, EntryPayload};
use scatter_primitives::{Bounds, Symbol, tag_set};

use crate::error::{IngestError, Result};

pub mod manifest;

pub use manifest::{CollectionManifest, EntryManifest, LibraryManifest};


#[derive(Debug, Clone, Default)]
struct LibrarySnapshot {
	by_name: FxHashMap<String, Arc<Collection>>,
	/// Registration order.
	names: Vec<String>,
}

/// Owner of a set of named collections.
pub struct Library {
	snap: ArcSwap<LibrarySnapshot>,
}

impl Default for Library {
	fn default() -> Self {
		Self::new()
	}
}

impl Library {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(LibrarySnapshot::default()),
		}
	}

	/// Adds `collection` under its name.
	pub fn register(&self, collection: Arc<Collection>) -> Result<()> {
		let name = collection.name().to_owned();
		loop {
			let cur = self.snap.load_full();
			if cur.by_name.contains_key(&name) {
				return Err(IngestError::DuplicateCollection(name));
			}

			let mut next = (*cur).clone();
			next.by_name.insert(name.clone(), Arc::clone(&collection));
			next.names.push(name.clone());

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::debug!(collection = %name, id = %collection.id(), "registered collection");
				return Ok(());
			}
		}
	}

	#[inline]
	pub fn get(&self, name: &str) -> Option<Arc<Collection>> {
		self.snap.load().by_name.get(name).cloned()
	}

	/// Collection names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.snap.load().names.clone()
	}

	pub fn len(&self) -> usize {
		self.snap.load().names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().names.is_empty()
	}

	/// Builds every collection of `manifest`, then links sub-collection
	/// entries by name.
	///
	/// Linking happens after all collections exist, so entries may reference
	/// collections declared later in the manifest.
	pub fn from_manifest(manifest: &LibraryManifest) -> Result<Self> {
		let library = Self::new();
		let mut links = Vec::new();

		for declared in &manifest.collections {
			let collection = Collection::with_settings(declared.name.as_str(), declared.kind, declared.settings.clone());
			collection.set_collection_tags(tag_set(declared.tags.iter().map(String::as_str)));

			let mut entries = Vec::with_capacity(declared.entries.len());
			for (index, entry) in declared.entries.iter().enumerate() {
				entries.push(build_entry(&declared.name, index, entry)?);
				if let Some(target) = &entry.collection {
					links.push((Arc::clone(&collection), index, target.as_str()));
				}
			}
			collection.replace_entries(entries)?;
			library.register(collection)?;
		}

		for (host, index, target) in links {
			let sub = library.get(target).ok_or_else(|| IngestError::UnknownCollection {
				collection: host.name().to_owned(),
				reference: target.to_owned(),
			})?;
			host.set_sub_collection(index, &sub)?;
		}

		tracing::debug!(collections = library.len(), "loaded library manifest");
		Ok(library)
	}

	/// Reads a TOML manifest file and builds the library.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_manifest(&LibraryManifest::load(path)?)
	}
}

/// Builds the entry at `index`. Sub-collection entries start as placeholder
/// leaves and are linked once every collection exists.
fn build_entry(collection: &str, index: usize, manifest: &EntryManifest) -> Result<Entry> {
	let invalid = |reason| IngestError::InvalidEntry {
		collection: collection.to_owned(),
		index,
		reason,
	};
	let asset = match (&manifest.asset, &manifest.collection) {
		(Some(path), None) => AssetDescriptor {
			path: path.clone(),
			bounds: manifest.size.map(Bounds::from_size),
			material_variants: manifest.material_variants.clone(),
		},
		(None, Some(_)) => AssetDescriptor::default(),
		(Some(_), Some(_)) => return Err(invalid("both `asset` and `collection` are set")),
		(None, None) => return Err(invalid("one of `asset` or `collection` is required")),
	};

	Ok(Entry {
		weight: manifest.weight,
		category: manifest.category.as_deref().map(Symbol::intern),
		tags: tag_set(manifest.tags.iter().map(String::as_str)),
		payload: EntryPayload::Asset(asset),
		grammar: manifest.grammar,
		sub_grammar: manifest.sub_grammar,
	})
}
