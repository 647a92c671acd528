//! Collection entries: weighted leaves and sub-collection references.

use std::fmt;
use std::sync::{Arc, Weak};

use scatter_primitives::{Bounds, Symbol, TagSet};

use crate::collection::{Collection, CollectionId};
use crate::grammar::{AssetGrammar, CollectionGrammar};

/// One placement candidate.
#[derive(Debug, Clone)]
pub struct Entry {
	/// Relative pick weight. Zero excludes the entry from every index unless
	/// the owning collection keeps zero-weight entries.
	pub weight: u32,
	/// Category used to build the per-category indices.
	pub category: Option<Symbol>,
	/// Tags owned by this entry.
	pub tags: TagSet,
	pub payload: EntryPayload,
	/// Leaf size policy.
	pub grammar: AssetGrammar,
	/// Overrides the referenced collection's grammar for sub-collection entries.
	pub sub_grammar: Option<CollectionGrammar>,
}

/// What an entry resolves to.
#[derive(Debug, Clone)]
pub enum EntryPayload {
	/// A concrete asset.
	Asset(AssetDescriptor),
	/// Another whole collection, resolved recursively.
	SubCollection(CollectionRef),
}

/// Leaf payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDescriptor {
	/// Asset path as understood by the host's loader.
	pub path: String,
	/// Staged bounds, when known.
	pub bounds: Option<Bounds>,
	/// Alternate material assignments (mesh collections).
	pub material_variants: Vec<String>,
}

impl Default for Entry {
	fn default() -> Self {
		Self {
			weight: 1,
			category: None,
			tags: TagSet::default(),
			payload: EntryPayload::Asset(AssetDescriptor::default()),
			grammar: AssetGrammar::default(),
			sub_grammar: None,
		}
	}
}

impl Entry {
	/// Creates a leaf entry.
	pub fn leaf(path: impl Into<String>, weight: u32) -> Self {
		Self {
			weight,
			payload: EntryPayload::Asset(AssetDescriptor {
				path: path.into(),
				..AssetDescriptor::default()
			}),
			..Self::default()
		}
	}

	/// Creates an entry referencing `collection`.
	///
	/// Attaching the entry to a collection runs the cycle check.
	pub fn sub_collection(collection: &Arc<Collection>, weight: u32) -> Self {
		Self {
			weight,
			payload: EntryPayload::SubCollection(CollectionRef::new(collection)),
			..Self::default()
		}
	}

	pub fn with_category(mut self, category: &str) -> Self {
		self.category = Some(Symbol::intern(category));
		self
	}

	pub fn with_tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
		self.tags.extend(tags.into_iter().map(Symbol::intern));
		self
	}

	/// Sets leaf bounds. Has no effect on sub-collection entries.
	pub fn with_bounds(mut self, bounds: Bounds) -> Self {
		if let EntryPayload::Asset(asset) = &mut self.payload {
			asset.bounds = Some(bounds);
		}
		self
	}

	pub fn with_grammar(mut self, grammar: AssetGrammar) -> Self {
		self.grammar = grammar;
		self
	}

	pub fn with_sub_grammar(mut self, grammar: CollectionGrammar) -> Self {
		self.sub_grammar = Some(grammar);
		self
	}

	/// Returns true if this entry references another collection.
	#[inline]
	pub fn is_sub_collection(&self) -> bool {
		matches!(self.payload, EntryPayload::SubCollection(_))
	}

	/// Leaf payload, if this is a leaf.
	#[inline]
	pub fn asset(&self) -> Option<&AssetDescriptor> {
		match &self.payload {
			EntryPayload::Asset(asset) => Some(asset),
			EntryPayload::SubCollection(_) => None,
		}
	}

	/// Sub-collection reference, if this is not a leaf.
	#[inline]
	pub fn sub_collection_ref(&self) -> Option<&CollectionRef> {
		match &self.payload {
			EntryPayload::SubCollection(target) => Some(target),
			EntryPayload::Asset(_) => None,
		}
	}

	/// Writes the leaf asset path, turning a sub-collection entry into a leaf.
	pub fn set_asset_path(&mut self, path: impl Into<String>) {
		if let EntryPayload::Asset(asset) = &mut self.payload {
			asset.path = path.into();
			return;
		}
		self.payload = EntryPayload::Asset(AssetDescriptor {
			path: path.into(),
			..AssetDescriptor::default()
		});
	}
}

/// Non-owning reference to a collection.
///
/// The referenced collection's lifetime is managed by whoever owns its
/// `Arc`. A dropped target makes [`CollectionRef::upgrade`] fail, and
/// resolution through it yields no pick.
#[derive(Clone)]
pub struct CollectionRef {
	id: CollectionId,
	target: Weak<Collection>,
}

impl CollectionRef {
	pub fn new(collection: &Arc<Collection>) -> Self {
		Self {
			id: collection.id(),
			target: Arc::downgrade(collection),
		}
	}

	/// Identity of the referenced collection, valid even after it is dropped.
	#[inline]
	pub fn id(&self) -> CollectionId {
		self.id
	}

	/// Resolves the reference, or `None` if the collection is gone.
	#[inline]
	pub fn upgrade(&self) -> Option<Arc<Collection>> {
		self.target.upgrade()
	}
}

impl fmt::Debug for CollectionRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CollectionRef")
			.field("id", &self.id)
			.field("live", &(self.target.strong_count() > 0))
			.finish()
	}
}
