//! Flattening a collection hierarchy into a single level of leaves.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use scatter_primitives::TagSet;

use crate::collection::{Collection, CollectionId};
use crate::entry::{Entry, EntryPayload};
use crate::error::{CollectionError, Result};

/// Replaces the entries of `target` with every leaf reachable from `source`.
///
/// Leaves are written depth-first in entry order. Each leaf keeps its own
/// fields and gains the tags inherited along its path: the tags of every
/// sub-collection entry crossed and the collection tags of every
/// sub-collection entered. `source`'s own collection tags are not inherited.
///
/// Zero-weight entries are copied too. Dropped sub-collections are skipped.
/// Returns the number of leaves written.
///
/// # Errors
///
/// [`CollectionError::TypeMismatch`] if the two collections hold different
/// entry kinds; `target` is left untouched.
pub fn flatten(source: &Arc<Collection>, target: &Collection) -> Result<usize> {
	if source.kind() != target.kind() {
		tracing::warn!(
			source = %source.name(),
			source_kind = %source.kind(),
			target = %target.name(),
			target_kind = %target.kind(),
			"flatten refused: kind mismatch"
		);
		return Err(CollectionError::TypeMismatch {
			source_kind: source.kind(),
			target_kind: target.kind(),
		});
	}

	let mut count = 0;
	walk(source, &TagSet::default(), &mut FxHashSet::default(), &mut |_, _| count += 1);

	let mut leaves = Vec::with_capacity(count);
	walk(source, &TagSet::default(), &mut FxHashSet::default(), &mut |leaf, inherited| {
		let mut leaf = leaf.clone();
		leaf.tags.extend(inherited.iter().copied());
		leaves.push(leaf);
	});
	if leaves.len() < count {
		leaves.shrink_to_fit();
	}

	let written = leaves.len();
	target.replace_entries(leaves)?;
	tracing::debug!(source = %source.name(), target = %target.name(), leaves = written, "flattened collection");
	Ok(written)
}

/// Visits every leaf under `collection` with the tags inherited so far.
fn walk(collection: &Arc<Collection>, inherited: &TagSet, path: &mut FxHashSet<CollectionId>, visit: &mut dyn FnMut(&Entry, &TagSet)) {
	if !path.insert(collection.id()) {
		tracing::warn!(collection = %collection.name(), id = %collection.id(), "flatten revisited a collection on its own path; skipped");
		return;
	}

	let snap = collection.snapshot();
	for entry in snap.entries() {
		let EntryPayload::SubCollection(target) = &entry.payload else {
			visit(entry, inherited);
			continue;
		};
		let Some(sub) = target.upgrade() else {
			tracing::debug!(collection = %collection.name(), target_id = %target.id(), "flatten skipped a dropped sub-collection");
			continue;
		};

		let mut tags = inherited.clone();
		tags.extend(entry.tags.iter().copied());
		tags.extend(sub.snapshot().collection_tags().iter().copied());
		walk(&sub, &tags, path, visit);
	}

	path.remove(&collection.id());
}
