//! Hierarchical entry resolution.
//!
//! # Protocol
//!
//! A resolution starts at one collection with a [`Draw`]. Each hop compiles
//! (or reuses) the host's snapshot, picks from its Main index (or a category
//! index on the first hop only) and either returns the picked leaf together
//! with its host, or descends into the referenced sub-collection.
//!
//! The top-level draw chooses *which* entry is picked at the first hop. Inside
//! a sub-collection the pick is always random, with a seed derived from the
//! caller's seed:
//!
//! | Entry point | Descent |
//! |-------------|---------|
//! | [`Collection::get_entry_at`] | weighted random, `index * 2` |
//! | [`Collection::get_entry`] | weighted random, `seed * 2` |
//! | [`Collection::get_entry_random`] | uniform random, `seed + 1` |
//! | [`Collection::get_entry_weighted_random`] | weighted random, `seed * 2` |
//!
//! Seed arithmetic wraps.
//!
//! # Failure
//!
//! Every operation returns `None` instead of failing: empty or unknown index,
//! out-of-range request, or a sub-collection that has been dropped.
//!
//! # Termination
//!
//! Cycles are refused when edges are created (see [`crate::cycle`]), so the
//! descent loop always reaches a leaf or fails.

use std::sync::Arc;

use scatter_primitives::{Symbol, TagSet};

use crate::collection::{Collection, EntryRef};
use crate::index::{PickPolicy, WeightedIndex};

#[cfg(test)]
mod tests;

bitflags::bitflags! {
	/// Tags collected by the `*_with_tags` resolution variants.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct TagInheritance: u8 {
		/// Tags of every entry picked along the way, the final leaf included.
		const ASSET = 1 << 0;
		/// Collection tags of every sub-collection entered.
		const COLLECTION = 1 << 1;
	}
}

/// Collection that owns a resolved entry.
///
/// May differ from the collection the resolution started at.
pub type HostRef = Arc<Collection>;

/// A resolved leaf and its host.
pub type Resolved = (EntryRef, HostRef);

/// How one hop picks.
#[derive(Debug, Clone, Copy)]
enum Draw {
	At(u64),
	Policy { index: u64, seed: u64, policy: PickPolicy },
	Random(u64),
	WeightedRandom(u64),
}

impl Draw {
	fn pick(self, index: &WeightedIndex) -> Option<u32> {
		match self {
			Self::At(request) => index.pick(request, PickPolicy::Ascending),
			Self::Policy { seed, policy, .. } if policy.is_random() => index.pick(seed, policy),
			Self::Policy { index: request, policy, .. } => index.pick(request, policy),
			Self::Random(seed) => index.pick_random(seed),
			Self::WeightedRandom(seed) => index.pick_weighted_random(seed),
		}
	}

	/// Draw used inside a sub-collection entered from this one.
	fn descend(self) -> Self {
		match self {
			Self::At(seed) | Self::Policy { seed, .. } | Self::WeightedRandom(seed) => Self::WeightedRandom(seed.wrapping_mul(2)),
			Self::Random(seed) => Self::Random(seed.wrapping_add(1)),
		}
	}
}

/// Walks from `root` to a leaf.
fn resolve(root: &Arc<Collection>, category: Option<Symbol>, mut draw: Draw, inheritance: TagInheritance, tags: &mut TagSet) -> Option<Resolved> {
	let mut host = Arc::clone(root);
	let mut scope = category;
	let mut entered = false;

	loop {
		let snap = host.snapshot();
		if entered && inheritance.contains(TagInheritance::COLLECTION) {
			tags.extend(snap.collection_tags().iter().copied());
		}

		let picked = draw.pick(snap.scoped_index(scope)?)?;
		let entry = EntryRef::new(snap, picked)?;
		if inheritance.contains(TagInheritance::ASSET) {
			tags.extend(entry.tags.iter().copied());
		}

		let Some(target) = entry.sub_collection_ref() else {
			return Some((entry, host));
		};
		let Some(sub) = target.upgrade() else {
			tracing::trace!(
				host = %host.name(),
				entry = entry.index(),
				target_id = %target.id(),
				"sub-collection dropped; no pick"
			);
			return None;
		};

		draw = draw.descend();
		tracing::trace!(
			host = %host.name(),
			entry = entry.index(),
			sub = %sub.name(),
			draw = ?draw,
			"descending into sub-collection"
		);
		host = sub;
		scope = None;
		entered = true;
	}
}

impl Collection {
	/// Entry at position `index` of the Main index, resolved to a leaf.
	///
	/// A sub-collection entry descends by weighted random, seeded from
	/// `index`.
	pub fn get_entry_at(self: &Arc<Self>, index: usize) -> Option<Resolved> {
		let draw = Draw::At(u64::try_from(index).ok()?);
		resolve(self, None, draw, TagInheritance::empty(), &mut TagSet::default())
	}

	/// Picks under `policy` and resolves to a leaf.
	///
	/// Ordinal policies read `index`, random policies read `seed`.
	pub fn get_entry(self: &Arc<Self>, index: usize, seed: u64, policy: PickPolicy) -> Option<Resolved> {
		let draw = Draw::Policy {
			index: u64::try_from(index).ok()?,
			seed,
			policy,
		};
		resolve(self, None, draw, TagInheritance::empty(), &mut TagSet::default())
	}

	/// Uniform pick, resolved to a leaf.
	pub fn get_entry_random(self: &Arc<Self>, seed: u64) -> Option<Resolved> {
		resolve(self, None, Draw::Random(seed), TagInheritance::empty(), &mut TagSet::default())
	}

	/// Weight-proportional pick, resolved to a leaf.
	pub fn get_entry_weighted_random(self: &Arc<Self>, seed: u64) -> Option<Resolved> {
		resolve(self, None, Draw::WeightedRandom(seed), TagInheritance::empty(), &mut TagSet::default())
	}

	/// [`Self::get_entry`], merging the tags selected by `inheritance` into `tags`.
	///
	/// Tags are merged hop by hop, so a resolution that fails midway leaves
	/// the tags gathered so far.
	pub fn get_entry_with_tags(
		self: &Arc<Self>,
		index: usize,
		seed: u64,
		policy: PickPolicy,
		inheritance: TagInheritance,
		tags: &mut TagSet,
	) -> Option<Resolved> {
		let draw = Draw::Policy {
			index: u64::try_from(index).ok()?,
			seed,
			policy,
		};
		resolve(self, None, draw, inheritance, tags)
	}

	/// [`Self::get_entry_random`], merging tags into `tags`.
	pub fn get_entry_random_with_tags(self: &Arc<Self>, seed: u64, inheritance: TagInheritance, tags: &mut TagSet) -> Option<Resolved> {
		resolve(self, None, Draw::Random(seed), inheritance, tags)
	}

	/// [`Self::get_entry_weighted_random`], merging tags into `tags`.
	pub fn get_entry_weighted_random_with_tags(self: &Arc<Self>, seed: u64, inheritance: TagInheritance, tags: &mut TagSet) -> Option<Resolved> {
		resolve(self, None, Draw::WeightedRandom(seed), inheritance, tags)
	}

	/// [`Self::get_entry`] restricted to the entries of `category` at the
	/// first hop.
	pub fn get_entry_in_category(self: &Arc<Self>, category: Symbol, index: usize, seed: u64, policy: PickPolicy) -> Option<Resolved> {
		let draw = Draw::Policy {
			index: u64::try_from(index).ok()?,
			seed,
			policy,
		};
		resolve(self, Some(category), draw, TagInheritance::empty(), &mut TagSet::default())
	}

	/// [`Self::get_entry_random`] restricted to `category` at the first hop.
	pub fn get_entry_random_in_category(self: &Arc<Self>, category: Symbol, seed: u64) -> Option<Resolved> {
		resolve(self, Some(category), Draw::Random(seed), TagInheritance::empty(), &mut TagSet::default())
	}

	/// [`Self::get_entry_weighted_random`] restricted to `category` at the
	/// first hop.
	pub fn get_entry_weighted_random_in_category(self: &Arc<Self>, category: Symbol, seed: u64) -> Option<Resolved> {
		resolve(self, Some(category), Draw::WeightedRandom(seed), TagInheritance::empty(), &mut TagSet::default())
	}
}
