//! Compiled weighted pick index.
//!
//! # Purpose
//!
//! A [`WeightedIndex`] turns a list of `(original_index, weight)` members into
//! three parallel arrays that answer every pick policy with at most one seeded
//! draw and one array walk:
//!
//! | Array | Order | Drives |
//! |-------|-------|--------|
//! | `order_indices` | insertion order | [`PickPolicy::Ascending`], [`PickPolicy::Descending`] |
//! | `weight_rank` | weight ascending, stable | weight-ordered and random picks |
//! | `cumulative_weights` | running sum in `weight_rank` order | [`PickPolicy::WeightedRandom`] |
//!
//! # Invariants
//!
//! - The three arrays always have the same length.
//!   - Enforced in: [`WeightedIndexBuilder::build`].
//!   - Tested by: `tests::arrays_are_parallel`.
//! - `total_weight` equals the sum of included weights.
//!   - Enforced in: [`WeightedIndexBuilder::build`].
//!   - Tested by: `tests::prop_total_weight_is_sum`.
//! - Picks never renumber: they return the member's original index.
//!   - Enforced in: [`WeightedIndex::pick`].
//!   - Tested by: `tests::picks_return_original_indices`.
//! - An empty index fails every pick closed (`None`).
//!   - Tested by: `tests::empty_index_never_picks`.

pub(crate) mod build;
mod pick;

pub use build::WeightedIndexBuilder;
pub use pick::PickPolicy;

/// Immutable pick index over a subset of a collection's entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedIndex {
	pub(crate) order_indices: Vec<u32>,
	pub(crate) weight_rank: Vec<u32>,
	pub(crate) cumulative_weights: Vec<u64>,
	pub(crate) total_weight: u64,
}

impl WeightedIndex {
	/// Original entry positions of included members, in insertion order.
	#[inline]
	pub fn order_indices(&self) -> &[u32] {
		&self.order_indices
	}

	/// Positions into [`Self::order_indices`] sorted by weight ascending.
	#[inline]
	pub fn weight_rank(&self) -> &[u32] {
		&self.weight_rank
	}

	/// Running weight sums in [`Self::weight_rank`] order.
	#[inline]
	pub fn cumulative_weights(&self) -> &[u64] {
		&self.cumulative_weights
	}

	/// Sum of all included weights.
	#[inline]
	pub fn total_weight(&self) -> u64 {
		self.total_weight
	}

	/// Number of included members.
	#[inline]
	pub fn len(&self) -> usize {
		self.order_indices.len()
	}

	/// Returns true if no member was included.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.order_indices.is_empty()
	}

	/// Returns true if original entry `index` was included. Test-only O(n) scan.
	#[cfg(test)]
	pub(crate) fn contains(&self, index: u32) -> bool {
		self.order_indices.contains(&index)
	}
}
