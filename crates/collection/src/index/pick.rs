use scatter_primitives::SeedStream;
use serde::{Deserialize, Serialize};

use super::WeightedIndex;

/// Selection policy for a single pick.
///
/// Ordinal policies interpret the request as a 0-based position; random
/// policies interpret it as a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickPolicy {
	/// `request`-th member in collection order.
	#[default]
	Ascending,
	/// `request`-th member counting from the end of collection order.
	Descending,
	/// Member with the `request`-th smallest weight.
	WeightAscending,
	/// Member with the `request`-th largest weight.
	WeightDescending,
	/// Uniform draw seeded by `request`.
	UniformRandom,
	/// Weight-proportional draw seeded by `request`.
	WeightedRandom,
}

impl PickPolicy {
	/// Returns true if the request is a seed rather than a position.
	#[inline]
	pub const fn is_random(self) -> bool {
		matches!(self, Self::UniformRandom | Self::WeightedRandom)
	}
}

impl WeightedIndex {
	/// Picks an original entry index under `policy`.
	///
	/// Returns `None` for an empty index or an out-of-range ordinal.
	pub fn pick(&self, request: u64, policy: PickPolicy) -> Option<u32> {
		match policy {
			PickPolicy::Ascending => self.order_indices.get(ordinal(request)?).copied(),
			PickPolicy::Descending => {
				let pos = self.reversed(ordinal(request)?)?;
				self.order_indices.get(pos).copied()
			}
			PickPolicy::WeightAscending => self.ranked(ordinal(request)?),
			PickPolicy::WeightDescending => self.ranked(self.reversed(ordinal(request)?)?),
			PickPolicy::UniformRandom => self.pick_random(request),
			PickPolicy::WeightedRandom => self.pick_weighted_random(request),
		}
	}

	/// Uniform pick seeded by `seed`.
	pub fn pick_random(&self, seed: u64) -> Option<u32> {
		let rank = SeedStream::new(seed).index_below(self.len())?;
		self.ranked(rank)
	}

	/// Weight-proportional pick seeded by `seed`.
	///
	/// Draws `r` in `0..total_weight` and selects the first rank whose running
	/// sum exceeds `r`. Members with zero weight own an empty interval and are
	/// never selected.
	pub fn pick_weighted_random(&self, seed: u64) -> Option<u32> {
		let threshold = SeedStream::new(seed).below(self.total_weight)?;
		let rank = self.cumulative_weights.partition_point(|&running| running <= threshold);
		self.ranked(rank)
	}

	#[inline]
	fn ranked(&self, rank: usize) -> Option<u32> {
		let pos = *self.weight_rank.get(rank)?;
		self.order_indices.get(pos as usize).copied()
	}

	#[inline]
	fn reversed(&self, pos: usize) -> Option<usize> {
		self.len().checked_sub(1)?.checked_sub(pos)
	}
}

#[inline]
fn ordinal(request: u64) -> Option<usize> {
	usize::try_from(request).ok()
}
