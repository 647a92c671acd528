use super::WeightedIndex;

/// Builder for a [`WeightedIndex`].
///
/// Members are pushed in original collection order; [`Self::build`] filters,
/// ranks and accumulates them in one pass.
#[derive(Debug, Default)]
pub struct WeightedIndexBuilder {
	members: Vec<(u32, u32)>,
	include_zero_weight: bool,
}

impl WeightedIndexBuilder {
	/// Creates an empty builder that drops zero-weight members.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty builder with room for `capacity` members.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			members: Vec::with_capacity(capacity),
			include_zero_weight: false,
		}
	}

	/// Sets whether zero-weight members are kept.
	///
	/// Kept zero-weight members are reachable by ordinal policies but occupy
	/// an empty interval of the cumulative array, so weighted-random picks
	/// never select them.
	pub fn include_zero_weight(mut self, on: bool) -> Self {
		self.include_zero_weight = on;
		self
	}

	/// Registers a member.
	pub fn push(&mut self, original_index: u32, weight: u32) {
		self.members.push((original_index, weight));
	}

	/// Returns the number of registered members, before filtering.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Returns true if nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Compiles the registered members.
	pub fn build(self) -> WeightedIndex {
		let include_zero_weight = self.include_zero_weight;
		let (order_indices, weights): (Vec<u32>, Vec<u32>) = self
			.members
			.into_iter()
			.filter(|&(_, weight)| include_zero_weight || weight > 0)
			.unzip();

		let mut weight_rank: Vec<u32> = (0..order_indices.len())
			.map(|pos| u32_index(pos, "weight_rank"))
			.collect();
		// Stable: equal weights keep insertion order.
		weight_rank.sort_by_key(|&pos| weights[pos as usize]);

		let mut running = 0u64;
		let cumulative_weights: Vec<u64> = weight_rank
			.iter()
			.map(|&pos| {
				running += u64::from(weights[pos as usize]);
				running
			})
			.collect();

		WeightedIndex {
			total_weight: cumulative_weights.last().copied().unwrap_or(0),
			order_indices,
			weight_rank,
			cumulative_weights,
		}
	}
}

/// Converts a `usize` position to `u32` index storage.
///
/// # Panics
///
/// Panics if `idx` exceeds `u32::MAX`.
pub(crate) fn u32_index(idx: usize, what: &'static str) -> u32 {
	u32::try_from(idx).unwrap_or_else(|_| panic!("{} index overflow: {}", what, idx))
}
