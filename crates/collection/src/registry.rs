//! Main index plus per-category sub-indices.
//!
//! # Role
//!
//! An [`IndexRegistry`] owns one [`WeightedIndex`] covering every included
//! entry and one per category name. Every index is compiled independently
//! from its own member set, and all of them report positions in the owning
//! collection's entry list.

use rustc_hash::FxHashMap;
use scatter_primitives::Symbol;

use crate::index::build::u32_index;
use crate::index::{WeightedIndex, WeightedIndexBuilder};

/// Compiled pick indices for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRegistry {
	main: WeightedIndex,
	categories: FxHashMap<Symbol, WeightedIndex>,
}

impl IndexRegistry {
	/// Compiles a registry from `(category, weight)` pairs in entry order.
	///
	/// Zero-weight members are dropped from every index unless
	/// `include_zero_weight` is set.
	pub fn compile<I>(members: I, include_zero_weight: bool) -> Self
	where
		I: IntoIterator<Item = (Option<Symbol>, u32)>,
	{
		let members = members.into_iter();
		let mut main = WeightedIndexBuilder::with_capacity(members.size_hint().0).include_zero_weight(include_zero_weight);
		let mut by_category: FxHashMap<Symbol, WeightedIndexBuilder> = FxHashMap::default();

		for (pos, (category, weight)) in members.enumerate() {
			let original_index = u32_index(pos, "collection entry");
			main.push(original_index, weight);
			if let Some(category) = category {
				by_category
					.entry(category)
					.or_insert_with(|| WeightedIndexBuilder::new().include_zero_weight(include_zero_weight))
					.push(original_index, weight);
			}
		}

		Self {
			main: main.build(),
			categories: by_category.into_iter().map(|(name, builder)| (name, builder.build())).collect(),
		}
	}

	/// Index over every included entry.
	#[inline]
	pub fn main(&self) -> &WeightedIndex {
		&self.main
	}

	/// Index over the entries of `category`, if any entry carries it.
	#[inline]
	pub fn category(&self, category: Symbol) -> Option<&WeightedIndex> {
		self.categories.get(&category)
	}

	/// Iterates category indices in unspecified order.
	pub fn categories(&self) -> impl Iterator<Item = (Symbol, &WeightedIndex)> + '_ {
		self.categories.iter().map(|(&name, index)| (name, index))
	}

	/// Number of category indices.
	pub fn category_count(&self) -> usize {
		self.categories.len()
	}

	/// Total weight of the main index.
	#[inline]
	pub fn total_weight(&self) -> u64 {
		self.main.total_weight()
	}
}
