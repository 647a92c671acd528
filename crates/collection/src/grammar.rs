//! Grammar descriptors: how an entry or collection reports its footprint.

use scatter_primitives::{Axis, Bounds, Symbol};
use serde::{Deserialize, Serialize};

/// Size policy for a leaf asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSizeMode {
	/// Constant size regardless of bounds.
	Fixed(f64),
	/// Extent along X.
	#[default]
	X,
	/// Extent along Y.
	Y,
	/// Extent along Z.
	Z,
	/// Smallest extent.
	Min,
	/// Largest extent.
	Max,
	/// Mean of the three extents.
	Average,
}

impl AssetSizeMode {
	/// Computes the size from `bounds`.
	///
	/// Returns `None` when the mode depends on bounds that are missing or not
	/// finite.
	pub fn measure(self, bounds: Option<&Bounds>) -> Option<f64> {
		if let Self::Fixed(size) = self {
			return Some(size);
		}
		let bounds = bounds.filter(|b| b.is_finite())?;
		Some(match self {
			Self::Fixed(size) => size,
			Self::X => bounds.axis_size(Axis::X),
			Self::Y => bounds.axis_size(Axis::Y),
			Self::Z => bounds.axis_size(Axis::Z),
			Self::Min => bounds.min_axis_size(),
			Self::Max => bounds.max_axis_size(),
			Self::Average => bounds.average_axis_size(),
		})
	}
}

/// Aggregation policy for a collection or sub-collection entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionSizeMode {
	/// Constant size; children are not visited.
	Fixed(f64),
	/// Smallest child size.
	Min,
	/// Largest child size.
	#[default]
	Max,
	/// Mean over children with a valid size.
	Average,
}

/// Grammar descriptor of a leaf entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetGrammar {
	pub symbol: Option<Symbol>,
	pub size: AssetSizeMode,
}

/// Grammar descriptor of a collection, or an override on a sub-collection entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionGrammar {
	pub symbol: Option<Symbol>,
	pub size: CollectionSizeMode,
}
