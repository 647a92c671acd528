use serde::{Deserialize, Serialize};

/// Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	#[inline]
	const fn slot(self) -> usize {
		match self {
			Axis::X => 0,
			Axis::Y => 1,
			Axis::Z => 2,
		}
	}
}

/// Axis-aligned bounding box of a placeable asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
	pub min: [f64; 3],
	pub max: [f64; 3],
}

impl Bounds {
	/// Creates bounds from two corners, normalizing each axis so `min <= max`.
	pub fn new(a: [f64; 3], b: [f64; 3]) -> Self {
		let mut min = [0.0; 3];
		let mut max = [0.0; 3];
		for i in 0..3 {
			min[i] = a[i].min(b[i]);
			max[i] = a[i].max(b[i]);
		}
		Self { min, max }
	}

	/// Creates bounds centered on the origin with the given full extents.
	pub fn from_size(size: [f64; 3]) -> Self {
		let half = size.map(|s| s.abs() * 0.5);
		Self {
			min: half.map(|h| -h),
			max: half,
		}
	}

	/// Returns the full extent along each axis.
	#[inline]
	pub fn size(&self) -> [f64; 3] {
		[
			self.max[0] - self.min[0],
			self.max[1] - self.min[1],
			self.max[2] - self.min[2],
		]
	}

	/// Returns the extent along `axis`.
	#[inline]
	pub fn axis_size(&self, axis: Axis) -> f64 {
		self.size()[axis.slot()]
	}

	/// Returns the smallest of the three extents.
	pub fn min_axis_size(&self) -> f64 {
		let [x, y, z] = self.size();
		x.min(y).min(z)
	}

	/// Returns the largest of the three extents.
	pub fn max_axis_size(&self) -> f64 {
		let [x, y, z] = self.size();
		x.max(y).max(z)
	}

	/// Returns the mean of the three extents.
	pub fn average_axis_size(&self) -> f64 {
		let [x, y, z] = self.size();
		(x + y + z) / 3.0
	}

	/// Returns true if every coordinate is finite.
	pub fn is_finite(&self) -> bool {
		self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
	}
}

#[cfg(test)]
mod tests;
