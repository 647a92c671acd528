//! Seeded random streams.
//!
//! Every random pick constructs a fresh stream from its seed, so identical
//! seeds produce identical picks on every call, thread and platform. There is
//! no shared generator state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream derived from a single `u64` seed.
pub struct SeedStream {
	rng: ChaCha8Rng,
}

impl SeedStream {
	/// Creates a stream for `seed`.
	#[inline]
	pub fn new(seed: u64) -> Self {
		Self {
			rng: ChaCha8Rng::seed_from_u64(seed),
		}
	}

	/// Draws a uniform index in `0..len`, or `None` when `len` is zero.
	#[inline]
	pub fn index_below(&mut self, len: usize) -> Option<usize> {
		(len > 0).then(|| self.rng.gen_range(0..len))
	}

	/// Draws a uniform value in `0..bound`, or `None` when `bound` is zero.
	#[inline]
	pub fn below(&mut self, bound: u64) -> Option<u64> {
		(bound > 0).then(|| self.rng.gen_range(0..bound))
	}
}
