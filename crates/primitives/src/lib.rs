//! Core value types shared by the collection and ingestion crates.

/// Axis-aligned bounds and per-axis extents.
pub mod geometry;
/// Seeded, portable random streams.
pub mod seed;
/// Process-wide interned names.
pub mod symbol;

pub use geometry::{Axis, Bounds};
pub use seed::SeedStream;
pub use symbol::{Symbol, TagSet, tag_set};
