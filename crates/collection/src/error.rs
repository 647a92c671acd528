//! Error types for collection editing.
//!
//! Resolution never fails with an error: an empty index, an out-of-range
//! request or an unloaded sub-collection all surface as `None`. The variants
//! here are reserved for edits that must be refused.

use thiserror::Error;

use crate::collection::CollectionKind;

/// Errors raised by collection edits and authoring operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
	/// Referencing `candidate` from `host` would close a cycle.
	#[error("sub-collection '{candidate}' would create a cycle through '{host}'")]
	CycleRejected {
		/// Collection receiving the new sub-collection entry.
		host: String,
		/// Collection that was about to be referenced.
		candidate: String,
	},

	/// Flatten source and target hold different entry kinds.
	#[error("cannot flatten a {source_kind} collection into a {target_kind} collection")]
	TypeMismatch {
		/// Kind of the collection being flattened.
		source_kind: CollectionKind,
		/// Kind of the collection receiving the leaves.
		target_kind: CollectionKind,
	},

	/// An edit addressed an entry slot that does not exist.
	#[error("entry index {index} out of range for '{collection}' (len {len})")]
	EntryOutOfRange {
		/// Collection being edited.
		collection: String,
		/// Requested slot.
		index: usize,
		/// Number of entries at the time of the edit.
		len: usize,
	},
}

/// Result type for collection edits.
pub type Result<T> = std::result::Result<T, CollectionError>;
