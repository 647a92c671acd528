//! Error types for ingestion and library loading.

use std::path::PathBuf;

use scatter_collection::CollectionError;
use thiserror::Error;

/// Errors raised while reading attribute sets, configs and manifests.
#[derive(Debug, Error)]
pub enum IngestError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid attribute set: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid TOML: {0}")]
	Toml(#[from] toml::de::Error),

	/// A collection edit was refused.
	#[error(transparent)]
	Collection(CollectionError),

	/// Linking a manifest sub-collection would close a cycle.
	#[error("collection '{host}' cannot reference '{candidate}': cycle")]
	Cycle { host: String, candidate: String },

	/// A manifest entry names a collection the library does not hold.
	#[error("collection '{collection}' references unknown collection '{reference}'")]
	UnknownCollection { collection: String, reference: String },

	#[error("collection '{0}' is already registered")]
	DuplicateCollection(String),

	/// A manifest entry is neither a leaf nor a sub-collection, or both.
	#[error("entry {index} of '{collection}' is invalid: {reason}")]
	InvalidEntry {
		collection: String,
		index: usize,
		reason: &'static str,
	},
}

impl From<CollectionError> for IngestError {
	fn from(err: CollectionError) -> Self {
		match err {
			CollectionError::CycleRejected { host, candidate } => Self::Cycle { host, candidate },
			other => Self::Collection(other),
		}
	}
}

impl IngestError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
