//! TOML description of a set of collections.
//!
//! ```toml
//! [[collection]]
//! name = "trees"
//! tags = ["tree"]
//!
//! [[collection.entry]]
//! asset = "/Game/Oak"
//! weight = 3
//! size = [2.0, 2.0, 6.0]
//!
//! [[collection]]
//! name = "forest"
//!
//! [[collection.entry]]
//! collection = "trees"
//! weight = 4
//! tags = ["tall"]
//! ```

use std::path::Path;

use scatter_collection::{AssetGrammar, CollectionGrammar, CollectionKind, CollectionSettings};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Every collection of a library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryManifest {
	#[serde(default, rename = "collection")]
	pub collections: Vec<CollectionManifest>,
}

/// One collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionManifest {
	pub name: String,
	#[serde(default)]
	pub kind: CollectionKind,
	/// Collection tags, inherited by anything resolved through it.
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub settings: CollectionSettings,
	#[serde(default, rename = "entry")]
	pub entries: Vec<EntryManifest>,
}

/// One entry: exactly one of `asset` and `collection` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryManifest {
	/// Leaf asset path.
	#[serde(default)]
	pub asset: Option<String>,
	/// Name of a sub-collection in the same library.
	#[serde(default)]
	pub collection: Option<String>,
	#[serde(default = "default_weight")]
	pub weight: u32,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	/// Full extents of the leaf's bounds, centered on the origin.
	#[serde(default)]
	pub size: Option<[f64; 3]>,
	#[serde(default)]
	pub material_variants: Vec<String>,
	#[serde(default)]
	pub grammar: AssetGrammar,
	/// Overrides the referenced collection's grammar.
	#[serde(default)]
	pub sub_grammar: Option<CollectionGrammar>,
}

fn default_weight() -> u32 {
	1
}

impl LibraryManifest {
	pub fn from_toml_str(toml: &str) -> Result<Self> {
		Ok(toml::from_str(toml)?)
	}

	/// Reads and parses a TOML manifest file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let toml = std::fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
		Self::from_toml_str(&toml)
	}
}
