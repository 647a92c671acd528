//! Column mapping used when ingesting attribute sets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Names the attributes that feed each entry field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
	/// Attribute holding the asset path. Rows without it are skipped.
	pub path_attribute: String,
	/// Attribute holding the pick weight.
	pub weight_attribute: String,
	/// Attribute holding the category name.
	pub category_attribute: String,
	/// Attribute holding tags, as a list or separated text.
	pub tags_attribute: String,
	/// Weight used when a row has no weight attribute.
	#[serde(default = "default_weight")]
	pub default_weight: u32,
	/// Separator for text-encoded tags.
	#[serde(default = "default_tag_separator")]
	pub tag_separator: String,
}

fn default_weight() -> u32 {
	1
}

fn default_tag_separator() -> String {
	",".to_owned()
}

impl Default for IngestConfig {
	fn default() -> Self {
		Self {
			path_attribute: "path".to_owned(),
			weight_attribute: "weight".to_owned(),
			category_attribute: "category".to_owned(),
			tags_attribute: "tags".to_owned(),
			default_weight: default_weight(),
			tag_separator: default_tag_separator(),
		}
	}
}

impl IngestConfig {
	pub fn from_toml_str(toml: &str) -> Result<Self> {
		Ok(toml::from_str(toml)?)
	}

	/// Reads and parses a TOML config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let toml = std::fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
		Self::from_toml_str(&toml)
	}
}
