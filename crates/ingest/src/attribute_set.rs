//! Tabular attribute sets produced by upstream content tools.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// One attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	List(Vec<String>),
}

impl AttributeValue {
	/// Text value, if this is text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Non-negative integral weight.
	///
	/// Floats are accepted when finite, non-negative and in range, and are
	/// rounded to the nearest integer. Numeric text is parsed the same way.
	pub fn as_weight(&self) -> Option<u32> {
		match self {
			Self::Int(value) => u32::try_from(*value).ok(),
			Self::Float(value) => float_weight(*value),
			Self::Text(text) => {
				let text = text.trim();
				text.parse::<u32>().ok().or_else(|| text.parse::<f64>().ok().and_then(float_weight))
			}
			Self::Bool(_) | Self::List(_) => None,
		}
	}
}

fn float_weight(value: f64) -> Option<u32> {
	let rounded = value.round();
	(rounded.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&rounded)).then_some(rounded as u32)
}

/// One row: attribute name to value.
pub type AttributeRow = FxHashMap<String, AttributeValue>;

/// Rows of named attributes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
	#[serde(default)]
	pub rows: Vec<AttributeRow>,
}

impl AttributeSet {
	/// Parses `{"rows": [...]}` JSON.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads and parses a JSON attribute set file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
		Self::from_json_str(&json)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
