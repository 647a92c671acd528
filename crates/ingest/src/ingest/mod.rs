//! Filling a collection from an attribute set.
//!
//! Ingestion drives the collection only through its ingestion contract:
//! `init_num_entries`, `for_each_entry_mut` and `set_asset_path`. The
//! collection is rebuilt from scratch; previous entries are discarded.

use scatter_collection::Collection;
use scatter_primitives::{Symbol, TagSet};

use crate::attribute_set::{AttributeRow, AttributeSet, AttributeValue};
use crate::config::IngestConfig;
use crate::error::Result;

#[cfg(test)]
mod tests;

/// Outcome of one ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
	/// Rows in the attribute set.
	pub rows: usize,
	/// Rows written as entries.
	pub accepted: usize,
	/// Rows skipped for a missing path or an unusable weight. Zero weight is
	/// unusable unless the collection keeps invalid entries.
	pub skipped: usize,
}

impl IngestReport {
	/// Returns true if no row produced an entry.
	pub fn is_empty(&self) -> bool {
		self.accepted == 0
	}
}

/// Entry fields extracted from one row.
#[derive(Debug)]
struct ParsedRow {
	path: String,
	weight: u32,
	category: Option<Symbol>,
	tags: TagSet,
}

/// Replaces the entries of `collection` with one leaf per usable row.
///
/// Zero-weight rows are skipped unless the collection's settings keep
/// invalid entries.
///
/// An attribute set with no usable rows leaves the collection empty and logs
/// a warning; every resolution against it then yields no pick.
pub fn ingest(collection: &Collection, set: &AttributeSet, config: &IngestConfig) -> Result<IngestReport> {
	let keep_invalid = collection.settings().do_not_ignore_invalid_entries;
	let parsed: Vec<ParsedRow> = set
		.rows
		.iter()
		.enumerate()
		.filter_map(|(row, attributes)| {
			let parsed = parse_row(attributes, config).filter(|row| keep_invalid || row.weight > 0);
			if parsed.is_none() {
				tracing::debug!(collection = %collection.name(), row, "skipped attribute row");
			}
			parsed
		})
		.collect();

	collection.init_num_entries(parsed.len());
	collection.for_each_entry_mut(|index, entry| {
		if let Some(row) = parsed.get(index) {
			entry.weight = row.weight;
			entry.category = row.category;
			entry.tags = row.tags.clone();
		}
	})?;
	for (index, row) in parsed.iter().enumerate() {
		collection.set_asset_path(index, row.path.as_str())?;
	}

	let report = IngestReport {
		rows: set.len(),
		accepted: parsed.len(),
		skipped: set.len() - parsed.len(),
	};
	if report.is_empty() {
		tracing::warn!(collection = %collection.name(), rows = report.rows, "ingestion produced no entries");
	} else {
		tracing::debug!(collection = %collection.name(), ?report, "ingested attribute set");
	}
	Ok(report)
}

fn parse_row(row: &AttributeRow, config: &IngestConfig) -> Option<ParsedRow> {
	let path = row.get(&config.path_attribute)?.as_str()?.trim();
	if path.is_empty() {
		return None;
	}

	let weight = match row.get(&config.weight_attribute) {
		Some(value) => value.as_weight()?,
		None => config.default_weight,
	};

	let category = row
		.get(&config.category_attribute)
		.and_then(AttributeValue::as_str)
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(Symbol::intern);

	let tags = match row.get(&config.tags_attribute) {
		Some(AttributeValue::Text(text)) => split_tags(text.split(config.tag_separator.as_str())),
		Some(AttributeValue::List(items)) => split_tags(items.iter().map(String::as_str)),
		_ => TagSet::default(),
	};

	Some(ParsedRow {
		path: path.to_owned(),
		weight,
		category,
		tags,
	})
}

fn split_tags<'a>(names: impl Iterator<Item = &'a str>) -> TagSet {
	names.map(str::trim).filter(|name| !name.is_empty()).map(Symbol::intern).collect()
}
