use pretty_assertions::assert_eq;
use scatter_collection::{CollectionKind, CollectionSettings, Entry};
use scatter_primitives::tag_set;

use super::*;

fn set(json: &str) -> AttributeSet {
	AttributeSet::from_json_str(json).unwrap()
}

#[test]
fn rows_become_leaves_in_order() {
	let collection = Collection::new("props", CollectionKind::Mesh);
	let report = ingest(
		&collection,
		&set(r#"{ "rows": [
			{ "path": "/Game/Crate", "weight": 2, "category": "box", "tags": "wood, small" },
			{ "path": "   " },
			{ "path": "/Game/Barrel", "tags": ["metal"] },
			{ "weight": 5 },
			{ "path": "/Game/Broken", "weight": -4 }
		] }"#),
		&IngestConfig::default(),
	)
	.unwrap();

	assert_eq!(
		report,
		IngestReport {
			rows: 5,
			accepted: 2,
			skipped: 3,
		}
	);

	let entries = collection.entries();
	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0].asset().unwrap().path, "/Game/Crate");
	assert_eq!(entries[0].weight, 2);
	assert_eq!(entries[0].category, Some(Symbol::intern("box")));
	assert_eq!(entries[0].tags, tag_set(["wood", "small"]));
	assert_eq!(entries[1].asset().unwrap().path, "/Game/Barrel");
	assert_eq!(entries[1].weight, 1);
	assert_eq!(entries[1].category, None);
	assert_eq!(entries[1].tags, tag_set(["metal"]));
	assert_eq!(collection.snapshot().registry().total_weight(), 3);
}

#[test]
fn previous_entries_are_replaced() {
	let collection = Collection::new("props", CollectionKind::Mesh);
	for i in 0..4 {
		collection.push_entry(Entry::leaf(format!("/Game/Old{i}"), 1)).unwrap();
	}
	collection.compile();

	ingest(&collection, &set(r#"{ "rows": [{ "path": "/Game/New" }] }"#), &IngestConfig::default()).unwrap();
	assert_eq!(collection.len(), 1);
	assert!(!collection.is_compiled());
	let (entry, _) = collection.get_entry_weighted_random(0).unwrap();
	assert_eq!(entry.asset().unwrap().path, "/Game/New");
}

#[test]
fn empty_ingestion_resolves_to_nothing() {
	let collection = Collection::new("props", CollectionKind::Mesh);
	collection.push_entry(Entry::leaf("/Game/Old", 1)).unwrap();

	let report = ingest(&collection, &set(r#"{ "rows": [{ "weight": 3 }] }"#), &IngestConfig::default()).unwrap();
	assert!(report.is_empty());
	assert!(collection.is_empty());
	assert!(collection.get_entry_weighted_random(0).is_none());
	assert!(collection.get_entry_at(0).is_none());
}

#[test]
fn custom_columns_and_separator() {
	let config = IngestConfig {
		path_attribute: "mesh".into(),
		weight_attribute: "density".into(),
		tags_attribute: "labels".into(),
		tag_separator: "|".into(),
		default_weight: 7,
		..IngestConfig::default()
	};
	let settings = CollectionSettings {
		do_not_ignore_invalid_entries: true,
		..CollectionSettings::default()
	};
	let collection = Collection::with_settings("custom", CollectionKind::Mesh, settings);
	ingest(
		&collection,
		&set(r#"{ "rows": [
			{ "mesh": "/Game/Fern", "labels": "green|low" },
			{ "mesh": "/Game/Moss", "density": "0.4", "path": "/Game/Ignored" }
		] }"#),
		&config,
	)
	.unwrap();

	let entries = collection.entries();
	assert_eq!(entries[0].weight, 7);
	assert_eq!(entries[0].tags, tag_set(["green", "low"]));
	assert_eq!(entries[1].asset().unwrap().path, "/Game/Moss");
	assert_eq!(entries[1].weight, 0);
	// Kept zero-weight rows are ordinal-only.
	assert_eq!(collection.snapshot().registry().main().order_indices(), &[0, 1]);
	assert_eq!(collection.snapshot().registry().total_weight(), 7);
}

#[test]
fn zero_weight_rows_are_skipped() {
	let rows = set(r#"{ "rows": [
		{ "path": "/Game/A", "weight": 0 },
		{ "path": "/Game/B", "weight": 0 }
	] }"#);

	let collection = Collection::new("props", CollectionKind::Mesh);
	let report = ingest(&collection, &rows, &IngestConfig::default()).unwrap();
	assert_eq!(
		report,
		IngestReport {
			rows: 2,
			accepted: 0,
			skipped: 2,
		}
	);
	assert!(report.is_empty());
	assert!(collection.is_empty());

	let settings = CollectionSettings {
		do_not_ignore_invalid_entries: true,
		..CollectionSettings::default()
	};
	let keeping = Collection::with_settings("kept", CollectionKind::Mesh, settings);
	let report = ingest(&keeping, &rows, &IngestConfig::default()).unwrap();
	assert_eq!(report.accepted, 2);
	assert_eq!(keeping.len(), 2);
	assert!(keeping.get_entry_weighted_random(0).is_none());
}
