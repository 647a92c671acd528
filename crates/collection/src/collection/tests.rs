use pretty_assertions::assert_eq;
use scatter_primitives::tag_set;

use super::*;
use crate::index::PickPolicy;

fn leaves(name: &str, weights: &[u32]) -> Arc<Collection> {
	let collection = Collection::new(name, CollectionKind::Mesh);
	for (i, &weight) in weights.iter().enumerate() {
		collection.push_entry(Entry::leaf(format!("/Game/{name}/{i}"), weight)).unwrap();
	}
	collection
}

#[test]
fn reverse_edge_is_rejected() {
	let a = leaves("a", &[1]);
	let b = leaves("b", &[1]);
	b.push_entry(Entry::sub_collection(&a, 1)).unwrap();

	let err = a.push_entry(Entry::sub_collection(&b, 1)).unwrap_err();
	assert!(matches!(err, CollectionError::CycleRejected { .. }));
	let err = a.set_sub_collection(0, &b).unwrap_err();
	assert!(matches!(err, CollectionError::CycleRejected { .. }));

	assert_eq!(a.len(), 1);
	assert!(!a.entries()[0].is_sub_collection());
	for seed in 0..32 {
		assert_eq!(a.get_entry_weighted_random(seed).unwrap().1.id(), a.id());
	}
}

#[test]
fn rejected_edit_changes_nothing() {
	let a = leaves("a", &[1, 2]);
	a.compile();
	let result = a.edit_entries(|entries| {
		entries.clear();
		entries.push(Entry::sub_collection(&a, 1));
	});
	assert!(result.is_err());
	assert_eq!(a.len(), 2);
	assert!(a.is_compiled(), "a refused edit must not invalidate");
}

#[test]
fn set_sub_collection_checks_range() {
	let a = leaves("a", &[1]);
	let b = leaves("b", &[1]);
	assert_eq!(
		a.set_sub_collection(3, &b).unwrap_err(),
		CollectionError::EntryOutOfRange {
			collection: "a".into(),
			index: 3,
			len: 1,
		}
	);

	a.set_sub_collection(0, &b).unwrap();
	let entry = a.entry(0).unwrap();
	assert_eq!(entry.sub_collection_ref().unwrap().id(), b.id());
	assert_eq!(entry.weight, 1);
}

#[test]
fn edits_invalidate_the_cache() {
	let a = leaves("a", &[1]);
	assert_eq!(a.cache_status(), CacheStatus::Empty);
	a.compile();
	assert_eq!(a.cache_status(), CacheStatus::Ready);

	a.push_entry(Entry::leaf("/Game/a/1", 1)).unwrap();
	assert_eq!(a.cache_status(), CacheStatus::Empty);
	assert_eq!(a.snapshot().registry().main().len(), 2);

	a.set_collection_tags(tag_set(["forest"]));
	assert!(!a.is_compiled());
	assert_eq!(a.snapshot().collection_tags(), &tag_set(["forest"]));
}

#[test]
fn zero_weight_override_keeps_entries() {
	let a = leaves("a", &[0, 2]);
	assert_eq!(a.snapshot().registry().main().order_indices(), &[1]);

	a.set_settings(CollectionSettings {
		do_not_ignore_invalid_entries: true,
		..CollectionSettings::default()
	});
	assert_eq!(a.snapshot().registry().main().order_indices(), &[0, 1]);
	assert_eq!(a.get_entry(0, 0, PickPolicy::Ascending).unwrap().0.index(), 0);
	for seed in 0..500 {
		assert_eq!(a.get_entry_weighted_random(seed).unwrap().0.index(), 1);
	}
}

#[test]
fn ingestion_contract() {
	let a = Collection::new("ingested", CollectionKind::Data);
	a.init_num_entries(3);
	assert_eq!(a.len(), 3);

	a.for_each_entry_mut(|i, entry| entry.weight = i as u32 + 1).unwrap();
	a.set_asset_path(2, "/Game/Third").unwrap();
	assert!(a.set_asset_path(3, "/Game/Nope").is_err());

	let mut seen = Vec::new();
	a.for_each_entry(|i, entry| seen.push((i, entry.weight, entry.asset().unwrap().path.clone())));
	assert_eq!(
		seen,
		vec![(0, 1, String::new()), (1, 2, String::new()), (2, 3, "/Game/Third".to_owned())]
	);
	assert_eq!(a.snapshot().registry().total_weight(), 6);
}

#[test]
fn ids_are_unique_and_debug_is_terse() {
	let a = Collection::new("a", CollectionKind::Actor);
	let b = Collection::new("a", CollectionKind::Actor);
	assert_ne!(a.id(), b.id());
	let debug = format!("{a:?}");
	assert!(debug.contains("Actor"));
	assert!(debug.contains("Empty"));
}

#[test]
fn settings_round_trip_through_serde() {
	let settings: CollectionSettings = serde_json::from_str(r#"{ "do_not_ignore_invalid_entries": true }"#).unwrap();
	assert!(settings.do_not_ignore_invalid_entries);
	assert_eq!(settings.grammar, CollectionGrammar::default());
	assert_eq!(serde_json::to_string(&CollectionKind::Actor).unwrap(), "\"actor\"");
}
