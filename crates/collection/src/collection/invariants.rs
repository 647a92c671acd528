use std::sync::{Arc, Barrier};
use std::thread;

use super::{CacheStatus, Collection, CollectionKind};
use crate::entry::Entry;

fn sample() -> Arc<Collection> {
	let collection = Collection::new("sample", CollectionKind::Mesh);
	for (i, weight) in [3, 0, 1, 7, 1].into_iter().enumerate() {
		let entry = Entry::leaf(format!("/Game/Sample/{i}"), weight).with_category(if i % 2 == 0 { "even" } else { "odd" });
		collection.push_entry(entry).unwrap();
	}
	collection
}

/// Must produce identical indices on every compile without an intervening edit.
///
/// * Enforced in: `Collection::snapshot`, `IndexRegistry::compile`
/// * Failure symptom: the same seed picks different entries before and after an
///   unrelated `invalidate()`.
#[cfg_attr(test, test)]
pub(crate) fn test_compile_is_idempotent() {
	let collection = sample();
	let first = collection.snapshot();
	let again = collection.snapshot();
	assert!(Arc::ptr_eq(&first, &again), "a ready snapshot must be reused");

	collection.invalidate();
	assert_eq!(collection.cache_status(), CacheStatus::Empty);
	let rebuilt = collection.snapshot();
	assert!(!Arc::ptr_eq(&first, &rebuilt));
	assert_eq!(first.registry(), rebuilt.registry());
}

/// Must compile once when many readers race on an empty cache.
///
/// * Enforced in: `Collection::snapshot` (re-check under the write lock)
/// * Failure symptom: readers observe different snapshots or a partially built
///   registry.
#[cfg_attr(test, test)]
pub(crate) fn test_concurrent_first_reads_compile_once() {
	const READERS: usize = 8;

	let collection = sample();
	let barrier = Arc::new(Barrier::new(READERS));
	let handles: Vec<_> = (0..READERS)
		.map(|_| {
			let collection = Arc::clone(&collection);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				collection.snapshot()
			})
		})
		.collect();

	let snaps: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	for snap in &snaps[1..] {
		assert!(Arc::ptr_eq(&snaps[0], snap));
	}
	assert_eq!(snaps[0].registry().main().order_indices(), &[0, 2, 3, 4]);
	assert!(collection.is_compiled());
}

/// Must keep a resolved entry readable after its collection is invalidated
/// or dropped.
///
/// * Enforced in: `EntryRef` (holds the snapshot `Arc`)
/// * Failure symptom: use-after-free or a changed entry behind a live handle.
#[cfg_attr(test, test)]
pub(crate) fn test_entry_ref_survives_invalidate() {
	let collection = sample();
	let (entry, _) = collection.get_entry_at(0).unwrap();

	collection.replace_entries(vec![Entry::leaf("/Game/Replaced", 1)]).unwrap();
	assert_eq!(entry.asset().unwrap().path, "/Game/Sample/0");

	drop(collection);
	assert_eq!(entry.weight, 3);
	assert_eq!(entry.snapshot().entries().len(), 5);
}
