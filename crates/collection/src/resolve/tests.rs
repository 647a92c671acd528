use pretty_assertions::assert_eq;
use rstest::rstest;
use scatter_primitives::tag_set;

use super::*;
use crate::collection::CollectionKind;
use crate::entry::Entry;

fn mesh(name: &str) -> Arc<Collection> {
	Collection::new(name, CollectionKind::Mesh)
}

fn with_leaves(name: &str, weights: &[u32]) -> Arc<Collection> {
	let collection = mesh(name);
	for (i, &weight) in weights.iter().enumerate() {
		collection.push_entry(Entry::leaf(format!("/Game/{name}/{i}"), weight)).unwrap();
	}
	collection
}

/// `a = [leaf(1), sub(b, 100)]`, `b = [leaf(1), leaf(2)]`.
fn two_level() -> (Arc<Collection>, Arc<Collection>) {
	let b = with_leaves("b", &[1, 2]);
	let a = with_leaves("a", &[1]);
	a.push_entry(Entry::sub_collection(&b, 100)).unwrap();
	(a, b)
}

#[test]
fn scenario_skips_zero_weight() {
	let c = with_leaves("c", &[1, 0, 3]);
	assert_eq!(c.get_entry_at(0).unwrap().0.index(), 0);
	assert_eq!(c.get_entry_at(1).unwrap().0.index(), 2);
	assert!(c.get_entry_at(2).is_none());
	for seed in 0..2_000 {
		let (entry, _) = c.get_entry_weighted_random(seed).unwrap();
		assert_ne!(entry.index(), 1);
	}
}

#[test]
fn empty_collection_never_resolves() {
	let c = mesh("empty");
	assert!(c.get_entry_at(0).is_none());
	assert!(c.get_entry(0, 7, PickPolicy::Ascending).is_none());
	assert!(c.get_entry_random(7).is_none());
	assert!(c.get_entry_weighted_random(7).is_none());
}

#[rstest]
#[case(PickPolicy::Ascending, 0, 0)]
#[case(PickPolicy::Descending, 0, 2)]
#[case(PickPolicy::WeightAscending, 0, 1)]
#[case(PickPolicy::WeightDescending, 0, 2)]
#[case(PickPolicy::WeightDescending, 2, 1)]
fn ordinal_policies_read_index(#[case] policy: PickPolicy, #[case] index: usize, #[case] expected: usize) {
	let c = with_leaves("c", &[2, 1, 5]);
	let (entry, host) = c.get_entry(index, 99, policy).unwrap();
	assert_eq!(entry.index(), expected);
	assert_eq!(host.id(), c.id());
}

#[test]
fn get_entry_at_descends_to_a_leaf() {
	let (a, b) = two_level();
	let (entry, host) = a.get_entry_at(1).unwrap();
	assert!(!entry.is_sub_collection());
	assert_eq!(host.id(), b.id());
	let expected = b.snapshot().registry().main().pick_weighted_random(2).unwrap();
	assert_eq!(entry.index(), expected as usize);

	let (leaf, host) = a.get_entry_at(0).unwrap();
	assert_eq!(leaf.index(), 0);
	assert_eq!(host.id(), a.id());
}

#[test]
fn policy_pick_descends_weighted_with_doubled_seed() {
	let (a, b) = two_level();
	for seed in 0..64_u64 {
		let (entry, host) = a.get_entry(1, seed, PickPolicy::Ascending).unwrap();
		assert_eq!(host.id(), b.id());
		let expected = b.snapshot().registry().main().pick_weighted_random(seed.wrapping_mul(2)).unwrap();
		assert_eq!(entry.index(), expected as usize);
	}
}

#[test]
fn weighted_random_descends_with_doubled_seed() {
	let (a, b) = two_level();
	let a_main = a.snapshot().registry().main().clone();
	let b_main = b.snapshot().registry().main().clone();
	let mut descended = 0;
	for seed in 0..256_u64 {
		let (entry, host) = a.get_entry_weighted_random(seed).unwrap();
		if a_main.pick_weighted_random(seed) == Some(1) {
			descended += 1;
			assert_eq!(host.id(), b.id());
			assert_eq!(Some(entry.index() as u32), b_main.pick_weighted_random(seed.wrapping_mul(2)));
		} else {
			assert_eq!(host.id(), a.id());
			assert_eq!(entry.index(), 0);
		}
	}
	assert!(descended > 0);
}

#[test]
fn uniform_random_descends_with_incremented_seed() {
	let (a, b) = two_level();
	let a_main = a.snapshot().registry().main().clone();
	let b_main = b.snapshot().registry().main().clone();
	for seed in 0..256_u64 {
		let (entry, host) = a.get_entry_random(seed).unwrap();
		if a_main.pick_random(seed) == Some(1) {
			assert_eq!(host.id(), b.id());
			assert_eq!(Some(entry.index() as u32), b_main.pick_random(seed.wrapping_add(1)));
		} else {
			assert_eq!(host.id(), a.id());
		}
	}
}

#[test]
fn seed_arithmetic_wraps() {
	let (a, _) = two_level();
	assert!(a.get_entry(1, u64::MAX, PickPolicy::Ascending).is_some());
	assert!(a.get_entry_random(u64::MAX).is_some());
}

#[test]
fn resolution_is_deterministic() {
	let (a, _) = two_level();
	for seed in [0, 1, 42, 1 << 40] {
		let first = a.get_entry_weighted_random(seed).map(|(e, h)| (e.index(), h.id()));
		let second = a.get_entry_weighted_random(seed).map(|(e, h)| (e.index(), h.id()));
		assert_eq!(first, second);
	}
}

#[test]
fn dropped_sub_collection_yields_none() {
	let a = mesh("a");
	{
		let gone = with_leaves("gone", &[1]);
		a.push_entry(Entry::sub_collection(&gone, 1)).unwrap();
	}
	assert!(a.get_entry_weighted_random(3).is_none());
	assert!(a.get_entry(0, 3, PickPolicy::Ascending).is_none());
	assert!(a.get_entry_at(0).is_none());
	// The stored entry is still readable.
	assert!(a.entry(0).unwrap().is_sub_collection());
}

fn tagged_pair() -> Arc<Collection> {
	let b = mesh("b");
	b.push_entry(Entry::leaf("/Game/b/0", 1).with_tags(["leaf"])).unwrap();
	b.set_collection_tags(tag_set(["b"]));
	let a = mesh("a");
	a.push_entry(Entry::sub_collection(&b, 1).with_tags(["x"])).unwrap();
	a
}

#[rstest]
#[case(TagInheritance::empty(), &[])]
#[case(TagInheritance::ASSET, &["x", "leaf"])]
#[case(TagInheritance::COLLECTION, &["b"])]
#[case(TagInheritance::all(), &["x", "leaf", "b"])]
fn tag_inheritance_selects_sources(#[case] inheritance: TagInheritance, #[case] expected: &[&str]) {
	let a = tagged_pair();
	let mut tags = TagSet::default();
	let (entry, _) = a.get_entry_weighted_random_with_tags(5, inheritance, &mut tags).unwrap();
	assert_eq!(entry.asset().unwrap().path, "/Game/b/0");
	assert_eq!(tags, tag_set(expected.iter().copied()));
}

#[test]
fn tags_accumulate_into_existing_set() {
	let a = tagged_pair();
	let mut tags = tag_set(["seed"]);
	a.get_entry_with_tags(0, 0, PickPolicy::Ascending, TagInheritance::ASSET, &mut tags).unwrap();
	assert_eq!(tags, tag_set(["seed", "x", "leaf"]));

	let mut tags = TagSet::default();
	a.get_entry_random_with_tags(0, TagInheritance::COLLECTION, &mut tags).unwrap();
	assert_eq!(tags, tag_set(["b"]));
}

#[test]
fn category_scopes_first_hop() {
	let c = mesh("c");
	c.push_entry(Entry::leaf("/Game/tree/0", 1).with_category("tree")).unwrap();
	c.push_entry(Entry::leaf("/Game/rock/0", 1).with_category("rock")).unwrap();
	c.push_entry(Entry::leaf("/Game/tree/1", 4).with_category("tree")).unwrap();

	let tree = Symbol::intern("tree");
	assert_eq!(c.get_entry_in_category(tree, 1, 0, PickPolicy::Ascending).unwrap().0.index(), 2);
	assert_eq!(c.get_entry_in_category(tree, 0, 0, PickPolicy::WeightDescending).unwrap().0.index(), 2);
	for seed in 0..128 {
		let (entry, _) = c.get_entry_weighted_random_in_category(tree, seed).unwrap();
		assert_ne!(entry.index(), 1);
		let (entry, _) = c.get_entry_random_in_category(tree, seed).unwrap();
		assert_ne!(entry.index(), 1);
	}

	let missing = Symbol::intern("missing");
	assert!(c.get_entry_random_in_category(missing, 0).is_none());
}

#[test]
fn category_scope_does_not_apply_inside_sub_collection() {
	let b = mesh("b");
	b.push_entry(Entry::leaf("/Game/b/0", 1).with_category("other")).unwrap();
	let a = mesh("a");
	a.push_entry(Entry::sub_collection(&b, 1).with_category("group")).unwrap();

	let (entry, host) = a.get_entry_weighted_random_in_category(Symbol::intern("group"), 11).unwrap();
	assert_eq!(host.id(), b.id());
	assert_eq!(entry.index(), 0);
}
