//! Manifest, attribute set and resolution working together.

use scatter_collection::{PickPolicy, flatten};
use scatter_ingest::{AttributeSet, IngestConfig, Library, LibraryManifest, ingest};

const MANIFEST: &str = r#"
[[collection]]
name = "biome"

[[collection.entry]]
collection = "ground_cover"
weight = 1

[[collection.entry]]
collection = "rocks"
weight = 1

[[collection]]
name = "ground_cover"
tags = ["cover"]

[[collection]]
name = "rocks"
tags = ["rock"]

[[collection.entry]]
asset = "/Game/Rock"

[[collection]]
name = "flat"
"#;

#[test]
fn ingested_collection_is_reachable_through_the_library() {
	let library = Library::from_manifest(&LibraryManifest::from_toml_str(MANIFEST).unwrap()).unwrap();
	let biome = library.get("biome").unwrap();
	let cover = library.get("ground_cover").unwrap();

	// Empty sub-collections resolve to nothing.
	assert!(biome.get_entry(0, 1, PickPolicy::Ascending).is_none());

	let set = AttributeSet::from_json_str(
		r#"{ "rows": [
			{ "path": "/Game/Grass", "weight": 4, "tags": "green" },
			{ "path": "/Game/Clover", "weight": 1 }
		] }"#,
	)
	.unwrap();
	let report = ingest(&cover, &set, &IngestConfig::default()).unwrap();
	assert_eq!(report.accepted, 2);

	let (entry, host) = biome.get_entry(0, 1, PickPolicy::Ascending).unwrap();
	assert_eq!(host.id(), cover.id());
	assert!(entry.asset().unwrap().path.starts_with("/Game/"));

	let flat = library.get("flat").unwrap();
	assert_eq!(flatten(&biome, &flat).unwrap(), 3);
	let paths: Vec<_> = flat.entries().iter().map(|e| e.asset().unwrap().path.clone()).collect();
	assert_eq!(paths, vec!["/Game/Grass", "/Game/Clover", "/Game/Rock"]);
}
