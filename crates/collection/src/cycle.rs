//! Write-time cycle gate for sub-collection edges.
//!
//! Resolution never checks for cycles. Instead every edit that can introduce
//! a sub-collection edge walks the graph reachable from the new target and
//! refuses the edit if the walk reaches the host.
//!
//! The walk tracks the current path only, so shared sub-collections (two
//! parents referencing the same child) are not mistaken for cycles.
//!
//! Check and commit of every edit carrying a live edge run under one
//! process-wide gate. Two edits on different collections therefore cannot
//! each pass the check and together close a cycle.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashSet;

use crate::collection::{Collection, CollectionId};
use crate::entry::Entry;
use crate::error::{CollectionError, Result};

/// Held from the cycle check until the checked entries are committed.
static EDGE_GATE: Mutex<()> = Mutex::new(());

/// Guard returned by [`Collection::check_edges`] for edits carrying edges.
pub(crate) type EdgeGate = Option<MutexGuard<'static, ()>>;

/// Returns true if walking sub-collection edges from `candidate` reaches any
/// collection in `visited`.
///
/// `visited` holds the path leading to `candidate` (usually just the host).
/// Unlike a plain visited-set walk, `visited` is treated as the current path:
/// ids are removed again on backtrack and the set is restored to its original
/// contents before returning. A child reached through two parents (a diamond)
/// is therefore not reported as a cycle. Dropped sub-collection targets are
/// skipped.
pub fn has_circular_dependency(candidate: &Arc<Collection>, visited: &mut FxHashSet<CollectionId>) -> bool {
	let mut cleared = FxHashSet::default();
	reaches_path(candidate, visited, &mut cleared)
}

fn reaches_path(candidate: &Arc<Collection>, path: &mut FxHashSet<CollectionId>, cleared: &mut FxHashSet<CollectionId>) -> bool {
	let id = candidate.id();
	if path.contains(&id) {
		return true;
	}
	if cleared.contains(&id) {
		return false;
	}

	path.insert(id);
	// Targets are collected first so no content lock is held while recursing.
	let found = candidate.sub_collection_targets().iter().any(|target| reaches_path(target, path, cleared));
	path.remove(&id);

	if !found {
		cleared.insert(id);
	}
	found
}

impl Collection {
	/// Returns true if referencing `candidate` from this collection would
	/// close a cycle.
	pub fn would_cycle(&self, candidate: &Arc<Collection>) -> bool {
		let mut visited = FxHashSet::default();
		visited.insert(self.id());
		has_circular_dependency(candidate, &mut visited)
	}

	/// Refuses `entries` if any live sub-collection edge would close a cycle
	/// through this collection.
	///
	/// When `entries` carry a live edge the returned gate is held; the caller
	/// must commit before dropping it.
	pub(crate) fn check_edges(&self, entries: &[Entry]) -> Result<EdgeGate> {
		let targets: Vec<_> = entries.iter().filter_map(|entry| entry.sub_collection_ref()?.upgrade()).collect();
		if targets.is_empty() {
			return Ok(None);
		}

		let gate = EDGE_GATE.lock();
		for target in targets {
			if self.would_cycle(&target) {
				tracing::warn!(
					host = %self.name(),
					host_id = %self.id(),
					candidate = %target.name(),
					candidate_id = %target.id(),
					"rejected sub-collection edge: cycle"
				);
				return Err(CollectionError::CycleRejected {
					host: self.name().to_owned(),
					candidate: target.name().to_owned(),
				});
			}
		}
		Ok(Some(gate))
	}
}
