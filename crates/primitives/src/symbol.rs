//! Interned names.
//!
//! Categories, tags and grammar symbols are compared on every pick and merge,
//! so they are stored as [`Symbol`] handles into a process-wide interner
//! rather than as owned strings. Interned strings are never freed.

use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Set of interned tags carried by entries and collections.
pub type TagSet = FxHashSet<Symbol>;

/// Handle to an interned string.
///
/// Equality and hashing are O(1) slot comparisons. Ordering follows interning
/// order, not lexical order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

struct Interner {
	by_str: FxHashMap<&'static str, Symbol>,
	strings: Vec<&'static str>,
}

static INTERNER: LazyLock<RwLock<Interner>> = LazyLock::new(|| {
	RwLock::new(Interner {
		by_str: FxHashMap::default(),
		strings: Vec::new(),
	})
});

impl Symbol {
	/// Interns `s`, returning the existing handle when already known.
	pub fn intern(s: &str) -> Self {
		if let Some(&sym) = INTERNER.read().by_str.get(s) {
			return sym;
		}

		let mut interner = INTERNER.write();
		// Another writer may have interned it between the two locks.
		if let Some(&sym) = interner.by_str.get(s) {
			return sym;
		}

		let slot = interner.strings.len();
		let sym = Symbol(u32::try_from(slot).unwrap_or_else(|_| panic!("symbol interner overflow: {slot}")));
		let leaked: &'static str = Box::leak(Box::from(s));
		interner.strings.push(leaked);
		interner.by_str.insert(leaked, sym);
		sym
	}

	/// Looks up `s` without interning it.
	pub fn get(s: &str) -> Option<Self> {
		INTERNER.read().by_str.get(s).copied()
	}

	/// Returns the interned string.
	pub fn as_str(self) -> &'static str {
		INTERNER.read().strings[self.0 as usize]
	}

	/// Returns the raw interner slot.
	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Symbol({:?})", self.as_str())
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for Symbol {
	fn from(s: &str) -> Self {
		Symbol::intern(s)
	}
}

impl Serialize for Symbol {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Symbol {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
		Ok(Symbol::intern(&s))
	}
}

/// Builds a [`TagSet`] from string names.
pub fn tag_set<'a, I>(names: I) -> TagSet
where
	I: IntoIterator<Item = &'a str>,
{
	names.into_iter().map(Symbol::intern).collect()
}
