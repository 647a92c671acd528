//! Feeding collections from external data.
//!
//! - [`attribute_set`] - JSON rows of named attributes
//! - [`config`] - which attribute feeds which entry field
//! - [`ingest()`] - rebuilds a collection from an attribute set
//! - [`library`] - owner of named collections, loaded from a TOML manifest

pub mod attribute_set;
pub mod config;
pub mod error;
mod ingest;
pub mod library;

pub use attribute_set::{AttributeRow, AttributeSet, AttributeValue};
pub use config::IngestConfig;
pub use error::{IngestError, Result};
pub use ingest::{IngestReport, ingest};
pub use library::{CollectionManifest, EntryManifest, Library, LibraryManifest};
