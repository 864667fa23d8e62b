//! sm-core - Core library for sqlmove
//!
//! Relocates versioned SQL files from a source migration tree into a
//! generated destination tree. Numbered preinstall files and a fixed list of
//! idempotent files are collected, renumbered densely per category, copied,
//! and patched with literal substitutions.

pub mod catalog;
pub mod collector;
pub mod config;
pub mod destination;
pub mod error;
pub mod pipeline;
pub mod rewriter;
pub mod sequencer;

pub use catalog::{normalize_name, Catalog, CatalogEntry, Category, SourceDescriptor};
pub use collector::{Collector, FixedList, ScanNumbered};
pub use config::Config;
pub use destination::{materialize, prepare_destination};
pub use error::{CoreError, CoreResult};
pub use pipeline::{Pipeline, RunSummary};
pub use rewriter::{Rewriter, SubstitutionRule};
pub use sequencer::sequence_category;
