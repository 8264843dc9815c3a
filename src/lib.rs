#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Catalog tidying for the persisted store.
pub mod cleanup;
/// Command-line entry point used by CI.
pub mod cli;
/// Pipeline configuration.
pub mod config;
/// Centralized constants for files, fields, and hand-off variables.
pub mod constants;
/// Canonical record and filter types.
pub mod data;
/// UV filter detection and product classification.
pub mod detect;
/// Hand-off between the parse and write steps.
pub mod handoff;
/// Deterministic catalog identifiers.
pub mod ids;
/// End-to-end pipeline steps.
pub mod pipeline;
/// UV filter registry and ignore-list.
pub mod registry;
/// Structural checks over a persisted catalog.
pub mod schema;
/// Catalog persistence.
pub mod store;
/// Submission validation and canonical record construction.
pub mod submission;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use config::PipelineConfig;
pub use data::{CanonicalRecord, FilterCategory, FilterMatch, Spectrum, SunscreenType};
pub use detect::{derive_type, detect_filters, detect_filters_in_text};
pub use errors::CatalogError;
pub use handoff::{Handoff, decode_canonical, encode_canonical};
pub use ids::generate_id;
pub use registry::{UV_FILTER_IGNORE, UV_FILTERS, UvFilter};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreLock, append_record};
pub use submission::{SubmissionInput, build_canonical, validate_required};
pub use types::{IngredientToken, InciName, RecordId};
pub use utils::split_ingredients;
