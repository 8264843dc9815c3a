//! End-to-end pipeline steps composed from the building blocks.
//!
//! Each step takes explicit inputs and a [`PipelineConfig`]; nothing here
//! reads process environment variables.

use serde_json::Value;
use tracing::info;

use crate::cleanup::cleanup_entries;
use crate::config::PipelineConfig;
use crate::data::CanonicalRecord;
use crate::errors::CatalogError;
use crate::handoff::{Handoff, decode_expected};
use crate::schema::validate_schema;
use crate::store::{RecordStore, read_json_array, write_json_atomic};
use crate::submission::{SubmissionInput, build_canonical};

/// Build the canonical record and its hand-off values without side effects.
pub fn prepare_submission(
    input: &SubmissionInput,
) -> Result<(CanonicalRecord, Handoff), CatalogError> {
    let record = build_canonical(input)?;
    let handoff = Handoff::from_record(&record)?;
    Ok((record, handoff))
}

/// Build the canonical record and export hand-off variables when configured.
pub fn parse_submission(
    input: &SubmissionInput,
    config: &PipelineConfig,
) -> Result<(CanonicalRecord, Handoff), CatalogError> {
    let (record, handoff) = prepare_submission(input)?;
    export_handoff(&handoff, config)?;
    Ok((record, handoff))
}

/// Decode a hand-off payload and append it to the configured store.
pub fn write_canonical(
    payload: &str,
    expected_id: Option<&str>,
    config: &PipelineConfig,
) -> Result<CanonicalRecord, CatalogError> {
    let record = decode_expected(payload, expected_id)?;
    append_to_store(record, config)
}

/// Parse a submission and append it in one step.
///
/// Hand-off variables are exported only once the append has succeeded.
pub fn ingest(
    input: &SubmissionInput,
    config: &PipelineConfig,
) -> Result<CanonicalRecord, CatalogError> {
    let (record, handoff) = prepare_submission(input)?;
    let record = append_to_store(record, config)?;
    export_handoff(&handoff, config)?;
    Ok(record)
}

/// Run the structural check over the configured store.
pub fn validate_store(config: &PipelineConfig) -> Result<usize, CatalogError> {
    let entries = config.open_store().load_entries()?;
    validate_schema(&entries)?;
    Ok(entries.len())
}

/// Write a cleaned, brand-sorted copy of the store to `cleaned_path`.
pub fn cleanup_store(config: &PipelineConfig) -> Result<usize, CatalogError> {
    if config.cleaned_path == config.store_path {
        return Err(CatalogError::Configuration(
            "cleanup output must differ from the catalog file".to_string(),
        ));
    }
    let entries: Vec<Value> = read_json_array(&config.store_path)?;
    let cleaned = cleanup_entries(entries);
    write_json_atomic(&config.cleaned_path, &cleaned)?;
    info!(
        path = %config.cleaned_path.display(),
        entries = cleaned.len(),
        "wrote cleaned catalog"
    );
    Ok(cleaned.len())
}

fn append_to_store(
    record: CanonicalRecord,
    config: &PipelineConfig,
) -> Result<CanonicalRecord, CatalogError> {
    let store = config.open_store();
    store.append(record.clone())?;
    Ok(record)
}

fn export_handoff(handoff: &Handoff, config: &PipelineConfig) -> Result<(), CatalogError> {
    match &config.env_file {
        Some(env_file) => handoff.export_to(env_file),
        None => Ok(()),
    }
}
