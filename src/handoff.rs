//! Values passed from the parse step to later CI steps.
//!
//! The parse step appends `KEY=value` lines to the CI environment file; the
//! write step receives the canonical record back as base64-encoded JSON.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::constants::handoff::{
    ENV_BRAND, ENV_CANONICAL_JSON, ENV_ID, ENV_PRODUCT, MULTILINE_DELIMITER,
};
use crate::data::CanonicalRecord;
use crate::errors::CatalogError;
use crate::types::{EnvKey, RecordId};

/// Named values exposed to the pipeline after a successful parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handoff {
    pub id: RecordId,
    pub brand: String,
    pub product: String,
    /// Base64 of the compact JSON record.
    pub canonical_json: String,
}

impl Handoff {
    /// Derive hand-off values from a canonical record.
    pub fn from_record(record: &CanonicalRecord) -> Result<Self, CatalogError> {
        Ok(Self {
            id: record.id.clone(),
            brand: record.brand.clone(),
            product: record.product.clone(),
            canonical_json: encode_canonical(record)?,
        })
    }

    /// Variables in export order.
    pub fn vars(&self) -> [(EnvKey, &str); 4] {
        [
            (ENV_ID, self.id.as_str()),
            (ENV_BRAND, self.brand.as_str()),
            (ENV_PRODUCT, self.product.as_str()),
            (ENV_CANONICAL_JSON, self.canonical_json.as_str()),
        ]
    }

    /// Append every variable to the CI environment file at `path`.
    pub fn export_to(&self, path: &Path) -> Result<(), CatalogError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut buffer = String::new();
        for (key, value) in self.vars() {
            buffer.push_str(&format_env_line(key, value));
        }
        file.write_all(buffer.as_bytes())?;
        debug!(path = %path.display(), id = %self.id, "exported hand-off variables");
        Ok(())
    }
}

/// One env-file entry; multi-line values use the heredoc form.
pub fn format_env_line(key: &str, value: &str) -> String {
    if value.contains('\n') {
        format!("{key}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n")
    } else {
        format!("{key}={value}\n")
    }
}

/// Encode a record as base64 of its compact JSON.
pub fn encode_canonical(record: &CanonicalRecord) -> Result<String, CatalogError> {
    let bytes = serde_json::to_vec(record)
        .map_err(|err| CatalogError::Decode(format!("canonical record not encodable: {err}")))?;
    Ok(STANDARD.encode(bytes))
}

/// Decode a base64 canonical record payload.
pub fn decode_canonical(payload: &str) -> Result<CanonicalRecord, CatalogError> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|err| CatalogError::Decode(format!("base64 decode failed: {err}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|err| CatalogError::Decode(format!("payload is not UTF-8: {err}")))?;
    serde_json::from_str(&text)
        .map_err(|err| CatalogError::Decode(format!("JSON decode failed: {err}")))
}

/// Decode a payload and check it describes the id the orchestrator expects.
pub fn decode_expected(
    payload: &str,
    expected_id: Option<&str>,
) -> Result<CanonicalRecord, CatalogError> {
    let record = decode_canonical(payload)?;
    if let Some(expected) = expected_id
        && expected != record.id
    {
        return Err(CatalogError::Decode(format!(
            "payload id '{}' does not match expected id '{expected}'",
            record.id
        )));
    }
    Ok(record)
}
