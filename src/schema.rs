//! Structural checks over a persisted catalog.

use serde_json::Value;
use tracing::{error, info};

use crate::constants::schema::REQUIRED_ENTRY_FIELDS;
use crate::errors::CatalogError;

/// Every structural problem in `entries`, in entry order.
pub fn schema_problems(entries: &[Value]) -> Vec<String> {
    let mut problems = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            problems.push(format!("item #{index} is not an object"));
            continue;
        };
        for field in REQUIRED_ENTRY_FIELDS {
            if !object.contains_key(field) {
                problems.push(format!("missing required field \"{field}\" in item #{index}"));
            }
        }
        if !object.get("filters").is_some_and(Value::is_array) {
            problems.push(format!("\"filters\" is not an array in item #{index}"));
        }
    }
    problems
}

/// Fail with every problem found, or succeed when the catalog is well-formed.
pub fn validate_schema(entries: &[Value]) -> Result<(), CatalogError> {
    let details = schema_problems(entries);
    if details.is_empty() {
        info!(entries = entries.len(), "schema validation passed");
        return Ok(());
    }
    for problem in &details {
        error!("{problem}");
    }
    Err(CatalogError::Schema {
        count: details.len(),
        details,
    })
}
