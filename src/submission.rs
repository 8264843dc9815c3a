//! Submission intake: validation and canonical record construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::submission::{
    FIELD_BRAND, FIELD_INGREDIENTS_INCI, FIELD_PRODUCT_NAME, REQUIRED_FIELDS,
};
use crate::data::CanonicalRecord;
use crate::detect::{derive_type, detect_filters_in_text};
use crate::errors::CatalogError;
use crate::ids::generate_id;
use crate::registry::ignored_lookalikes;
use crate::utils::{is_blank, non_empty, normalize_yes_no, parse_spf, split_ingredients};

/// Key/value record produced by the issue-form parser.
///
/// Every field is free text as submitted; nothing is normalized yet.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionInput {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub spf: Option<String>,
    #[serde(default)]
    pub pa_rating: Option<String>,
    #[serde(default)]
    pub ingredients_inci: Option<String>,
    /// "yes", "no", or anything else for unspecified.
    #[serde(default)]
    pub korean: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SubmissionInput {
    /// Decode the parser's JSON mapping.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw)
            .map_err(|err| CatalogError::Decode(format!("submission is not a valid mapping: {err}")))
    }

    /// Build from a plain string map (for callers holding parsed form fields).
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned();
        Self {
            brand: get("brand"),
            product_name: get("product_name"),
            spf: get("spf"),
            pa_rating: get("pa_rating"),
            ingredients_inci: get("ingredients_inci"),
            korean: get("korean"),
            source_url: get("source_url"),
            notes: get("notes"),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_BRAND => self.brand.as_deref(),
            FIELD_PRODUCT_NAME => self.product_name.as_deref(),
            FIELD_INGREDIENTS_INCI => self.ingredients_inci.as_deref(),
            _ => None,
        }
    }
}

/// Reject a submission missing any required field, naming all of them.
pub fn validate_required(input: &SubmissionInput) -> Result<(), CatalogError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| is_blank(input.field(name)))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation { missing })
    }
}

/// Validate a submission and turn it into its canonical catalog record.
pub fn build_canonical(input: &SubmissionInput) -> Result<CanonicalRecord, CatalogError> {
    validate_required(input)?;
    let brand = input.brand.clone().unwrap_or_default();
    let product = input.product_name.clone().unwrap_or_default();
    let ingredients_raw = input.ingredients_inci.as_deref();

    let filters = detect_filters_in_text(ingredients_raw.unwrap_or_default());
    let lookalikes = ignored_lookalikes(ingredients_raw.unwrap_or_default());
    if !lookalikes.is_empty() {
        debug!(?lookalikes, "ingredients include known non-filter lookalikes");
    }
    let record = CanonicalRecord {
        id: generate_id(&brand, &product),
        sunscreen_type: derive_type(&filters),
        spf: parse_spf(input.spf.as_deref()),
        pa: non_empty(input.pa_rating.as_deref()),
        korean: normalize_yes_no(input.korean.as_deref()),
        filters,
        ingredients: split_ingredients(ingredients_raw),
        source_url: non_empty(input.source_url.as_deref()),
        notes: non_empty(input.notes.as_deref()),
        brand,
        product,
        extra: BTreeMap::new(),
    };
    info!(
        id = %record.id,
        filters = record.filters.len(),
        sunscreen_type = record.sunscreen_type.map(|t| t.as_str()).unwrap_or("unknown"),
        "built canonical record"
    );
    Ok(record)
}
