use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::types::{IngredientToken, RecordId};

/// How a UV filter protects: inorganic particulate or organic compound.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    Mineral,
    Chemical,
}

impl FilterCategory {
    /// Lowercase label used in the persisted store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::Mineral => "mineral",
            FilterCategory::Chemical => "chemical",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UV band covered by a filter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Spectrum {
    #[serde(rename = "UVA")]
    Uva,
    #[serde(rename = "UVB")]
    Uvb,
    #[serde(rename = "partial UVA")]
    PartialUva,
}

/// Product classification derived from its detected filters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SunscreenType {
    Mineral,
    Chemical,
    Hybrid,
}

impl SunscreenType {
    /// Lowercase label used in the persisted store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SunscreenType::Mineral => "mineral",
            SunscreenType::Chemical => "chemical",
            SunscreenType::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SunscreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registry filter found in a product's ingredient list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterMatch {
    /// Canonical INCI name from the registry (never the alias that matched).
    pub name: String,
    pub category: FilterCategory,
}

/// Canonical catalog entry; the persisted unit of the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CanonicalRecord {
    /// Stable identifier derived from brand and product name only.
    pub id: RecordId,
    pub brand: String,
    pub product: String,
    /// `None` when no registry filter was detected.
    #[serde(rename = "type", default)]
    pub sunscreen_type: Option<SunscreenType>,
    #[serde(default)]
    pub spf: Option<u64>,
    #[serde(default)]
    pub pa: Option<String>,
    #[serde(default)]
    pub korean: Option<bool>,
    #[serde(default)]
    pub filters: Vec<FilterMatch>,
    #[serde(default)]
    pub ingredients: Vec<IngredientToken>,
    #[serde(rename = "sourceUrl", default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Keys carried by older catalog entries; written back untouched.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CanonicalRecord {
        CanonicalRecord {
            id: "beauty-of-joseon-relief-sun".to_string(),
            brand: "Beauty of Joseon".to_string(),
            product: "Relief Sun".to_string(),
            sunscreen_type: Some(SunscreenType::Chemical),
            spf: Some(50),
            pa: Some("PA++++".to_string()),
            korean: Some(true),
            filters: vec![FilterMatch {
                name: "ethylhexyl triazone".to_string(),
                category: FilterCategory::Chemical,
            }],
            ingredients: vec!["Water".to_string(), "Ethylhexyl Triazone".to_string()],
            source_url: None,
            notes: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn serializes_with_catalog_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["type"], "chemical");
        assert_eq!(obj["filters"][0]["category"], "chemical");
        assert!(obj.contains_key("sourceUrl"));
        assert!(obj["sourceUrl"].is_null());
        assert!(obj["notes"].is_null());
        assert!(!obj.contains_key("extra"));
        assert!(!obj.contains_key("sunscreen_type"));
    }

    #[test]
    fn null_type_serializes_as_null() {
        let mut record = sample();
        record.sunscreen_type = None;
        record.filters.clear();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["type"].is_null());
        assert_eq!(value["filters"], serde_json::json!([]));
    }

    #[test]
    fn legacy_keys_survive_a_rewrite() {
        let raw = r#"{
            "id": "old-entry",
            "brand": "Old",
            "product": "Entry",
            "type": "mineral",
            "spf": 30,
            "filters": [],
            "white_cast": "heavy"
        }"#;
        let record: CanonicalRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.sunscreen_type, Some(SunscreenType::Mineral));
        assert!(record.ingredients.is_empty());
        assert_eq!(record.korean, None);
        assert_eq!(record.extra["white_cast"], "heavy");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["white_cast"], "heavy");
    }

    #[test]
    fn spectrum_uses_registry_labels() {
        let labels = serde_json::to_value([Spectrum::Uva, Spectrum::Uvb, Spectrum::PartialUva])
            .unwrap();
        assert_eq!(labels, serde_json::json!(["UVA", "UVB", "partial UVA"]));
    }
}
