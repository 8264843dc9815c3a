//! Catalog tidying: drop legacy fields, alphabetize keys, order by brand.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::constants::schema::{LEGACY_FIELDS, SORT_FIELD};

/// Remove legacy fields from one entry and rebuild it with sorted keys.
pub fn clean_entry(entry: Value) -> Value {
    let Value::Object(object) = entry else {
        return entry;
    };
    let mut kept: Vec<(String, Value)> = object
        .into_iter()
        .filter(|(key, _)| !LEGACY_FIELDS.contains(&key.as_str()))
        .collect();
    kept.sort_by(|(a, _), (b, _)| a.cmp(b));
    Value::Object(kept.into_iter().collect::<Map<String, Value>>())
}

/// Clean every entry and stable-sort by brand, ignoring case and accents.
///
/// Entries without a string brand sort first.
pub fn cleanup_entries(entries: Vec<Value>) -> Vec<Value> {
    let before = entries.len();
    let mut cleaned: Vec<Value> = entries.into_iter().map(clean_entry).collect();
    cleaned.sort_by(compare_by_brand);
    info!(entries = before, "cleaned catalog entries");
    cleaned
}

fn compare_by_brand(a: &Value, b: &Value) -> Ordering {
    let key = |value: &Value| {
        value
            .get(SORT_FIELD)
            .and_then(Value::as_str)
            .map(brand_sort_key)
    };
    key(a).cmp(&key(b))
}

fn brand_sort_key(brand: &str) -> String {
    brand
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}
