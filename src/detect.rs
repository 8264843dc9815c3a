//! UV filter detection and product classification.
//!
//! Matching is plain case-insensitive substring containment against the
//! registry's canonical names and aliases. It is not word-boundary safe: a
//! short name contained in a longer unrelated ingredient will match. The
//! registry entries are tuned against this behavior, so keep it.

use tracing::debug;

use crate::data::{FilterCategory, FilterMatch, SunscreenType};
use crate::registry::UV_FILTERS;

/// Detect registry filters in a tokenized ingredient list.
pub fn detect_filters<S: AsRef<str>>(ingredients: &[S]) -> Vec<FilterMatch> {
    let joined = ingredients
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    detect_filters_in_text(&joined)
}

/// Detect registry filters in raw ingredient text.
///
/// One match per registry entry, reported in registry order.
pub fn detect_filters_in_text(text: &str) -> Vec<FilterMatch> {
    let haystack = text.to_lowercase();
    let detected: Vec<FilterMatch> = UV_FILTERS
        .iter()
        .filter(|filter| filter.names().any(|name| haystack.contains(name)))
        .map(|filter| FilterMatch {
            name: filter.inci.to_string(),
            category: filter.category,
        })
        .collect();
    debug!(
        detected = detected.len(),
        "scanned ingredients against {} registry filters",
        UV_FILTERS.len()
    );
    detected
}

/// Classify a product from its detected filters; `None` when nothing matched.
pub fn derive_type(filters: &[FilterMatch]) -> Option<SunscreenType> {
    let has_mineral = filters
        .iter()
        .any(|filter| filter.category == FilterCategory::Mineral);
    let has_chemical = filters
        .iter()
        .any(|filter| filter.category == FilterCategory::Chemical);
    match (has_mineral, has_chemical) {
        (true, true) => Some(SunscreenType::Hybrid),
        (true, false) => Some(SunscreenType::Mineral),
        (false, true) => Some(SunscreenType::Chemical),
        (false, false) => None,
    }
}
