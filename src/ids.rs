//! Deterministic catalog identifiers.
//!
//! Ids depend on brand and product name only. SPF and PA markers are
//! stripped so a reformulated SPF variant collides with the existing entry
//! and goes to manual review instead of becoming a near-duplicate.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::RecordId;

static SPF_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)spf\s*[0-9]+\+?(?-u:\b)").expect("valid SPF marker pattern")
});
static PA_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)pa\+{1,4}(?-u:\b)").expect("valid PA marker pattern"));
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/_]+").expect("valid separator pattern"));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("valid hyphen pattern"));

const MARK_GLYPHS: [char; 3] = ['\u{2122}', '\u{00AE}', '\u{00A9}'];

/// Build the catalog id `"{brand}-{product}"` from normalized halves.
pub fn generate_id(brand: &str, product: &str) -> RecordId {
    format!("{}-{}", normalize_id_part(brand), normalize_id_part(product))
}

/// Slug one half of an id: lowercase, strip SPF/PA markers and mark glyphs,
/// hyphenate separators, keep `[a-z0-9-]` only.
pub fn normalize_id_part(value: &str) -> String {
    let lowered = value.to_ascii_lowercase();
    let without_spf = SPF_MARKER.replace_all(&lowered, "");
    let without_pa = PA_MARKER.replace_all(&without_spf, "");
    let without_marks: String = without_pa
        .chars()
        .filter(|ch| !MARK_GLYPHS.contains(ch))
        .collect();
    let hyphenated = SEPARATOR_RUN.replace_all(&without_marks, "-");
    let kept: String = hyphenated
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-')
        .collect();
    HYPHEN_RUN
        .replace_all(&kept, "-")
        .trim_matches('-')
        .to_string()
}
