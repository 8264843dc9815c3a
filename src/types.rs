/// Stable catalog identifier derived from brand and product name.
/// Example: `la-roche-posay-anthelios-uvmune-400-fluid`
pub type RecordId = String;
/// Canonical INCI name of a UV filter (lowercase, registry-owned).
/// Examples: `zinc oxide`, `butyl methoxydibenzoylmethane`
pub type InciName = &'static str;
/// One trimmed ingredient token exactly as written on the label.
/// Examples: `Aqua`, `Zinc Oxide`, `Bis-Ethylhexyloxyphenol Methoxyphenyl Triazine`
pub type IngredientToken = String;
/// Submission field name as it appears in the parsed issue mapping.
/// Examples: `brand`, `product_name`, `ingredients_inci`
pub type FieldName = &'static str;
/// Name of a variable exported to the CI environment file.
/// Examples: `SUNSCREEN_ID`, `SUNSCREEN_CANONICAL_JSON`
pub type EnvKey = &'static str;
