use crate::types::{EnvKey, FieldName};

/// Constants describing the persisted catalog files.
pub mod store {
    /// Default catalog file, relative to the working directory.
    pub const DEFAULT_STORE_FILENAME: &str = "sunscreens.json";
    /// Default output of the cleanup pass.
    pub const DEFAULT_CLEANED_FILENAME: &str = "sunscreens.cleaned.json";
    /// Suffix appended to the store path for the exclusive writer lock.
    pub const LOCK_SUFFIX: &str = ".lock";
    /// Suffix appended to the store path for the atomic-replace temp file.
    pub const TEMP_SUFFIX: &str = ".tmp";
}

/// Constants describing submission fields.
pub mod submission {
    use super::FieldName;

    /// Brand name field.
    pub const FIELD_BRAND: FieldName = "brand";
    /// Product name field.
    pub const FIELD_PRODUCT_NAME: FieldName = "product_name";
    /// Raw INCI ingredient list field.
    pub const FIELD_INGREDIENTS_INCI: FieldName = "ingredients_inci";
    /// Fields that must be present and non-blank, in reporting order.
    pub const REQUIRED_FIELDS: [FieldName; 3] =
        [FIELD_BRAND, FIELD_PRODUCT_NAME, FIELD_INGREDIENTS_INCI];
    /// Delimiter between INCI ingredient tokens.
    pub const INGREDIENT_DELIMITER: char = ',';
}

/// Constants used by the schema check and cleanup of persisted stores.
pub mod schema {
    /// Keys every persisted entry must carry.
    pub const REQUIRED_ENTRY_FIELDS: [&str; 6] = ["id", "brand", "product", "spf", "type", "filters"];
    /// Legacy keys dropped by the cleanup pass.
    pub const LEGACY_FIELDS: [&str; 8] = [
        "country",
        "hazard_score",
        "visible_light_protection",
        "white_cast",
        "texture_finish",
        "fragrance",
        "safety_scores",
        "barrier_support",
    ];
    /// Key used to order entries in the cleaned output.
    pub const SORT_FIELD: &str = "brand";
}

/// Variables handed to later CI steps.
pub mod handoff {
    use super::EnvKey;

    /// Environment variable naming the CI environment file.
    pub const GITHUB_ENV: EnvKey = "GITHUB_ENV";
    /// Derived record id.
    pub const ENV_ID: EnvKey = "SUNSCREEN_ID";
    /// Brand as submitted.
    pub const ENV_BRAND: EnvKey = "SUNSCREEN_BRAND";
    /// Product name as submitted.
    pub const ENV_PRODUCT: EnvKey = "SUNSCREEN_PRODUCT";
    /// Base64-encoded compact JSON of the canonical record.
    pub const ENV_CANONICAL_JSON: EnvKey = "SUNSCREEN_CANONICAL_JSON";
    /// Heredoc delimiter used for multi-line values in the env file.
    pub const MULTILINE_DELIMITER: &str = "SUNSCREEN_EOF";
}
