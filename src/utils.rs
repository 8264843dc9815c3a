//! Text normalization helpers shared by the submission builder and detector.

use crate::constants::submission::INGREDIENT_DELIMITER;
use crate::types::IngredientToken;

/// Split a raw INCI string into trimmed, non-empty tokens.
///
/// Casing and order are preserved and duplicates are kept; callers lowercase
/// for comparison themselves.
pub fn split_ingredients(raw: Option<&str>) -> Vec<IngredientToken> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(INGREDIENT_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when the value is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Drop empty optional text so it persists as `null`.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parse the first integer hidden in free text by discarding every non-digit.
///
/// `"SPF 50+"` yields `50`. No digits, zero, or a value past `u64::MAX` yields `None`.
pub fn parse_spf(raw: Option<&str>) -> Option<u64> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().filter(|spf| *spf > 0)
}

/// Map "yes"/"no" (any case, surrounding whitespace ignored) to a flag.
pub fn normalize_yes_no(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim();
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ingredients_handles_missing_and_empty_input() {
        assert!(split_ingredients(None).is_empty());
        assert!(split_ingredients(Some("")).is_empty());
        assert!(split_ingredients(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn split_ingredients_trims_and_drops_empty_tokens() {
        let tokens = split_ingredients(Some("Zinc Oxide, Titanium Dioxide,  ,Water"));
        assert_eq!(tokens, vec!["Zinc Oxide", "Titanium Dioxide", "Water"]);
    }

    #[test]
    fn split_ingredients_keeps_case_order_and_duplicates() {
        let tokens = split_ingredients(Some("water,AQUA ,water"));
        assert_eq!(tokens, vec!["water", "AQUA", "water"]);
    }

    #[test]
    fn parse_spf_extracts_digits() {
        assert_eq!(parse_spf(Some("SPF 50+")), Some(50));
        assert_eq!(parse_spf(Some("30")), Some(30));
        assert_eq!(parse_spf(Some("unknown")), None);
        assert_eq!(parse_spf(Some("")), None);
        assert_eq!(parse_spf(Some("0")), None);
        assert_eq!(parse_spf(Some("99999999999999")), Some(99_999_999_999_999));
        assert_eq!(parse_spf(Some("SPF 1 and 2")), Some(12));
        assert_eq!(parse_spf(Some("99999999999999999999")), None);
        assert_eq!(parse_spf(None), None);
    }

    #[test]
    fn yes_no_is_case_insensitive_and_strict() {
        assert_eq!(normalize_yes_no(Some("Yes")), Some(true));
        assert_eq!(normalize_yes_no(Some(" NO ")), Some(false));
        assert_eq!(normalize_yes_no(Some("Not sure")), None);
        assert_eq!(normalize_yes_no(Some("")), None);
        assert_eq!(normalize_yes_no(None), None);
    }

    #[test]
    fn blank_and_empty_helpers() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  \n")));
        assert!(!is_blank(Some("x")));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("note")), Some("note".to_string()));
    }
}
