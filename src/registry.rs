//! Reference data for UV filter detection.
//!
//! The tables below are data only. Declaration order matters: detection
//! results are reported in registry order, not label order.

use crate::data::{FilterCategory, Spectrum};
use crate::types::InciName;

use FilterCategory::{Chemical, Mineral};
use Spectrum::{PartialUva, Uva, Uvb};

/// Static description of one recognized UV filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UvFilter {
    /// Canonical lowercase INCI name.
    pub inci: InciName,
    /// Alternate names (trade names, US names), lowercase.
    pub aliases: &'static [&'static str],
    pub category: FilterCategory,
    /// Bands covered by the filter; empty when unknown.
    pub spectrum: &'static [Spectrum],
}

impl UvFilter {
    const fn new(
        inci: InciName,
        aliases: &'static [&'static str],
        category: FilterCategory,
        spectrum: &'static [Spectrum],
    ) -> Self {
        Self {
            inci,
            aliases,
            category,
            spectrum,
        }
    }

    /// Canonical name followed by every alias, in match priority order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.inci).chain(self.aliases.iter().copied())
    }
}

/// Canonical registry of known UV filters.
pub static UV_FILTERS: &[UvFilter] = &[
    // inorganic
    UvFilter::new("zinc oxide", &[], Mineral, &[Uva, Uvb]),
    UvFilter::new("titanium dioxide", &[], Mineral, &[Uvb, PartialUva]),
    // organic
    UvFilter::new(
        "diethylamino hydroxybenzoyl hexyl benzoate",
        &["uvinul a plus"],
        Chemical,
        &[Uva],
    ),
    UvFilter::new("ethylhexyl triazone", &["uvinul t 150"], Chemical, &[Uvb]),
    UvFilter::new(
        "bis-ethylhexyloxyphenol methoxyphenyl triazine",
        &["tinosorb s", "bemotrizinol"],
        Chemical,
        &[Uva, Uvb],
    ),
    UvFilter::new(
        "methylene bis-benzotriazolyl tetramethylbutylphenol",
        &["tinosorb m", "bisoctrizole"],
        Chemical,
        &[Uva, Uvb],
    ),
    UvFilter::new(
        "diethylhexyl butamido triazone",
        &["iscotrizinol"],
        Chemical,
        &[Uvb],
    ),
    UvFilter::new(
        "ethylhexyl methoxycinnamate",
        &["octinoxate"],
        Chemical,
        &[Uvb],
    ),
    UvFilter::new(
        "butyl methoxydibenzoylmethane",
        &["avobenzone"],
        Chemical,
        &[Uva],
    ),
    UvFilter::new("homosalate", &[], Chemical, &[Uvb]),
    UvFilter::new("octocrylene", &[], Chemical, &[Uvb, PartialUva]),
    UvFilter::new("octisalate", &["ethylhexyl salicylate"], Chemical, &[Uvb]),
    UvFilter::new(
        "phenylbenzimidazole sulfonic acid",
        &["ensulizole"],
        Chemical,
        &[Uvb],
    ),
    UvFilter::new(
        "terephthalylidene dicamphor sulfonic acid",
        &["ecamsule", "mexoryl sx"],
        Chemical,
        &[Uva],
    ),
    UvFilter::new(
        "drometrizole trisiloxane",
        &["mexoryl xl"],
        Chemical,
        &[Uva, Uvb],
    ),
    UvFilter::new("polysilicone-15", &["parsol slx"], Chemical, &[Uvb]),
];

/// Ingredients that look like UV filters but are not.
///
/// Kept for diagnostics only; detection never consults this list.
pub static UV_FILTER_IGNORE: &[&str] = &[
    // cooling / fragrance
    "camphor",
    "menthol",
    "menthyl lactate",
    "peppermint oil",
    // acids that are not filters
    "salicylic acid",
    "citric acid",
    "lactic acid",
    "ascorbic acid",
    "ferulic acid",
    "glycolic acid",
    // common false positives
    "benzyl alcohol",
    "benzyl benzoate",
    "phenoxyethanol",
];

/// Ignore-list entries appearing anywhere in `text` (substring, case-insensitive).
pub fn ignored_lookalikes(text: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    UV_FILTER_IGNORE
        .iter()
        .copied()
        .filter(|ignored| haystack.contains(ignored))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_names_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for filter in UV_FILTERS {
            for name in filter.names() {
                assert_eq!(name, name.to_lowercase(), "registry name '{name}' not lowercase");
                assert!(seen.insert(name), "registry name '{name}' declared twice");
            }
            assert!(!filter.spectrum.is_empty());
        }
    }

    #[test]
    fn only_two_mineral_filters_lead_the_registry() {
        let minerals: Vec<&str> = UV_FILTERS
            .iter()
            .filter(|filter| filter.category == FilterCategory::Mineral)
            .map(|filter| filter.inci)
            .collect();
        assert_eq!(minerals, vec!["zinc oxide", "titanium dioxide"]);
        assert_eq!(UV_FILTERS[0].inci, "zinc oxide");
        assert_eq!(UV_FILTERS.len(), 16);
    }

    #[test]
    fn aliases_belong_to_their_canonical_entry() {
        let avobenzone = UV_FILTERS
            .iter()
            .find(|filter| filter.names().any(|name| name == "avobenzone"))
            .unwrap();
        assert_eq!(avobenzone.inci, "butyl methoxydibenzoylmethane");
    }

    #[test]
    fn ignore_list_never_overlaps_registry() {
        for ignored in UV_FILTER_IGNORE {
            assert_eq!(ignored.to_lowercase(), *ignored);
            assert!(
                UV_FILTERS.iter().all(|filter| filter.names().all(|name| name != *ignored)),
                "'{ignored}' is both filter and ignored"
            );
        }
    }

    #[test]
    fn ignored_lookalikes_scans_free_text() {
        let found = ignored_lookalikes("Aqua, Salicylic Acid, Camphor, Zinc Oxide");
        assert_eq!(found, vec!["camphor", "salicylic acid"]);
        assert!(ignored_lookalikes("").is_empty());
    }
}
