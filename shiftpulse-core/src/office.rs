//! Office classification from agent login naming conventions.
//!
//! Login ids carry a short office prefix ("n vega" logs into the Tepic
//! floor, "w judith" into West, and so on). A handful of premium agents
//! keep legacy logins that predate the convention; those are pinned by
//! exact match before any prefix rule runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Organizational group an agent belongs to.
///
/// Classification is total: anything that matches no rule lands in
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfficeGroup {
    #[serde(rename = "tepic")]
    Tepic,
    #[serde(rename = "army")]
    Army,
    #[serde(rename = "west")]
    West,
    #[serde(rename = "sp-prime")]
    SpPrime,
    #[serde(rename = "egypt")]
    Egypt,
    #[serde(rename = "spanish")]
    Spanish,
    #[serde(rename = "nigeria")]
    Nigeria,
    #[serde(rename = "other")]
    Other,
}

impl OfficeGroup {
    /// Display label used in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            OfficeGroup::Tepic => "Tepic",
            OfficeGroup::Army => "Army",
            OfficeGroup::West => "West",
            OfficeGroup::SpPrime => "Sp & Prime",
            OfficeGroup::Egypt => "Egypt",
            OfficeGroup::Spanish => "Spanish",
            OfficeGroup::Nigeria => "Nigeria",
            OfficeGroup::Other => "Other",
        }
    }
}

impl fmt::Display for OfficeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Legacy premium logins pinned to Sp & Prime regardless of prefix.
const PREMIUM_OVERRIDES: &[&str] = &["n vega", "e santiago", "w delacruz"];

/// Ordered prefix rules; first match wins. The two-letter prefixes
/// shadow the one-letter rules ("sp " before "s ", "pr " has no
/// one-letter sibling but sorts with its cohort).
const PREFIX_RULES: &[(&str, OfficeGroup)] = &[
    ("sp ", OfficeGroup::SpPrime),
    ("pr ", OfficeGroup::SpPrime),
    ("n ", OfficeGroup::Tepic),
    ("a ", OfficeGroup::Army),
    ("w ", OfficeGroup::West),
    ("e ", OfficeGroup::Egypt),
    ("s ", OfficeGroup::Spanish),
    ("g ", OfficeGroup::Nigeria),
];

/// Map an agent login id to its office group.
///
/// Case-insensitive; never fails — unrecognized ids are `Other`.
pub fn classify(agent: &str) -> OfficeGroup {
    let normalized = agent.trim().to_lowercase();

    if PREMIUM_OVERRIDES.iter().any(|p| *p == normalized) {
        return OfficeGroup::SpPrime;
    }

    for (prefix, group) in PREFIX_RULES {
        if normalized.starts_with(prefix) {
            return *group;
        }
    }

    OfficeGroup::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rules() {
        assert_eq!(classify("n lopez"), OfficeGroup::Tepic);
        assert_eq!(classify("a smith"), OfficeGroup::Army);
        assert_eq!(classify("w judith"), OfficeGroup::West);
        assert_eq!(classify("e amr"), OfficeGroup::Egypt);
        assert_eq!(classify("s garcia"), OfficeGroup::Spanish);
        assert_eq!(classify("g okafor"), OfficeGroup::Nigeria);
    }

    #[test]
    fn test_two_letter_prefixes_shadow_one_letter() {
        // "sp " must win over "s ", "pr " over nothing.
        assert_eq!(classify("sp zambo"), OfficeGroup::SpPrime);
        assert_eq!(classify("pr galloway"), OfficeGroup::SpPrime);
    }

    #[test]
    fn test_premium_exact_overrides_beat_prefix() {
        // "n vega" would otherwise be Tepic.
        assert_eq!(classify("n vega"), OfficeGroup::SpPrime);
        assert_eq!(classify("N Vega"), OfficeGroup::SpPrime);
        assert_eq!(classify("e santiago"), OfficeGroup::SpPrime);
    }

    #[test]
    fn test_classification_is_total() {
        assert_eq!(classify(""), OfficeGroup::Other);
        assert_eq!(classify("12345"), OfficeGroup::Other);
        assert_eq!(classify("zz nobody"), OfficeGroup::Other);
        // No-space login matches no prefix rule.
        assert_eq!(classify("nlopez"), OfficeGroup::Other);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("W JUDITH"), OfficeGroup::West);
        assert_eq!(classify("Sp Zambo"), OfficeGroup::SpPrime);
    }
}
