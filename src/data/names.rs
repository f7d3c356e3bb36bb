//! Country label normalization.
//!
//! Circuit datasets use colloquial country labels; the world-atlas features
//! carry longer canonical names. The table maps the former onto the latter.
//! Unmapped labels pass through unchanged, so a label that already matches a
//! feature name keeps working and an unknown one simply never highlights.

use std::sync::LazyLock;

use indexmap::IndexMap;

static COUNTRY_NAMES: LazyLock<IndexMap<&'static str, &'static str>> = LazyLock::new(|| {
    IndexMap::from([
        ("USA", "United States of America"),
        ("United States", "United States of America"),
        ("UK", "United Kingdom"),
        ("UAE", "United Arab Emirates"),
        ("Korea", "South Korea"),
    ])
});

/// Returns the canonical world-atlas name for a circuit-dataset country
/// label. Total and idempotent: unmapped input comes back unchanged.
#[must_use]
pub fn normalize_country(raw: &str) -> &str {
    COUNTRY_NAMES.get(raw).copied().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_labels() {
        assert_eq!(normalize_country("USA"), "United States of America");
        assert_eq!(normalize_country("UK"), "United Kingdom");
        assert_eq!(normalize_country("UAE"), "United Arab Emirates");
    }

    #[test]
    fn unmapped_labels_pass_through() {
        assert_eq!(normalize_country("Monaco"), "Monaco");
        assert_eq!(normalize_country(""), "");
        assert_eq!(normalize_country("Atlantis"), "Atlantis");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["USA", "UK", "Monaco", "South Korea", "Korea"] {
            let once = normalize_country(raw);
            assert_eq!(normalize_country(once), once);
        }
    }
}
