//! Processing method normalization
//!
//! Matching policy: exact match, alias lookup (case-sensitive then
//! case-insensitive), then a keyword containment phase where the first
//! matching category wins. Terminal fallback returns the trimmed original
//! string unchanged, preserving custom/legacy text (never unmatched).

use super::{alias_lookup, keyword_lookup, Normalized};

/// Canonical processing methods
pub const PROCESSING_METHODS: &[&str] = &[
    "Washed",
    "Natural",
    "Honey",
    "Anaerobic",
    "Carbonic Maceration",
    "Wet Hulled",
    "Decaf",
];

/// Historical free-text variants -> canonical method
const ALIASES: &[(&str, &str)] = &[
    ("washed process", "Washed"),
    ("fully washed", "Washed"),
    ("wet process", "Washed"),
    ("wet-processed", "Washed"),
    ("lavado", "Washed"),
    ("W", "Washed"),
    ("dry process", "Natural"),
    ("dry-processed", "Natural"),
    ("sun dried", "Natural"),
    ("sun-dried", "Natural"),
    ("unwashed", "Natural"),
    ("N", "Natural"),
    ("pulped natural", "Honey"),
    ("semi washed", "Honey"),
    ("miel", "Honey"),
    ("red honey", "Honey"),
    ("yellow honey", "Honey"),
    ("black honey", "Honey"),
    ("white honey", "Honey"),
    ("anaerobic natural", "Anaerobic"),
    ("anaerobic washed", "Anaerobic"),
    ("anaerobic fermentation", "Anaerobic"),
    ("carbonic", "Carbonic Maceration"),
    ("CM", "Carbonic Maceration"),
    ("giling basah", "Wet Hulled"),
    ("wet hulling", "Wet Hulled"),
    ("semi-washed", "Wet Hulled"),
    ("swiss water", "Decaf"),
    ("swiss water process", "Decaf"),
    ("decaffeinated", "Decaf"),
    ("sugarcane decaf", "Decaf"),
    ("EA decaf", "Decaf"),
];

/// Keyword containment lists, checked in order; first category wins.
/// More specific categories come before broader ones (e.g. "carbonic"
/// before "natural") so compound descriptions land correctly.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("Decaf", &["decaf", "swiss water", "sugarcane"]),
    ("Carbonic Maceration", &["carbonic", "maceration"]),
    ("Anaerobic", &["anaerobic", "anaerob"]),
    ("Wet Hulled", &["wet hulled", "wet-hulled", "giling"]),
    ("Honey", &["honey", "pulped", "miel"]),
    ("Washed", &["washed", "wet process", "lavado"]),
    ("Natural", &["natural", "dry process", "sun dried", "sun-dried"]),
];

/// Normalize a raw processing method value
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Skip;
    }

    if PROCESSING_METHODS.contains(&trimmed) {
        return if trimmed == raw {
            Normalized::Unchanged
        } else {
            Normalized::Changed(trimmed.to_string())
        };
    }

    if let Some(canonical) = alias_lookup(ALIASES, trimmed) {
        return Normalized::Changed(canonical.to_string());
    }

    if let Some(canonical) = keyword_lookup(KEYWORDS, trimmed) {
        return Normalized::Changed(canonical.to_string());
    }

    // Preserve custom/legacy text rather than discarding it
    if trimmed == raw {
        Normalized::Unchanged
    } else {
        Normalized::Changed(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_is_identity() {
        for method in PROCESSING_METHODS {
            assert_eq!(normalize(method), Normalized::Unchanged, "{}", method);
        }
    }

    #[test]
    fn alias_maps_to_canonical() {
        assert_eq!(
            normalize("fully washed"),
            Normalized::Changed("Washed".to_string())
        );
        assert_eq!(
            normalize("giling basah"),
            Normalized::Changed("Wet Hulled".to_string())
        );
        assert_eq!(
            normalize("SWISS WATER"),
            Normalized::Changed("Decaf".to_string())
        );
    }

    #[test]
    fn keyword_phase_first_category_wins() {
        // "anaerobic natural washed experiment" contains keywords for three
        // categories; Anaerobic is listed first among those
        assert_eq!(
            normalize("anaerobic natural washed experiment"),
            Normalized::Changed("Anaerobic".to_string())
        );
        assert_eq!(
            normalize("double fermented black honey process"),
            Normalized::Changed("Honey".to_string())
        );
        assert_eq!(
            normalize("traditional sun-dried lot"),
            Normalized::Changed("Natural".to_string())
        );
    }

    #[test]
    fn decaf_keywords_beat_process_keywords() {
        assert_eq!(
            normalize("swiss water washed decaf"),
            Normalized::Changed("Decaf".to_string())
        );
    }

    #[test]
    fn unknown_text_passes_through_unchanged() {
        assert_eq!(normalize("koji ferment"), Normalized::Unchanged);
        assert_eq!(
            normalize("  koji ferment "),
            Normalized::Changed("koji ferment".to_string())
        );
    }

    #[test]
    fn blank_is_skipped() {
        assert_eq!(normalize(""), Normalized::Skip);
    }
}
