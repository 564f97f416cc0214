//! Filtering tool normalization
//!
//! Matching policy: exact match, alias lookup (case-sensitive then
//! case-insensitive), then a keyword containment phase. Unrecognized tools
//! pass through trimmed ("Others" escape), blank input is skipped.

use super::{alias_lookup, keyword_lookup, Normalized};

/// Canonical filtering tools
pub const FILTERING_TOOLS: &[&str] = &[
    "V60",
    "Kalita Wave",
    "Chemex",
    "AeroPress",
    "French Press",
    "Clever Dripper",
    "Origami",
    "Orea",
    "Flat Bottom",
    "Moka Pot",
    "Siphon",
    "Espresso",
    "Cold Brew",
    "Others",
];

/// Historical free-text variants -> canonical tool
const ALIASES: &[(&str, &str)] = &[
    ("hario v60", "V60"),
    ("v-60", "V60"),
    ("v60-02", "V60"),
    ("hario", "V60"),
    ("kalita", "Kalita Wave"),
    ("wave 155", "Kalita Wave"),
    ("wave 185", "Kalita Wave"),
    ("chemex 6-cup", "Chemex"),
    ("aero press", "AeroPress"),
    ("aeropress go", "AeroPress"),
    ("press pot", "French Press"),
    ("cafetiere", "French Press"),
    ("plunger", "French Press"),
    ("clever", "Clever Dripper"),
    ("origami dripper", "Origami"),
    ("orea v3", "Orea"),
    ("orea v4", "Orea"),
    ("april", "Flat Bottom"),
    ("flat-bottom", "Flat Bottom"),
    ("moka", "Moka Pot"),
    ("bialetti", "Moka Pot"),
    ("syphon", "Siphon"),
    ("vacuum pot", "Siphon"),
    ("espresso machine", "Espresso"),
    ("portafilter", "Espresso"),
    ("cold-brew", "Cold Brew"),
    ("toddy", "Cold Brew"),
    ("immersion cold brew", "Cold Brew"),
    ("other", "Others"),
    ("misc", "Others"),
];

/// Keyword containment lists, checked in order; first category wins.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("Cold Brew", &["cold brew", "cold-brew", "toddy"]),
    ("AeroPress", &["aeropress", "aero press"]),
    ("V60", &["v60", "v-60"]),
    ("Kalita Wave", &["kalita", "wave"]),
    ("Chemex", &["chemex"]),
    ("Clever Dripper", &["clever"]),
    ("Origami", &["origami"]),
    ("Orea", &["orea"]),
    ("Moka Pot", &["moka", "bialetti"]),
    ("Siphon", &["siphon", "syphon", "vacuum"]),
    ("Espresso", &["espresso", "portafilter", "lever machine"]),
    ("French Press", &["french press", "press pot", "plunger", "cafetiere"]),
];

/// Normalize a raw filtering tool value
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Skip;
    }

    if FILTERING_TOOLS.contains(&trimmed) {
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

    // Custom brewers are legal; keep the operator's text
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
        for tool in FILTERING_TOOLS {
            assert_eq!(normalize(tool), Normalized::Unchanged, "{}", tool);
        }
    }

    #[test]
    fn alias_maps_to_canonical() {
        assert_eq!(normalize("hario v60"), Normalized::Changed("V60".to_string()));
        assert_eq!(
            normalize("Press Pot"),
            Normalized::Changed("French Press".to_string())
        );
        assert_eq!(
            normalize("SYPHON"),
            Normalized::Changed("Siphon".to_string())
        );
    }

    #[test]
    fn keyword_phase_matches_descriptions() {
        assert_eq!(
            normalize("plastic v60 02 with abaca filters"),
            Normalized::Changed("V60".to_string())
        );
        assert_eq!(
            normalize("overnight toddy batch"),
            Normalized::Changed("Cold Brew".to_string())
        );
        // Cold brew keywords win over the immersion brewer mentioned later
        assert_eq!(
            normalize("cold brew in a french press"),
            Normalized::Changed("Cold Brew".to_string())
        );
    }

    #[test]
    fn unknown_tool_passes_through() {
        assert_eq!(normalize("sock filter"), Normalized::Unchanged);
        assert_eq!(
            normalize(" sock filter"),
            Normalized::Changed("sock filter".to_string())
        );
    }

    #[test]
    fn blank_is_skipped() {
        assert_eq!(normalize(""), Normalized::Skip);
        assert_eq!(normalize("   "), Normalized::Skip);
    }
}
