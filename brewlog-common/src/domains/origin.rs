//! Bean origin normalization
//!
//! Origins are a closed country/region list. Matching policy: exact match,
//! then alias lookup (case-sensitive, then case-insensitive). There is no
//! keyword phase and no pass-through escape: an unrecognized origin is
//! reported for manual review rather than silently kept as free text.

use super::{alias_lookup, Normalized};

/// Canonical bean origins
pub const ORIGINS: &[&str] = &[
    "Ethiopia",
    "Kenya",
    "Rwanda",
    "Burundi",
    "Tanzania",
    "Uganda",
    "Yemen",
    "Colombia",
    "Brazil",
    "Peru",
    "Bolivia",
    "Ecuador",
    "Guatemala",
    "Costa Rica",
    "Honduras",
    "El Salvador",
    "Nicaragua",
    "Panama",
    "Mexico",
    "Jamaica",
    "Hawaii",
    "Indonesia",
    "Vietnam",
    "India",
    "Papua New Guinea",
    "Myanmar",
    "Thailand",
    "China",
    "Taiwan",
    "Blend",
];

/// Historical free-text variants -> canonical origin
const ALIASES: &[(&str, &str)] = &[
    ("ethiopian", "Ethiopia"),
    ("Ethiopian", "Ethiopia"),
    ("kenyan", "Kenya"),
    ("colombian", "Colombia"),
    ("Columbia", "Colombia"),
    ("columbian", "Colombia"),
    ("brazilian", "Brazil"),
    ("Brasil", "Brazil"),
    ("guatemalan", "Guatemala"),
    ("costa rican", "Costa Rica"),
    ("costarica", "Costa Rica"),
    ("salvadoran", "El Salvador"),
    ("el-salvador", "El Salvador"),
    ("panamanian", "Panama"),
    ("mexican", "Mexico"),
    ("Sumatra", "Indonesia"),
    ("sumatran", "Indonesia"),
    ("Java", "Indonesia"),
    ("Sulawesi", "Indonesia"),
    ("Bali", "Indonesia"),
    ("vietnamese", "Vietnam"),
    ("indian", "India"),
    ("PNG", "Papua New Guinea"),
    ("papua", "Papua New Guinea"),
    ("Burma", "Myanmar"),
    ("Kona", "Hawaii"),
    ("hawaiian", "Hawaii"),
    ("Blue Mountain", "Jamaica"),
    ("jamaican", "Jamaica"),
    ("yunnan", "China"),
    ("taiwanese", "Taiwan"),
    ("rwandan", "Rwanda"),
    ("burundian", "Burundi"),
    ("tanzanian", "Tanzania"),
    ("ugandan", "Uganda"),
    ("yemeni", "Yemen"),
    ("Mocha", "Yemen"),
    ("peruvian", "Peru"),
    ("bolivian", "Bolivia"),
    ("ecuadorian", "Ecuador"),
    ("honduran", "Honduras"),
    ("nicaraguan", "Nicaragua"),
    ("mixed", "Blend"),
    ("blended", "Blend"),
    ("house blend", "Blend"),
];

/// Normalize a raw origin value
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Skip;
    }

    if ORIGINS.contains(&trimmed) {
        return if trimmed == raw {
            Normalized::Unchanged
        } else {
            Normalized::Changed(trimmed.to_string())
        };
    }

    if let Some(canonical) = alias_lookup(ALIASES, trimmed) {
        return Normalized::Changed(canonical.to_string());
    }

    Normalized::Unmatched
}
