//! Grinder model and grinder setting normalization
//!
//! Models: exact match, then alias lookup (case-sensitive then
//! case-insensitive). No keyword phase; the alias table carries every known
//! shorthand. Unrecognized models pass through trimmed ("Others" escape:
//! arbitrary custom text is a legal value).
//!
//! Settings: numeric domain 1-40 stored as TEXT. Embedded integers are
//! extracted ("Setting 20" -> "20"), out-of-range values clamp to the
//! nearest bound, blank input takes the default "20".

use super::{alias_lookup, extract_integer, Normalized};

/// Canonical grinder models
pub const GRINDER_MODELS: &[&str] = &[
    "Comandante C40",
    "1Zpresso JX-Pro",
    "1Zpresso J-Max",
    "1Zpresso K-Plus",
    "Timemore C2",
    "Timemore C3",
    "Baratza Encore",
    "Baratza Virtuoso",
    "Fellow Ode",
    "Niche Zero",
    "Wilfa Svart",
    "Hario Mini Mill",
    "Porlex Mini",
    "DF64",
    "Eureka Mignon",
    "Kingrinder K6",
    "Others",
];

/// Historical free-text variants -> canonical model
const ALIASES: &[(&str, &str)] = &[
    ("comandante", "Comandante C40"),
    ("Comandante", "Comandante C40"),
    ("C40", "Comandante C40"),
    ("c40 mk4", "Comandante C40"),
    ("jx pro", "1Zpresso JX-Pro"),
    ("JX-Pro", "1Zpresso JX-Pro"),
    ("1zpresso jx", "1Zpresso JX-Pro"),
    ("j-max", "1Zpresso J-Max"),
    ("jmax", "1Zpresso J-Max"),
    ("k-plus", "1Zpresso K-Plus"),
    ("timemore chestnut c2", "Timemore C2"),
    ("chestnut c2", "Timemore C2"),
    ("timemore chestnut c3", "Timemore C3"),
    ("chestnut c3", "Timemore C3"),
    ("encore", "Baratza Encore"),
    ("baratza", "Baratza Encore"),
    ("virtuoso", "Baratza Virtuoso"),
    ("ode", "Fellow Ode"),
    ("fellow ode gen 2", "Fellow Ode"),
    ("niche", "Niche Zero"),
    ("niche zero", "Niche Zero"),
    ("wilfa", "Wilfa Svart"),
    ("svart", "Wilfa Svart"),
    ("hario", "Hario Mini Mill"),
    ("mini mill", "Hario Mini Mill"),
    ("porlex", "Porlex Mini"),
    ("df-64", "DF64"),
    ("df 64", "DF64"),
    ("mignon", "Eureka Mignon"),
    ("eureka", "Eureka Mignon"),
    ("k6", "Kingrinder K6"),
    ("kingrinder", "Kingrinder K6"),
    ("other", "Others"),
    ("misc", "Others"),
    ("n/a", "Others"),
];

/// Grinder setting bounds (clicks)
pub const SETTING_MIN: i64 = 1;
pub const SETTING_MAX: i64 = 40;

/// Default grinder setting when no value was recorded
pub const SETTING_DEFAULT: &str = "20";

/// Normalize a raw grinder model value
pub fn normalize_model(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Skip;
    }

    if GRINDER_MODELS.contains(&trimmed) {
        return if trimmed == raw {
            Normalized::Unchanged
        } else {
            Normalized::Changed(trimmed.to_string())
        };
    }

    if let Some(canonical) = alias_lookup(ALIASES, trimmed) {
        return Normalized::Changed(canonical.to_string());
    }

    // Custom models are legal; keep the operator's text
    if trimmed == raw {
        Normalized::Unchanged
    } else {
        Normalized::Changed(trimmed.to_string())
    }
}

/// Normalize a raw grinder setting value
pub fn normalize_setting(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Changed(SETTING_DEFAULT.to_string());
    }

    let Some(value) = extract_integer(trimmed) else {
        return Normalized::Unmatched;
    };

    let clamped = value.clamp(SETTING_MIN, SETTING_MAX);
    let canonical = clamped.to_string();

    if canonical == raw {
        Normalized::Unchanged
    } else {
        Normalized::Changed(canonical)
    }
}
