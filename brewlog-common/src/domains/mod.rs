//! Canonical domain value tables and the value normalizer
//!
//! Each submodule owns one closed value set: the canonical list, an alias
//! table mapping historical free-text variants to canonical values, and a
//! pure `normalize` function implementing that domain's matching policy
//! (exact match, alias lookup, keyword heuristic, numeric clamping).
//!
//! All tables are process-wide constants, loaded once and never mutated.
//! Normalization never fails: "no mapping found" is a return value, not
//! an error.

pub mod filtering;
pub mod grinder;
pub mod origin;
pub mod processing;
pub mod temperature;

/// Outcome of normalizing one raw field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Raw value is already the canonical form; nothing to write
    Unchanged,
    /// Mapped to a new value to be written back
    Changed(String),
    /// Blank input; skip per domain policy
    Skip,
    /// No rule produced a canonical mapping; needs manual review
    Unmatched,
}

/// Domain selector for normalization and field migration passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Origin,
    ProcessingMethod,
    GrinderModel,
    GrinderSetting,
    FilteringTool,
    WaterTemperature,
}

impl Domain {
    /// Column name of this domain's field in the recipes table
    pub fn column(&self) -> &'static str {
        match self {
            Domain::Origin => "origin",
            Domain::ProcessingMethod => "processing_method",
            Domain::GrinderModel => "grinder_model",
            Domain::GrinderSetting => "grinder_setting",
            Domain::FilteringTool => "filtering_tools",
            Domain::WaterTemperature => "water_temperature",
        }
    }

    /// Human-readable label used in progress output
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Origin => "origin",
            Domain::ProcessingMethod => "processing method",
            Domain::GrinderModel => "grinder model",
            Domain::GrinderSetting => "grinder setting",
            Domain::FilteringTool => "filtering tool",
            Domain::WaterTemperature => "water temperature",
        }
    }

    /// Normalize one raw value under this domain's policy
    pub fn normalize(&self, raw: &str) -> Normalized {
        match self {
            Domain::Origin => origin::normalize(raw),
            Domain::ProcessingMethod => processing::normalize(raw),
            Domain::GrinderModel => grinder::normalize_model(raw),
            Domain::GrinderSetting => grinder::normalize_setting(raw),
            Domain::FilteringTool => filtering::normalize(raw),
            Domain::WaterTemperature => temperature::normalize(raw),
        }
    }
}

/// Alias table lookup: case-sensitive first, then a case-insensitive retry
/// over the same table.
pub(crate) fn alias_lookup(
    table: &[(&'static str, &'static str)],
    raw: &str,
) -> Option<&'static str> {
    // Case-sensitive pass
    for (alias, canonical) in table {
        if *alias == raw {
            return Some(canonical);
        }
    }
    // Case-insensitive retry
    let lowered = raw.to_lowercase();
    for (alias, canonical) in table {
        if alias.to_lowercase() == lowered {
            return Some(canonical);
        }
    }
    None
}

/// First canonical value whose keyword list has a (case-insensitive)
/// substring match against the raw value. First matching category wins.
pub(crate) fn keyword_lookup(
    table: &[(&'static str, &'static [&'static str])],
    raw: &str,
) -> Option<&'static str> {
    let lowered = raw.to_lowercase();
    for (canonical, keywords) in table {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return Some(canonical);
        }
    }
    None
}

/// Extract the first embedded integer from a raw string, e.g. "Setting 20" -> 20.
pub(crate) fn extract_integer(raw: &str) -> Option<i64> {
    let mut digits = String::new();
    let mut seen = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            seen = true;
        } else if seen {
            break;
        }
    }
    if seen {
        digits.parse().ok()
    } else {
        None
    }
}

/// Extract the first embedded decimal number from a raw string,
/// e.g. "93.5 degrees" -> 93.5.
pub(crate) fn extract_number(raw: &str) -> Option<f64> {
    let mut buf = String::new();
    let mut seen_digit = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            buf.push(ch);
            seen_digit = true;
        } else if ch == '-' && buf.is_empty() {
            buf.push(ch);
        } else if ch == '.' && seen_digit && !buf.contains('.') {
            buf.push(ch);
        } else if seen_digit {
            break;
        } else {
            buf.clear();
        }
    }
    if seen_digit {
        buf.parse().ok()
    } else {
        None
    }
}
