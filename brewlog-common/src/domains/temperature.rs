//! Water temperature normalization
//!
//! Brew water sits in the 80-100 C range. Values slightly outside the range
//! (kettle readouts like 102, or 79 from a cooling kettle) clamp to the
//! nearest bound. Cold-brew temperatures (<= 30 C, negatives included) and
//! physically implausible values (> 120) are rejected for manual review
//! rather than clamped into a hot-brew range they never belonged to.

use super::{extract_number, Normalized};

/// Accepted brew temperature bounds (degrees Celsius)
pub const TEMP_MIN: f64 = 80.0;
pub const TEMP_MAX: f64 = 100.0;

/// At or below this, the value is a cold-brew temperature, not a typo
pub const COLD_BREW_CUTOFF: f64 = 30.0;

/// Above this, the value is not a plausible Celsius reading
pub const IMPLAUSIBLE_MAX: f64 = 120.0;

/// Normalize a raw water temperature value to a whole-degree Celsius string
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::Skip;
    }

    let Some(value) = extract_number(trimmed) else {
        return Normalized::Unmatched;
    };

    if value <= COLD_BREW_CUTOFF || value > IMPLAUSIBLE_MAX {
        return Normalized::Unmatched;
    }

    let clamped = value.clamp(TEMP_MIN, TEMP_MAX);
    let canonical = clamped.round();

    // Temperatures come back from a REAL column, so "93" and "93.0" are the
    // same stored value; compare numerically when the raw is fully numeric
    // to keep repeated passes from rewriting identical readings.
    let fully_numeric = trimmed.parse::<f64>().is_ok();
    if fully_numeric && value == canonical {
        Normalized::Unchanged
    } else {
        Normalized::Changed(format!("{}", canonical as i64))
    }
}
