//! Database models and recipe input transforms

use serde::{Deserialize, Serialize};

/// One brewing session record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub date_created: String,
    pub date_modified: String,
    pub origin: Option<String>,
    pub processing_method: Option<String>,
    pub roast_level: Option<String>,
    pub grinder_model: Option<String>,
    pub grinder_setting: Option<String>,
    pub filtering_tools: Option<String>,
    pub water_temperature: Option<f64>,
    pub coffee_beans: Option<f64>,
    pub water: Option<f64>,
    pub coffee_water_ratio: Option<f64>,
    pub tds: Option<f64>,
    pub extraction_yield: Option<f64>,
    pub evaluation_system: String,
    pub overall_impression: Option<i64>,
    pub sca_score: Option<f64>,
    pub cva_desc_fragrance: Option<i64>,
    pub cva_desc_aroma: Option<i64>,
    pub cva_desc_flavor: Option<i64>,
    pub cva_desc_aftertaste: Option<i64>,
    pub cva_desc_acidity: Option<i64>,
    pub cva_desc_sweetness: Option<i64>,
    pub cva_desc_mouthfeel: Option<i64>,
    /// JSON array of descriptor strings
    pub cva_desc_fragrance_aroma_descriptors: Option<String>,
    /// JSON array of descriptor strings
    pub cva_desc_flavor_aftertaste_descriptors: Option<String>,
    pub cva_desc_notes: Option<String>,
    pub cva_desc_assessor: Option<String>,
    pub cva_aff_score: Option<i64>,
}

/// Input for creating a recipe; name/ratio are filled in by the insert
/// transform when absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: Option<String>,
    pub origin: Option<String>,
    pub processing_method: Option<String>,
    pub roast_level: Option<String>,
    pub grinder_model: Option<String>,
    pub grinder_setting: Option<String>,
    pub filtering_tools: Option<String>,
    pub water_temperature: Option<f64>,
    pub coffee_beans: Option<f64>,
    pub water: Option<f64>,
    pub coffee_water_ratio: Option<f64>,
    pub tds: Option<f64>,
    pub extraction_yield: Option<f64>,
    pub evaluation_system: Option<String>,
}

/// A named, user-defined recipe grouping
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_private: bool,
    pub is_default: bool,
    /// JSON array of freeform tag strings
    pub tags: Option<String>,
    pub date_created: String,
    pub date_modified: String,
}

impl Recipe {
    /// Decode one of the JSON descriptor array columns; a missing or
    /// malformed value reads as an empty set
    pub fn descriptors(raw: Option<&str>) -> Vec<String> {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    /// Combined fragrance/aroma descriptors
    pub fn fragrance_aroma_descriptors(&self) -> Vec<String> {
        Self::descriptors(self.cva_desc_fragrance_aroma_descriptors.as_deref())
    }

    /// Combined flavor/aftertaste descriptors
    pub fn flavor_aftertaste_descriptors(&self) -> Vec<String> {
        Self::descriptors(self.cva_desc_flavor_aftertaste_descriptors.as_deref())
    }
}

/// Maximum length of an auto-generated recipe name
pub const MAX_NAME_LEN: usize = 200;

/// Derive coffee:water ratio from bean and water weights, rounded to
/// 2 decimals. Absent or zero bean weight yields no ratio.
pub fn derive_ratio(coffee_beans: Option<f64>, water: Option<f64>) -> Option<f64> {
    let beans = coffee_beans?;
    let water = water?;
    if beans <= 0.0 || water <= 0.0 {
        return None;
    }
    Some((water / beans * 100.0).round() / 100.0)
}

/// Generate a recipe name from origin and brew date when none was given,
/// truncated to 200 characters.
pub fn auto_name(origin: Option<&str>, date: &str) -> String {
    let name = match origin {
        Some(origin) if !origin.trim().is_empty() => {
            format!("{} - {}", origin.trim(), date)
        }
        _ => format!("Brew - {}", date),
    };
    truncate_name(&name)
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        name.to_string()
    } else {
        name.chars().take(MAX_NAME_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_rounds_to_two_decimals() {
        assert_eq!(derive_ratio(Some(15.0), Some(250.0)), Some(16.67));
        assert_eq!(derive_ratio(Some(18.0), Some(288.0)), Some(16.0));
    }

    #[test]
    fn ratio_absent_inputs_yield_none() {
        assert_eq!(derive_ratio(None, Some(250.0)), None);
        assert_eq!(derive_ratio(Some(15.0), None), None);
        assert_eq!(derive_ratio(Some(0.0), Some(250.0)), None);
    }

    #[test]
    fn auto_name_uses_origin_and_date() {
        assert_eq!(
            auto_name(Some("Ethiopia"), "2024-06-01"),
            "Ethiopia - 2024-06-01"
        );
        assert_eq!(auto_name(None, "2024-06-01"), "Brew - 2024-06-01");
        assert_eq!(auto_name(Some("  "), "2024-06-01"), "Brew - 2024-06-01");
    }

    #[test]
    fn descriptors_decode_json_arrays() {
        assert_eq!(
            Recipe::descriptors(Some(r#"["floral","citrus"]"#)),
            vec!["floral".to_string(), "citrus".to_string()]
        );
        assert!(Recipe::descriptors(None).is_empty());
        assert!(Recipe::descriptors(Some("not json")).is_empty());
    }

    #[test]
    fn auto_name_truncates_to_200_chars() {
        let origin = "x".repeat(300);
        let name = auto_name(Some(&origin), "2024-06-01");
        assert_eq!(name.chars().count(), MAX_NAME_LEN);
    }
}
