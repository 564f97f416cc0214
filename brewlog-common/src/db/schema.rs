//! Table definitions and the versioned evaluation-system allow-list
//!
//! The `evaluation_system` CHECK allow-list is a migration target (one
//! script's sole purpose is widening it), so the versions live here as
//! named constants rather than inline literals in the CREATE TABLE text.

/// Evaluation systems accepted by the original schema
pub const EVALUATION_SYSTEMS_V1: &[&str] = &[
    "legacy",
    "traditional-sca",
    "cva-descriptive",
    "cva-affective",
];

/// Evaluation systems after the quick-tasting widening migration
pub const EVALUATION_SYSTEMS_V2: &[&str] = &[
    "legacy",
    "traditional-sca",
    "cva-descriptive",
    "cva-affective",
    "quick-tasting",
];

/// Render the CHECK clause body for an allow-list on the given column
pub fn allow_list_check(column: &str, values: &[&str]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
    format!("{} IN ({})", column, quoted.join(", "))
}

/// Render the CHECK clause body for an evaluation-system allow-list
pub fn evaluation_system_check(systems: &[&str]) -> String {
    allow_list_check("evaluation_system", systems)
}

/// Recipes table, current shape (all migrations applied)
pub fn recipes_table_sql() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            date_created TEXT NOT NULL,
            date_modified TEXT NOT NULL,
            origin TEXT,
            processing_method TEXT,
            roast_level TEXT,
            grinder_model TEXT,
            grinder_setting TEXT,
            filtering_tools TEXT,
            water_temperature REAL,
            coffee_beans REAL,
            water REAL,
            coffee_water_ratio REAL,
            tds REAL,
            extraction_yield REAL,
            evaluation_system TEXT NOT NULL DEFAULT 'legacy' CHECK ({check}),
            overall_impression INTEGER,
            sca_score REAL,
            cva_desc_fragrance INTEGER CHECK (cva_desc_fragrance BETWEEN 0 AND 15),
            cva_desc_aroma INTEGER CHECK (cva_desc_aroma BETWEEN 0 AND 15),
            cva_desc_flavor INTEGER CHECK (cva_desc_flavor BETWEEN 0 AND 15),
            cva_desc_aftertaste INTEGER CHECK (cva_desc_aftertaste BETWEEN 0 AND 15),
            cva_desc_acidity INTEGER CHECK (cva_desc_acidity BETWEEN 0 AND 15),
            cva_desc_sweetness INTEGER CHECK (cva_desc_sweetness BETWEEN 0 AND 15),
            cva_desc_mouthfeel INTEGER CHECK (cva_desc_mouthfeel BETWEEN 0 AND 15),
            cva_desc_fragrance_aroma_descriptors TEXT,
            cva_desc_flavor_aftertaste_descriptors TEXT,
            cva_desc_notes TEXT,
            cva_desc_assessor TEXT,
            cva_aff_score INTEGER CHECK (cva_aff_score BETWEEN 0 AND 100)
        )
        "#,
        check = evaluation_system_check(EVALUATION_SYSTEMS_V2)
    )
}

/// Collections table
pub const COLLECTIONS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS collections (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        color TEXT,
        is_private INTEGER NOT NULL DEFAULT 0,
        is_default INTEGER NOT NULL DEFAULT 0,
        tags TEXT,
        date_created TEXT NOT NULL,
        date_modified TEXT NOT NULL
    )
"#;

/// Recipe-collection association table; deleting either parent cascades
/// the link via the foreign keys (PRAGMA foreign_keys must be ON).
pub const RECIPE_COLLECTIONS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS recipe_collections (
        recipe_id TEXT NOT NULL,
        collection_id TEXT NOT NULL,
        date_assigned TEXT NOT NULL,
        PRIMARY KEY (recipe_id, collection_id),
        FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
        FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
    )
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_clause_lists_all_systems() {
        let check = evaluation_system_check(EVALUATION_SYSTEMS_V2);
        assert!(check.contains("'quick-tasting'"));
        assert!(check.contains("'legacy'"));
        assert!(check.starts_with("evaluation_system IN ("));
    }

    #[test]
    fn v2_extends_v1_by_quick_tasting() {
        assert_eq!(EVALUATION_SYSTEMS_V1.len() + 1, EVALUATION_SYSTEMS_V2.len());
        for system in EVALUATION_SYSTEMS_V1 {
            assert!(EVALUATION_SYSTEMS_V2.contains(system));
        }
        assert!(EVALUATION_SYSTEMS_V2.contains(&"quick-tasting"));
    }
}
