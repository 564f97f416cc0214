//! CVA Descriptive schema migration
//!
//! The CVA Descriptive assessment originally stored seven `*_intensity`
//! columns and two separate descriptor arrays (olfactory, retronasal).
//! The current form drops the `_intensity` suffix and combines the
//! descriptor arrays into fragrance-aroma and flavor-aftertaste sets,
//! adding free-text notes and assessor metadata. This script performs the
//! rename in place:
//!
//! 1. Add `_new` columns with the target shape and 0-15 check constraints
//! 2. Copy old values into the `_new` columns where non-null/non-empty
//!    (descriptor arrays map by column rename, not union; if a target is
//!    written by more than one copy statement, the later statement wins)
//! 3. Drop the nine superseded columns
//! 4. Rename the `_new` columns to their final names
//! 5. Widen the affective score check from 0-10 to 0-100 by replacing the
//!    constrained column (SQLite cannot alter a constraint in place)
//!
//! Each step is guarded against re-execution, but the sequence is not
//! atomic: a failed statement aborts the script and leaves the completed
//! steps applied. There is no rollback; restore from backup to recover.

use super::{column_exists, table_sql};
use brewlog_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Old intensity column -> final column name
const INTENSITY_RENAMES: &[(&str, &str)] = &[
    ("cva_desc_fragrance_intensity", "cva_desc_fragrance"),
    ("cva_desc_aroma_intensity", "cva_desc_aroma"),
    ("cva_desc_flavor_intensity", "cva_desc_flavor"),
    ("cva_desc_aftertaste_intensity", "cva_desc_aftertaste"),
    ("cva_desc_acidity_intensity", "cva_desc_acidity"),
    ("cva_desc_sweetness_intensity", "cva_desc_sweetness"),
    ("cva_desc_mouthfeel_intensity", "cva_desc_mouthfeel"),
];

/// Old descriptor array column -> final combined column name
const DESCRIPTOR_RENAMES: &[(&str, &str)] = &[
    (
        "cva_desc_olfactory_descriptors",
        "cva_desc_fragrance_aroma_descriptors",
    ),
    (
        "cva_desc_retronasal_descriptors",
        "cva_desc_flavor_aftertaste_descriptors",
    ),
];

/// New free-text and metadata columns added with their final names
const NEW_TEXT_COLUMNS: &[&str] = &["cva_desc_notes", "cva_desc_assessor"];

/// Dry-run summary for the CVA Descriptive migration
#[derive(Debug, Default)]
pub struct CvaAnalyzeReport {
    /// Superseded columns still present on the recipes table
    pub legacy_columns: Vec<String>,
    /// Rows carrying non-null data in any legacy column
    pub rows_with_legacy_data: u64,
    /// Whether the affective score check already accepts 0-100
    pub affective_widened: bool,
}

/// Inspect the live schema without changing anything
pub async fn analyze(pool: &SqlitePool) -> Result<CvaAnalyzeReport> {
    let mut report = CvaAnalyzeReport::default();

    for (old, _) in INTENSITY_RENAMES.iter().chain(DESCRIPTOR_RENAMES) {
        if column_exists(pool, "recipes", old).await? {
            report.legacy_columns.push((*old).to_string());
        }
    }

    if !report.legacy_columns.is_empty() {
        let predicate = report
            .legacy_columns
            .iter()
            .map(|col| format!("{} IS NOT NULL", col))
            .collect::<Vec<_>>()
            .join(" OR ");
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM recipes WHERE {}", predicate))
                .fetch_one(pool)
                .await?;
        report.rows_with_legacy_data = count as u64;
    }

    let sql = table_sql(pool, "recipes").await?;
    report.affective_widened = sql.contains("cva_aff_score BETWEEN 0 AND 100");

    Ok(report)
}

/// Run the full migration sequence
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    info!("Running CVA Descriptive schema migration");

    add_new_columns(pool).await?;
    copy_values(pool).await?;
    drop_old_columns(pool).await?;
    rename_new_columns(pool).await?;
    widen_affective_check(pool).await?;

    info!("CVA Descriptive schema migration complete");
    Ok(())
}

/// Rollback is unsupported; fails immediately.
pub fn rollback() -> Result<()> {
    Err(Error::InvalidInput(crate::ROLLBACK_UNSUPPORTED.to_string()))
}

/// Step 1: add `_new` columns with the target shape
async fn add_new_columns(pool: &SqlitePool) -> Result<()> {
    for (old, new) in INTENSITY_RENAMES {
        let staged = format!("{}_new", new);
        if column_exists(pool, "recipes", old).await?
            && !column_exists(pool, "recipes", &staged).await?
            && !column_exists(pool, "recipes", new).await?
        {
            sqlx::query(&format!(
                "ALTER TABLE recipes ADD COLUMN {staged} INTEGER CHECK ({staged} BETWEEN 0 AND 15)",
                staged = staged
            ))
            .execute(pool)
            .await?;
            info!("  Added column {}", staged);
        }
    }

    for (old, new) in DESCRIPTOR_RENAMES {
        let staged = format!("{}_new", new);
        if column_exists(pool, "recipes", old).await?
            && !column_exists(pool, "recipes", &staged).await?
            && !column_exists(pool, "recipes", new).await?
        {
            sqlx::query(&format!("ALTER TABLE recipes ADD COLUMN {} TEXT", staged))
                .execute(pool)
                .await?;
            info!("  Added column {}", staged);
        }
    }

    for column in NEW_TEXT_COLUMNS {
        if !column_exists(pool, "recipes", column).await? {
            sqlx::query(&format!("ALTER TABLE recipes ADD COLUMN {} TEXT", column))
                .execute(pool)
                .await?;
            info!("  Added column {}", column);
        }
    }

    Ok(())
}

/// Step 2: copy old values into the staged columns.
///
/// Statements run in fixed order; a target written twice keeps the later
/// value (rename semantics, not array union).
async fn copy_values(pool: &SqlitePool) -> Result<()> {
    for (old, new) in INTENSITY_RENAMES {
        let staged = format!("{}_new", new);
        if column_exists(pool, "recipes", old).await?
            && column_exists(pool, "recipes", &staged).await?
        {
            sqlx::query(&format!(
                "UPDATE recipes SET {staged} = {old} WHERE {old} IS NOT NULL",
                staged = staged,
                old = old
            ))
            .execute(pool)
            .await?;
        }
    }

    for (old, new) in DESCRIPTOR_RENAMES {
        let staged = format!("{}_new", new);
        if column_exists(pool, "recipes", old).await?
            && column_exists(pool, "recipes", &staged).await?
        {
            sqlx::query(&format!(
                "UPDATE recipes SET {staged} = {old} WHERE {old} IS NOT NULL AND {old} != '' AND {old} != '[]'",
                staged = staged,
                old = old
            ))
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

/// Step 3: drop the nine superseded columns
async fn drop_old_columns(pool: &SqlitePool) -> Result<()> {
    for (old, new) in INTENSITY_RENAMES.iter().chain(DESCRIPTOR_RENAMES) {
        let staged = format!("{}_new", new);
        // Only drop once the copy target exists, so a partial run never
        // loses the sole copy of the data
        if column_exists(pool, "recipes", old).await?
            && column_exists(pool, "recipes", &staged).await?
        {
            sqlx::query(&format!("ALTER TABLE recipes DROP COLUMN {}", old))
                .execute(pool)
                .await?;
            info!("  Dropped column {}", old);
        }
    }
    Ok(())
}

/// Step 4: rename the staged columns to their final names
async fn rename_new_columns(pool: &SqlitePool) -> Result<()> {
    for (_, new) in INTENSITY_RENAMES.iter().chain(DESCRIPTOR_RENAMES) {
        let staged = format!("{}_new", new);
        if column_exists(pool, "recipes", &staged).await?
            && !column_exists(pool, "recipes", new).await?
        {
            sqlx::query(&format!(
                "ALTER TABLE recipes RENAME COLUMN {} TO {}",
                staged, new
            ))
            .execute(pool)
            .await?;
            info!("  Renamed {} -> {}", staged, new);
        }
    }
    Ok(())
}

/// Step 5: widen the affective score check from 0-10 to 0-100.
///
/// SQLite disallows altering a constraint in place, so the constrained
/// column is replaced wholesale. Between dropping the old column and the
/// rename the score column is briefly absent; these scripts run against
/// an idle database during a maintenance window.
async fn widen_affective_check(pool: &SqlitePool) -> Result<()> {
    let sql = table_sql(pool, "recipes").await?;
    if sql.contains("cva_aff_score BETWEEN 0 AND 100") {
        return Ok(());
    }

    let has_old = column_exists(pool, "recipes", "cva_aff_score").await?;
    let has_staged = column_exists(pool, "recipes", "cva_aff_score_new").await?;

    if !has_old && !has_staged {
        return Ok(());
    }

    if !has_staged {
        sqlx::query(
            "ALTER TABLE recipes ADD COLUMN cva_aff_score_new INTEGER \
             CHECK (cva_aff_score_new BETWEEN 0 AND 100)",
        )
        .execute(pool)
        .await?;
    }

    if has_old {
        sqlx::query(
            "UPDATE recipes SET cva_aff_score_new = cva_aff_score WHERE cva_aff_score IS NOT NULL",
        )
        .execute(pool)
        .await?;
        sqlx::query("ALTER TABLE recipes DROP COLUMN cva_aff_score")
            .execute(pool)
            .await?;
    }

    sqlx::query("ALTER TABLE recipes RENAME COLUMN cva_aff_score_new TO cva_aff_score")
        .execute(pool)
        .await?;
    info!("  Widened cva_aff_score check to 0-100");

    Ok(())
}
