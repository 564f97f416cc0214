//! Evaluation-system allow-list widening
//!
//! The `evaluation_system` column carries a CHECK allow-list of the
//! evaluation rubrics a recipe may use. This script widens the list from
//! V1 to V2, admitting the `quick-tasting` literal. SQLite cannot alter a
//! constraint in place, so the constrained column is replaced: add a
//! staging column carrying the widened check, copy, drop the old column,
//! rename. Guarded by inspecting the live table SQL, so re-running is a
//! no-op.

use super::{column_exists, table_sql};
use brewlog_common::db::schema::{allow_list_check, EVALUATION_SYSTEMS_V2};
use brewlog_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::info;

/// Dry-run summary for the allow-list widening
#[derive(Debug, Default)]
pub struct AllowListAnalyzeReport {
    /// Whether the live check already admits `quick-tasting`
    pub already_widened: bool,
    /// Row counts per evaluation system currently stored
    pub system_counts: BTreeMap<String, u64>,
}

/// Check whether the live allow-list already admits `quick-tasting`
pub async fn is_widened(pool: &SqlitePool) -> Result<bool> {
    let sql = table_sql(pool, "recipes").await?;
    Ok(sql.contains("'quick-tasting'"))
}

/// Inspect the live schema and value distribution without changing anything
pub async fn analyze(pool: &SqlitePool) -> Result<AllowListAnalyzeReport> {
    let mut report = AllowListAnalyzeReport {
        already_widened: is_widened(pool).await?,
        ..Default::default()
    };

    let counts = sqlx::query_as::<_, (String, i64)>(
        "SELECT evaluation_system, COUNT(*) FROM recipes GROUP BY evaluation_system",
    )
    .fetch_all(pool)
    .await?;
    for (system, count) in counts {
        report.system_counts.insert(system, count as u64);
    }

    Ok(report)
}

/// Widen the allow-list from V1 to V2
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    if is_widened(pool).await? {
        info!("evaluation_system allow-list already admits 'quick-tasting' - skipping");
        return Ok(());
    }

    info!("Widening evaluation_system allow-list (adding 'quick-tasting')");

    let has_staged = column_exists(pool, "recipes", "evaluation_system_new").await?;
    let has_old = column_exists(pool, "recipes", "evaluation_system").await?;

    if !has_staged {
        let check = allow_list_check("evaluation_system_new", EVALUATION_SYSTEMS_V2);
        sqlx::query(&format!(
            "ALTER TABLE recipes ADD COLUMN evaluation_system_new TEXT NOT NULL \
             DEFAULT 'legacy' CHECK ({})",
            check
        ))
        .execute(pool)
        .await?;
    }

    if has_old {
        sqlx::query("UPDATE recipes SET evaluation_system_new = evaluation_system")
            .execute(pool)
            .await?;
        sqlx::query("ALTER TABLE recipes DROP COLUMN evaluation_system")
            .execute(pool)
            .await?;
    }

    sqlx::query("ALTER TABLE recipes RENAME COLUMN evaluation_system_new TO evaluation_system")
        .execute(pool)
        .await?;

    info!("evaluation_system allow-list widened");
    Ok(())
}

/// Rollback is unsupported; fails immediately.
pub fn rollback() -> Result<()> {
    Err(Error::InvalidInput(crate::ROLLBACK_UNSUPPORTED.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Recipes table with the V1 allow-list
    const V1_RECIPES_SQL: &str = r#"
        CREATE TABLE recipes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            date_created TEXT NOT NULL,
            date_modified TEXT NOT NULL,
            evaluation_system TEXT NOT NULL DEFAULT 'legacy'
                CHECK (evaluation_system IN ('legacy', 'traditional-sca', 'cva-descriptive', 'cva-affective'))
        )
    "#;

    async fn setup_v1_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(V1_RECIPES_SQL).execute(&pool).await.unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool, id: &str, system: &str) {
        sqlx::query(
            "INSERT INTO recipes (id, name, date_created, date_modified, evaluation_system) \
             VALUES (?, 'seed', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z', ?)",
        )
        .bind(id)
        .bind(system)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn v1_schema_rejects_quick_tasting() {
        let pool = setup_v1_db().await;
        let result = sqlx::query(
            "INSERT INTO recipes (id, name, date_created, date_modified, evaluation_system) \
             VALUES ('r1', 'x', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z', 'quick-tasting')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn migrate_admits_quick_tasting_and_keeps_values() {
        let pool = setup_v1_db().await;
        seed(&pool, "r1", "legacy").await;
        seed(&pool, "r2", "cva-descriptive").await;

        migrate(&pool).await.unwrap();

        assert!(is_widened(&pool).await.unwrap());
        let system: String =
            sqlx::query_scalar("SELECT evaluation_system FROM recipes WHERE id = 'r2'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(system, "cva-descriptive");

        seed(&pool, "r3", "quick-tasting").await;

        // Values outside the widened list are still rejected
        let result = sqlx::query("UPDATE recipes SET evaluation_system = 'vibes' WHERE id = 'r1'")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = setup_v1_db().await;
        seed(&pool, "r1", "traditional-sca").await;

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let system: String =
            sqlx::query_scalar("SELECT evaluation_system FROM recipes WHERE id = 'r1'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(system, "traditional-sca");
    }

    #[tokio::test]
    async fn analyze_reports_counts_without_mutating() {
        let pool = setup_v1_db().await;
        seed(&pool, "r1", "legacy").await;
        seed(&pool, "r2", "legacy").await;
        seed(&pool, "r3", "cva-affective").await;

        let report = analyze(&pool).await.unwrap();
        assert!(!report.already_widened);
        assert_eq!(report.system_counts.get("legacy"), Some(&2));
        assert_eq!(report.system_counts.get("cva-affective"), Some(&1));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 3);
    }
}
