//! Migration orchestrator: full-table field migration passes
//!
//! One pass reads every recipe (oldest first, for deterministic reports),
//! normalizes the target field, and writes changed values back one row at
//! a time. Per-row write failures are recorded and the pass continues;
//! there is no transaction around the loop. A dry-run variant normalizes
//! the distinct set of current values without writing anything.

use brewlog_common::db::recipes;
use brewlog_common::domains::{Domain, Normalized};
use brewlog_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Summary of one migration pass
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub total_recipes: u64,
    pub migrated: u64,
    /// Raw values with no canonical mapping, with a short recipe id for
    /// manual follow-up
    pub unmigrated: Vec<String>,
    /// Per-row write failures; these did not stop the pass
    pub errors: Vec<String>,
}

/// Summary of one dry-run analysis over distinct current values
#[derive(Debug, Default)]
pub struct AnalyzeReport {
    pub can_migrate: u64,
    pub cannot_migrate: Vec<String>,
    /// Frequency histogram of target values over the distinct raws
    pub summary: BTreeMap<String, u64>,
}

/// First 8 characters of a recipe id, to keep reports compact
fn short_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

/// Run one full-table migration pass for the given domain.
///
/// Best-effort semantics: every row is attempted, failures are collected,
/// nothing is rolled back.
pub async fn migrate(pool: &SqlitePool, domain: Domain) -> Result<MigrationReport> {
    info!("Starting {} migration pass", domain.label());

    let rows = recipes::read_all_field(pool, domain).await?;
    let mut report = MigrationReport {
        total_recipes: rows.len() as u64,
        ..Default::default()
    };

    for (id, raw) in rows {
        let raw = raw.unwrap_or_default();
        match domain.normalize(&raw) {
            Normalized::Changed(value) => {
                match recipes::update_field(pool, domain, &id, &value).await {
                    Ok(()) => {
                        report.migrated += 1;
                        info!("Migrated recipe {}: '{}' -> '{}'", short_id(&id), raw, value);
                    }
                    Err(e) => {
                        warn!("Failed to update recipe {}: {}", short_id(&id), e);
                        report
                            .errors
                            .push(format!("recipe {}: {}", short_id(&id), e));
                    }
                }
            }
            Normalized::Unmatched => {
                report
                    .unmigrated
                    .push(format!("'{}' (recipe {})", raw, short_id(&id)));
            }
            Normalized::Unchanged | Normalized::Skip => {}
        }
    }

    info!(
        "{} migration pass complete: {}/{} migrated, {} unmigrated, {} errors",
        domain.label(),
        report.migrated,
        report.total_recipes,
        report.unmigrated.len(),
        report.errors.len()
    );

    Ok(report)
}

/// Dry-run analysis over the DISTINCT set of current values.
///
/// Never writes. Counts are per distinct value, not per row, so the
/// preview can undercount the true per-row impact when several rows share
/// one unmigratable raw value.
pub async fn analyze(pool: &SqlitePool, domain: Domain) -> Result<AnalyzeReport> {
    let values = recipes::read_distinct_field(pool, domain).await?;
    let mut report = AnalyzeReport::default();

    for raw in values {
        match domain.normalize(&raw) {
            Normalized::Changed(value) => {
                report.can_migrate += 1;
                *report.summary.entry(value).or_insert(0) += 1;
            }
            Normalized::Unchanged => {
                report.can_migrate += 1;
                *report.summary.entry(raw).or_insert(0) += 1;
            }
            Normalized::Unmatched => {
                report.cannot_migrate.push(raw);
            }
            Normalized::Skip => {}
        }
    }

    Ok(report)
}

/// Rollback is unsupported for field migrations; fails immediately.
pub fn rollback() -> Result<()> {
    Err(Error::InvalidInput(crate::ROLLBACK_UNSUPPORTED.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewlog_common::db::init::create_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_tables(&pool).await.unwrap();
        pool
    }

    async fn seed_recipe(pool: &SqlitePool, id: &str, created: &str, origin: Option<&str>) {
        sqlx::query(
            "INSERT INTO recipes (id, name, date_created, date_modified, origin) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind("seed")
        .bind(created)
        .bind(created)
        .bind(origin)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn migrate_writes_aliases_and_reports_unmatched() {
        let pool = setup_test_db().await;
        seed_recipe(&pool, "aaaaaaaa-1111", "2024-01-01T00:00:00Z", Some("Sumatra")).await;
        seed_recipe(&pool, "bbbbbbbb-2222", "2024-01-02T00:00:00Z", Some("Kenya")).await;
        seed_recipe(&pool, "cccccccc-3333", "2024-01-03T00:00:00Z", Some("Atlantis")).await;
        seed_recipe(&pool, "dddddddd-4444", "2024-01-04T00:00:00Z", None).await;

        let report = migrate(&pool, Domain::Origin).await.unwrap();

        assert_eq!(report.total_recipes, 4);
        assert_eq!(report.migrated, 1);
        assert_eq!(report.unmigrated, vec!["'Atlantis' (recipe cccccccc)"]);
        assert!(report.errors.is_empty());
        assert!(report.migrated + report.unmigrated.len() as u64 <= report.total_recipes);

        let origin: Option<String> =
            sqlx::query_scalar("SELECT origin FROM recipes WHERE id = 'aaaaaaaa-1111'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(origin.as_deref(), Some("Indonesia"));
    }

    #[tokio::test]
    async fn canonical_rows_are_not_listed_unmigrated() {
        let pool = setup_test_db().await;
        seed_recipe(&pool, "aaaaaaaa-1111", "2024-01-01T00:00:00Z", Some("Kenya")).await;

        let report = migrate(&pool, Domain::Origin).await.unwrap();
        assert_eq!(report.migrated, 0);
        assert!(report.unmigrated.is_empty());
    }

    #[tokio::test]
    async fn second_pass_migrates_nothing() {
        let pool = setup_test_db().await;
        seed_recipe(&pool, "aaaaaaaa-1111", "2024-01-01T00:00:00Z", Some("Sumatra")).await;
        seed_recipe(&pool, "bbbbbbbb-2222", "2024-01-02T00:00:00Z", Some("columbian")).await;

        let first = migrate(&pool, Domain::Origin).await.unwrap();
        assert_eq!(first.migrated, 2);

        let second = migrate(&pool, Domain::Origin).await.unwrap();
        assert_eq!(second.migrated, 0);
        assert!(second.unmigrated.is_empty());
    }

    #[tokio::test]
    async fn analyze_counts_distinct_values_without_writing() {
        let pool = setup_test_db().await;
        // Two rows share one unmigratable value: analyze sees it once
        seed_recipe(&pool, "aaaaaaaa-1111", "2024-01-01T00:00:00Z", Some("Atlantis")).await;
        seed_recipe(&pool, "bbbbbbbb-2222", "2024-01-02T00:00:00Z", Some("Atlantis")).await;
        seed_recipe(&pool, "cccccccc-3333", "2024-01-03T00:00:00Z", Some("Sumatra")).await;
        seed_recipe(&pool, "dddddddd-4444", "2024-01-04T00:00:00Z", Some("Java")).await;

        let report = analyze(&pool, Domain::Origin).await.unwrap();
        assert_eq!(report.can_migrate, 2);
        assert_eq!(report.cannot_migrate, vec!["Atlantis".to_string()]);
        // Both aliases target Indonesia: histogram counts distinct raws
        assert_eq!(report.summary.get("Indonesia"), Some(&2));

        // Nothing was written
        let origin: Option<String> =
            sqlx::query_scalar("SELECT origin FROM recipes WHERE id = 'cccccccc-3333'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(origin.as_deref(), Some("Sumatra"));
    }

    #[tokio::test]
    async fn rollback_always_fails() {
        let err = rollback().unwrap_err();
        assert!(err.to_string().contains("Rollback is not supported"));
    }
}
