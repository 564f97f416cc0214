//! Recipe persistence operations
//!
//! Carries the narrow contract the migration layer needs (projected reads
//! ordered by creation time, distinct-value reads, single-field writes that
//! bump `date_modified`, row counts) plus the basic recipe lifecycle.

use crate::db::models::{auto_name, derive_ratio, NewRecipe, Recipe};
use crate::domains::Domain;
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Insert a recipe, applying the input transform: blank names are
/// auto-generated from origin + date, a missing ratio is derived from
/// bean and water weights.
pub async fn insert_recipe(pool: &SqlitePool, input: NewRecipe) -> Result<Recipe> {
    let id = Uuid::new_v4().to_string();
    let timestamp = now();
    let date = timestamp.split('T').next().unwrap_or(&timestamp).to_string();

    let name = match input.name {
        Some(ref name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => auto_name(input.origin.as_deref(), &date),
    };
    let ratio = input
        .coffee_water_ratio
        .or_else(|| derive_ratio(input.coffee_beans, input.water));
    let evaluation_system = input
        .evaluation_system
        .unwrap_or_else(|| "legacy".to_string());

    sqlx::query(
        r#"
        INSERT INTO recipes (
            id, name, date_created, date_modified,
            origin, processing_method, roast_level,
            grinder_model, grinder_setting, filtering_tools,
            water_temperature, coffee_beans, water, coffee_water_ratio,
            tds, extraction_yield, evaluation_system
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&timestamp)
    .bind(&timestamp)
    .bind(&input.origin)
    .bind(&input.processing_method)
    .bind(&input.roast_level)
    .bind(&input.grinder_model)
    .bind(&input.grinder_setting)
    .bind(&input.filtering_tools)
    .bind(input.water_temperature)
    .bind(input.coffee_beans)
    .bind(input.water)
    .bind(ratio)
    .bind(input.tds)
    .bind(input.extraction_yield)
    .bind(&evaluation_system)
    .execute(pool)
    .await?;

    get_recipe(pool, &id)
        .await?
        .ok_or_else(|| crate::Error::Internal(format!("Recipe {} vanished after insert", id)))
}

/// Fetch one recipe by id
pub async fn get_recipe(pool: &SqlitePool, id: &str) -> Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(recipe)
}

/// Delete one recipe by id; collection links cascade via foreign keys
pub async fn delete_recipe(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Read (id, field) for every recipe, oldest first.
///
/// Ordering by creation time keeps migration reports deterministic and
/// reproducible across runs. The field is cast to TEXT so every domain
/// sees a uniform string representation.
pub async fn read_all_field(
    pool: &SqlitePool,
    domain: Domain,
) -> Result<Vec<(String, Option<String>)>> {
    let sql = format!(
        "SELECT id, CAST({col} AS TEXT) FROM recipes ORDER BY date_created ASC",
        col = domain.column()
    );
    let rows = sqlx::query_as::<_, (String, Option<String>)>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Read the distinct non-null values currently stored for a field
pub async fn read_distinct_field(pool: &SqlitePool, domain: Domain) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT CAST({col} AS TEXT) FROM recipes WHERE {col} IS NOT NULL ORDER BY 1",
        col = domain.column()
    );
    let values = sqlx::query_scalar::<_, String>(&sql).fetch_all(pool).await?;
    Ok(values)
}

/// Write one field of one recipe, bumping `date_modified`
pub async fn update_field(
    pool: &SqlitePool,
    domain: Domain,
    id: &str,
    value: &str,
) -> Result<()> {
    let sql = format!(
        "UPDATE recipes SET {col} = ?, date_modified = ? WHERE id = ?",
        col = domain.column()
    );
    sqlx::query(&sql)
        .bind(value)
        .bind(now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count all recipes
pub async fn count_recipes(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
