//! Collection persistence operations
//!
//! Collection names are unique case-insensitively, enforced here at the
//! application layer (the database layer only has the primary key).

use crate::db::models::Collection;
use crate::{Error, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Create a collection; fails if a collection with the same name exists
/// under case-insensitive comparison.
pub async fn create_collection(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    color: Option<&str>,
) -> Result<Collection> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Collection name cannot be blank".to_string()));
    }

    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM collections WHERE LOWER(name) = LOWER(?)")
            .bind(trimmed)
            .fetch_one(pool)
            .await?;
    if existing > 0 {
        return Err(Error::InvalidInput(format!(
            "Collection '{}' already exists",
            trimmed
        )));
    }

    let id = Uuid::new_v4().to_string();
    let timestamp = now();
    sqlx::query(
        r#"
        INSERT INTO collections (id, name, description, color, date_created, date_modified)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(trimmed)
    .bind(description)
    .bind(color)
    .bind(&timestamp)
    .bind(&timestamp)
    .execute(pool)
    .await?;

    get_collection(pool, &id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Collection {} vanished after insert", id)))
}

/// Fetch one collection by id
pub async fn get_collection(pool: &SqlitePool, id: &str) -> Result<Option<Collection>> {
    let collection = sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(collection)
}

/// List all collections ordered by name
pub async fn list_collections(pool: &SqlitePool) -> Result<Vec<Collection>> {
    let collections =
        sqlx::query_as::<_, Collection>("SELECT * FROM collections ORDER BY name COLLATE NOCASE")
            .fetch_all(pool)
            .await?;
    Ok(collections)
}

/// Delete a collection; recipe links cascade via foreign keys
pub async fn delete_collection(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Link a recipe into a collection with an assignment timestamp
pub async fn add_recipe_to_collection(
    pool: &SqlitePool,
    recipe_id: &str,
    collection_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO recipe_collections (recipe_id, collection_id, date_assigned)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(recipe_id)
    .bind(collection_id)
    .bind(now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Remove a recipe from a collection
pub async fn remove_recipe_from_collection(
    pool: &SqlitePool,
    recipe_id: &str,
    collection_id: &str,
) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM recipe_collections WHERE recipe_id = ? AND collection_id = ?")
            .bind(recipe_id)
            .bind(collection_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// List recipe ids linked to a collection, in assignment order
pub async fn list_collection_recipes(
    pool: &SqlitePool,
    collection_id: &str,
) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT recipe_id FROM recipe_collections WHERE collection_id = ? ORDER BY date_assigned ASC",
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::create_tables;
    use crate::db::models::NewRecipe;
    use crate::db::recipes::insert_recipe;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        create_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn name_uniqueness_is_case_insensitive() {
        let pool = setup_test_db().await;
        create_collection(&pool, "Morning Brews", None, None)
            .await
            .unwrap();

        let duplicate = create_collection(&pool, "morning brews", None, None).await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let pool = setup_test_db().await;
        assert!(create_collection(&pool, "  ", None, None).await.is_err());
    }

    #[tokio::test]
    async fn deleting_recipe_cascades_link() {
        let pool = setup_test_db().await;
        let recipe = insert_recipe(&pool, NewRecipe::default()).await.unwrap();
        let collection = create_collection(&pool, "Favorites", None, Some("#aa5500"))
            .await
            .unwrap();

        add_recipe_to_collection(&pool, &recipe.id, &collection.id)
            .await
            .unwrap();
        assert_eq!(
            list_collection_recipes(&pool, &collection.id).await.unwrap(),
            vec![recipe.id.clone()]
        );

        crate::db::recipes::delete_recipe(&pool, &recipe.id)
            .await
            .unwrap();
        assert!(list_collection_recipes(&pool, &collection.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn deleting_collection_cascades_link() {
        let pool = setup_test_db().await;
        let recipe = insert_recipe(&pool, NewRecipe::default()).await.unwrap();
        let collection = create_collection(&pool, "Archive", None, None).await.unwrap();
        add_recipe_to_collection(&pool, &recipe.id, &collection.id)
            .await
            .unwrap();

        assert!(delete_collection(&pool, &collection.id).await.unwrap());
        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_collections")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(links, 0);
    }
}
