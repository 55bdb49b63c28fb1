//! # Category Repository
//!
//! Database operations for categories, including the default-category
//! seeding run at store open.
//!
//! ## Seeding Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Default Category Seeding                         │
//! │                                                                     │
//! │  Store::open()                                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  For each of: Electronics, Clothing, Books, Home & Garden           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  INSERT OR IGNORE keyed on the UNIQUE name column                   │
//! │       │                                                             │
//! │       ├── Name absent  → row inserted                               │
//! │       └── Name present → no-op (user edits never overwritten)       │
//! │                                                                     │
//! │  Re-initializing twice never duplicates seed data.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::pool::DeletePolicy;
use stockbook_core::{Category, NewCategory, DEFAULT_CATEGORIES};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
    delete_policy: DeletePolicy,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool, delete_policy: DeletePolicy) -> Self {
        CategoryRepository {
            pool,
            delete_policy,
        }
    }

    /// Lists all categories, ordered by name ascending.
    ///
    /// No pagination, no filtering: screens filter over the full result set.
    pub async fn list(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Inserted category with its assigned id
    /// * `Err(StoreError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, new: &NewCategory) -> StoreResult<Category> {
        debug!(name = %new.name, "Inserting category");

        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, description, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            description: new.description.clone(),
            created_at,
        })
    }

    /// Replaces a category's fields by id (full-record replace, not patch).
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Category doesn't exist
    pub async fn update(&self, id: i64, new: &NewCategory) -> StoreResult<()> {
        debug!(id = %id, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?2,
                description = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Category", id));
        }

        Ok(())
    }

    /// Deletes a category by id.
    ///
    /// Under the default `Orphan` policy this is unconditional: no cascade,
    /// no existence check, and items referencing the category keep their
    /// dangling `category_id`. Under `Restrict`, the delete fails while any
    /// item references the category.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id = %id, policy = ?self.delete_policy, "Deleting category");

        if self.delete_policy == DeletePolicy::Restrict {
            let references: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE category_id = ?1")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;

            if references > 0 {
                return Err(StoreError::still_referenced("Category", id));
            }
        }

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Seeds the default categories, insert-if-absent keyed on name.
    ///
    /// Idempotent: repeated calls never duplicate seed data and never
    /// overwrite user edits to same-named categories.
    pub async fn seed_defaults(&self) -> StoreResult<()> {
        let created_at = Utc::now();

        for name in DEFAULT_CATEGORIES {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO categories (name, description, created_at)
                VALUES (?1, NULL, ?2)
                "#,
            )
            .bind(*name)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
        }

        debug!(count = DEFAULT_CATEGORIES.len(), "Default categories ensured");
        Ok(())
    }

    /// Counts categories.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use stockbook_core::{NewCategory, NewItem};

    async fn open_store() -> Store {
        Store::open(StoreConfig::in_memory().seed_defaults(false))
            .await
            .unwrap()
    }

    fn category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_name() {
        let store = open_store().await;
        let repo = store.categories();

        repo.insert(&category("Zeta")).await.unwrap();
        repo.insert(&category("Alpha")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = open_store().await;
        let repo = store.categories();

        repo.insert(&category("Books")).await.unwrap();
        let err = repo.insert(&category("Books")).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_seed_defaults_is_idempotent() {
        let store = open_store().await;
        let repo = store.categories();

        repo.seed_defaults().await.unwrap();
        repo.seed_defaults().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), DEFAULT_CATEGORIES.len() as i64);
    }

    #[tokio::test]
    async fn test_seed_never_overwrites_user_edits() {
        let store = open_store().await;
        let repo = store.categories();
        repo.seed_defaults().await.unwrap();

        // User edits the seeded "Books" description.
        let books = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Books")
            .unwrap();
        repo.update(
            books.id,
            &NewCategory {
                name: "Books".to_string(),
                description: Some("Paperbacks only".to_string()),
            },
        )
        .await
        .unwrap();

        repo.seed_defaults().await.unwrap();

        let books = repo.get(books.id).await.unwrap().unwrap();
        assert_eq!(books.description.as_deref(), Some("Paperbacks only"));
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let store = open_store().await;

        let err = store
            .categories()
            .update(999, &category("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_orphan_delete_keeps_referencing_items() {
        let store = open_store().await;
        let cat = store.categories().insert(&category("Tools")).await.unwrap();
        let item = store
            .items()
            .insert(&NewItem {
                name: "Hammer".to_string(),
                category_id: cat.id,
                price: 12.5,
                quantity: 4,
                description: None,
            })
            .await
            .unwrap();

        // Default policy: delete succeeds and does not cascade.
        store.categories().delete(cat.id).await.unwrap();

        let survivor = store.items().get(item.id).await.unwrap().unwrap();
        assert_eq!(survivor.category_id, cat.id); // dangling reference
    }

    #[tokio::test]
    async fn test_restrict_delete_refuses_referenced_category() {
        let store = Store::open(
            StoreConfig::in_memory()
                .seed_defaults(false)
                .delete_policy(crate::pool::DeletePolicy::Restrict),
        )
        .await
        .unwrap();

        let cat = store.categories().insert(&category("Tools")).await.unwrap();
        store
            .items()
            .insert(&NewItem {
                name: "Hammer".to_string(),
                category_id: cat.id,
                price: 12.5,
                quantity: 4,
                description: None,
            })
            .await
            .unwrap();

        let err = store.categories().delete(cat.id).await.unwrap_err();
        assert!(matches!(err, StoreError::StillReferenced { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_silent() {
        let store = open_store().await;

        // No existence check on delete.
        store.categories().delete(12345).await.unwrap();
    }
}
