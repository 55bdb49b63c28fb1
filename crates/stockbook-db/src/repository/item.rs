//! # Item Repository
//!
//! Database operations for inventory items.
//!
//! ## Quantity Mutations
//! `quantity` changes through exactly two paths:
//! - explicitly, via [`ItemRepository::update`] / [`ItemRepository::update_quantity`]
//! - implicitly, when an invoice is created (decrement per sold line,
//!   floored at zero) — see the invoice repository
//!
//! It is never incremented automatically; there is no restock-on-delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::pool::DeletePolicy;
use stockbook_core::{Item, NewItem};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
    delete_policy: DeletePolicy,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool, delete_policy: DeletePolicy) -> Self {
        ItemRepository {
            pool,
            delete_policy,
        }
    }

    /// Lists all items, ordered by name ascending.
    ///
    /// Search, category, and stock-level filtering are caller-side concerns
    /// over this full result set.
    pub async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, category_id, price, quantity, description, created_at
            FROM items
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items belonging to one category, ordered by name ascending.
    pub async fn list_by_category(&self, category_id: i64) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, category_id, price, quantity, description, created_at
            FROM items
            WHERE category_id = ?1
            ORDER BY name ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, category_id, price, quantity, description, created_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item.
    pub async fn insert(&self, new: &NewItem) -> StoreResult<Item> {
        debug!(name = %new.name, category_id = %new.category_id, "Inserting item");

        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, category_id, price, quantity, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&new.name)
        .bind(new.category_id)
        .bind(new.price)
        .bind(new.quantity)
        .bind(&new.description)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            category_id: new.category_id,
            price: new.price,
            quantity: new.quantity,
            description: new.description.clone(),
            created_at,
        })
    }

    /// Replaces an item's fields by id (full-record replace, not patch).
    pub async fn update(&self, id: i64, new: &NewItem) -> StoreResult<()> {
        debug!(id = %id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                category_id = ?3,
                price = ?4,
                quantity = ?5,
                description = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.category_id)
        .bind(new.price)
        .bind(new.quantity)
        .bind(&new.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Item", id));
        }

        Ok(())
    }

    /// Sets an item's stock quantity directly (restock / stocktake).
    pub async fn update_quantity(&self, id: i64, quantity: i64) -> StoreResult<()> {
        debug!(id = %id, quantity = %quantity, "Updating item quantity");

        let result = sqlx::query("UPDATE items SET quantity = ?2 WHERE id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Item", id));
        }

        Ok(())
    }

    /// Deletes an item by id.
    ///
    /// Under the default `Orphan` policy this is unconditional; invoice
    /// lines referencing the item keep their dangling `item_id` (their
    /// price/quantity snapshots stay intact). Under `Restrict`, the delete
    /// fails while any invoice line references the item.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id = %id, policy = ?self.delete_policy, "Deleting item");

        if self.delete_policy == DeletePolicy::Restrict {
            let references: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM invoice_lines WHERE item_id = ?1")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;

            if references > 0 {
                return Err(StoreError::still_referenced("Item", id));
            }
        }

        sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts items (dashboard).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
