//! # Customer Repository
//!
//! Database operations for customers. Plain CRUD; invoices reference
//! customers by id.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::pool::DeletePolicy;
use stockbook_core::{Customer, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
    delete_policy: DeletePolicy,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool, delete_policy: DeletePolicy) -> Self {
        CustomerRepository {
            pool,
            delete_policy,
        }
    }

    /// Lists all customers, ordered by name ascending.
    pub async fn list(&self) -> StoreResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, email, created_at
            FROM customers
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, email, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    pub async fn insert(&self, new: &NewCustomer) -> StoreResult<Customer> {
        debug!(name = %new.name, "Inserting customer");

        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, phone, email, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            created_at,
        })
    }

    /// Replaces a customer's fields by id (full-record replace, not patch).
    pub async fn update(&self, id: i64, new: &NewCustomer) -> StoreResult<()> {
        debug!(id = %id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                phone = ?3,
                email = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer by id.
    ///
    /// Under the default `Orphan` policy this is unconditional; invoices
    /// billed to the customer keep their dangling `customer_id`. Under
    /// `Restrict`, the delete fails while any invoice references the
    /// customer.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id = %id, policy = ?self.delete_policy, "Deleting customer");

        if self.delete_policy == DeletePolicy::Restrict {
            let references: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE customer_id = ?1")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;

            if references > 0 {
                return Err(StoreError::still_referenced("Customer", id));
            }
        }

        sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts customers (dashboard).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
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

    async fn open_store() -> Store {
        Store::open(StoreConfig::in_memory().seed_defaults(false))
            .await
            .unwrap()
    }

    fn customer(name: &str, phone: &str, email: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let store = open_store().await;
        let repo = store.customers();

        let created = repo
            .insert(&customer("Ada Lovelace", "+1 555 0100", Some("ada@example.com")))
            .await
            .unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Ada Lovelace");
        assert_eq!(fetched.phone, "+1 555 0100");
        assert_eq!(fetched.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_optional_email_stored_as_null() {
        let store = open_store().await;
        let repo = store.customers();

        let created = repo
            .insert(&customer("Grace Hopper", "+1 555 0101", None))
            .await
            .unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, None);
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let store = open_store().await;
        let repo = store.customers();

        repo.insert(&customer("Zoe", "1", None)).await.unwrap();
        repo.insert(&customer("Bob", "2", None)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Bob", "Zoe"]);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let store = open_store().await;

        let err = store
            .customers()
            .update(404, &customer("Ghost", "0", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
