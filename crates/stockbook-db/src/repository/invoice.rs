//! # Invoice Repository
//!
//! Database operations for invoices and their line items, including the one
//! multi-step workflow in the system: the transactional invoice save.
//!
//! ## Invoice Save Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  create(draft) — one transaction                    │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    1. Reserve next value from invoice_sequence  → INV-NNNNNN        │
//! │    2. Recompute per-line extended amounts, subtotal,                │
//! │       vat (15%), total — caller totals are never trusted            │
//! │    3. INSERT invoice row                                            │
//! │    4. INSERT each invoice_line (in caller order)                    │
//! │    5. Per line: UPDATE items                                        │
//! │         SET quantity = MAX(0, quantity - sold)   ← clamped, never   │
//! │                                                    negative         │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Any failure rolls the whole workflow back: no orphaned lines,      │
//! │  no half-applied stock decrements, no burned sequence values.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Update Asymmetry
//! `update()` rewrites the invoice row and replaces its full line set, but
//! does NOT touch item stock: the original decrement is not reversed and the
//! new quantities are not applied. Callers must account for this.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use stockbook_core::invoice::{format_invoice_number, InvoiceTotals};
use stockbook_core::{Invoice, InvoiceDraft, InvoiceLine};

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists all invoices, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, invoice_number, customer_id, invoice_date,
                   subtotal, vat_amount, total_amount, created_at
            FROM invoices
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Gets an invoice by id.
    ///
    /// Totals are returned as persisted; they are never recomputed on read.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, invoice_number, customer_id, invoice_date,
                   subtotal, vat_amount, total_amount, created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets the line items of an invoice, in insertion order.
    pub async fn lines(&self, invoice_id: i64) -> StoreResult<Vec<InvoiceLine>> {
        let lines = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT id, invoice_id, item_id, quantity, unit_price, extended_amount
            FROM invoice_lines
            WHERE invoice_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Previews the next invoice number without reserving it.
    ///
    /// Screens show this on the new-invoice form. The actual number is
    /// reserved inside the create transaction, so two previews before a save
    /// both show the same value and only the committed invoice consumes it.
    pub async fn peek_number(&self) -> StoreResult<String> {
        let next: i64 = sqlx::query_scalar("SELECT next_value FROM invoice_sequence WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(format_invoice_number(next))
    }

    /// Creates an invoice from a draft.
    ///
    /// Everything runs in a single transaction; see the module docs for the
    /// step list. Line quantities beyond available stock are clamped at
    /// zero, not rejected: the sale goes through and stock bottoms out.
    ///
    /// ## Returns
    /// The persisted invoice with its assigned id, reserved number, and
    /// computed totals.
    pub async fn create(&self, draft: &InvoiceDraft) -> StoreResult<Invoice> {
        debug!(customer_id = %draft.customer_id, lines = draft.lines.len(), "Creating invoice");

        let mut tx = self.pool.begin().await?;

        // Reserve the next sequence value. Done inside the transaction, so
        // an aborted save never burns a number.
        let after: i64 = sqlx::query_scalar(
            "UPDATE invoice_sequence SET next_value = next_value + 1 WHERE id = 1 RETURNING next_value",
        )
        .fetch_one(&mut *tx)
        .await?;
        let invoice_number = format_invoice_number(after - 1);

        let totals = InvoiceTotals::compute(&draft.lines);
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_number, customer_id, invoice_date,
                subtotal, vat_amount, total_amount, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&invoice_number)
        .bind(draft.customer_id)
        .bind(draft.invoice_date)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.total_amount)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let invoice_id = result.last_insert_rowid();

        // Lines and stock decrements, sequentially in caller order.
        for line in &draft.lines {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (
                    invoice_id, item_id, quantity, unit_price, extended_amount
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(invoice_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.extended_amount())
            .execute(&mut *tx)
            .await?;

            // Clamped at zero: selling past stock is allowed, stock is not
            // driven negative.
            sqlx::query("UPDATE items SET quantity = MAX(0, quantity - ?2) WHERE id = ?1")
                .bind(line.item_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(id = %invoice_id, number = %invoice_number, "Invoice created");

        Ok(Invoice {
            id: invoice_id,
            invoice_number,
            customer_id: draft.customer_id,
            invoice_date: draft.invoice_date,
            subtotal: totals.subtotal,
            vat_amount: totals.vat_amount,
            total_amount: totals.total_amount,
            created_at,
        })
    }

    /// Updates an existing invoice from a draft.
    ///
    /// In one transaction: recomputes totals, overwrites the invoice row
    /// (the invoice number is kept), deletes all prior lines, and re-inserts
    /// the draft's set. Item stock is deliberately NOT adjusted.
    pub async fn update(&self, id: i64, draft: &InvoiceDraft) -> StoreResult<()> {
        debug!(id = %id, lines = draft.lines.len(), "Updating invoice");

        let totals = InvoiceTotals::compute(&draft.lines);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                customer_id = ?2,
                invoice_date = ?3,
                subtotal = ?4,
                vat_amount = ?5,
                total_amount = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(draft.customer_id)
        .bind(draft.invoice_date)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.total_amount)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Invoice", id));
        }

        sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for line in &draft.lines {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (
                    invoice_id, item_id, quantity, unit_price, extended_amount
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.extended_amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Counts invoices (dashboard).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
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
    use stockbook_core::invoice::LineInput;
    use stockbook_core::{NewCategory, NewCustomer, NewItem};

    struct Fixture {
        store: Store,
        customer_id: i64,
        item_id: i64,
    }

    /// One category, one customer, one item with the given stock.
    async fn fixture(stock: i64, price: f64) -> Fixture {
        let store = Store::open(StoreConfig::in_memory().seed_defaults(false))
            .await
            .unwrap();

        let category = store
            .categories()
            .insert(&NewCategory {
                name: "Electronics".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let customer = store
            .customers()
            .insert(&NewCustomer {
                name: "Ada Lovelace".to_string(),
                phone: "+1 555 0100".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let item = store
            .items()
            .insert(&NewItem {
                name: "USB Cable".to_string(),
                category_id: category.id,
                price,
                quantity: stock,
                description: None,
            })
            .await
            .unwrap();

        Fixture {
            store,
            customer_id: customer.id,
            item_id: item.id,
        }
    }

    fn draft(customer_id: i64, lines: Vec<LineInput>) -> InvoiceDraft {
        InvoiceDraft {
            customer_id,
            invoice_date: Utc::now(),
            lines,
        }
    }

    fn line(item_id: i64, quantity: i64, unit_price: f64) -> LineInput {
        LineInput {
            item_id,
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn test_invoice_numbers_are_sequential_and_padded() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        for expected in ["INV-000001", "INV-000002", "INV-000003"] {
            let invoice = repo
                .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
                .await
                .unwrap();
            assert_eq!(invoice.invoice_number, expected);
        }
    }

    #[tokio::test]
    async fn test_peek_number_does_not_reserve() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        assert_eq!(repo.peek_number().await.unwrap(), "INV-000001");
        assert_eq!(repo.peek_number().await.unwrap(), "INV-000001");

        let invoice = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
            .await
            .unwrap();
        assert_eq!(invoice.invoice_number, "INV-000001");
        assert_eq!(repo.peek_number().await.unwrap(), "INV-000002");
    }

    #[tokio::test]
    async fn test_numbers_are_not_reused_after_deletion() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        let first = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
            .await
            .unwrap();

        // Remove the invoice row out-of-band; the sequence must not rewind.
        sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(first.id)
            .execute(f.store.pool())
            .await
            .unwrap();

        let second = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
            .await
            .unwrap();
        assert_eq!(second.invoice_number, "INV-000002");
    }

    #[tokio::test]
    async fn test_create_decrements_stock() {
        let f = fixture(10, 8.0).await;

        f.store
            .invoices()
            .create(&draft(f.customer_id, vec![line(f.item_id, 3, 8.0)]))
            .await
            .unwrap();

        let item = f.store.items().get(f.item_id).await.unwrap().unwrap();
        assert_eq!(item.quantity, 7);
    }

    #[tokio::test]
    async fn test_oversell_clamps_stock_at_zero() {
        let f = fixture(2, 8.0).await;

        // Selling 5 with 2 in stock goes through; stock bottoms out at 0.
        let invoice = f
            .store
            .invoices()
            .create(&draft(f.customer_id, vec![line(f.item_id, 5, 8.0)]))
            .await
            .unwrap();

        let item = f.store.items().get(f.item_id).await.unwrap().unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(invoice.subtotal, 40.0); // the full 5 units are billed
    }

    #[tokio::test]
    async fn test_totals_are_recomputed_and_persisted() {
        let f = fixture(100, 19.99).await;

        let invoice = f
            .store
            .invoices()
            .create(&draft(f.customer_id, vec![line(f.item_id, 3, 19.99)]))
            .await
            .unwrap();

        let expected_subtotal = 3.0 * 19.99;
        assert!((invoice.subtotal - expected_subtotal).abs() < 1e-9);
        assert!((invoice.vat_amount - expected_subtotal * 0.15).abs() < 1e-9);
        assert!((invoice.total_amount - (invoice.subtotal + invoice.vat_amount)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_round_trip_totals_match_lines() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        let created = repo
            .create(&draft(
                f.customer_id,
                vec![line(f.item_id, 2, 12.5), line(f.item_id, 1, 0.99)],
            ))
            .await
            .unwrap();

        let stored = repo.get(created.id).await.unwrap().unwrap();
        let lines = repo.lines(created.id).await.unwrap();

        let subtotal: f64 = lines.iter().map(|l| l.extended_amount).sum();
        for l in &lines {
            assert_eq!(l.extended_amount, l.quantity as f64 * l.unit_price);
        }
        assert_eq!(stored.subtotal, subtotal);
        assert_eq!(stored.vat_amount, subtotal * 0.15);
        assert_eq!(stored.total_amount, subtotal + subtotal * 0.15);
    }

    #[tokio::test]
    async fn test_unit_price_is_a_snapshot() {
        let f = fixture(100, 5.0).await;

        // The user sold at 4.5 even though the catalog says 5.0.
        let invoice = f
            .store
            .invoices()
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 4.5)]))
            .await
            .unwrap();

        // Later catalog price changes don't rewrite the line.
        f.store
            .items()
            .update(
                f.item_id,
                &NewItem {
                    name: "USB Cable".to_string(),
                    category_id: 1,
                    price: 9.99,
                    quantity: 99,
                    description: None,
                },
            )
            .await
            .unwrap();

        let lines = f.store.invoices().lines(invoice.id).await.unwrap();
        assert_eq!(lines[0].unit_price, 4.5);
    }

    #[tokio::test]
    async fn test_update_replaces_line_set_and_totals() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        let created = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 2, 10.0)]))
            .await
            .unwrap();

        repo.update(
            created.id,
            &draft(
                f.customer_id,
                vec![line(f.item_id, 1, 20.0), line(f.item_id, 4, 2.5)],
            ),
        )
        .await
        .unwrap();

        let updated = repo.get(created.id).await.unwrap().unwrap();
        let lines = repo.lines(created.id).await.unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(updated.subtotal, 30.0);
        assert_eq!(updated.invoice_number, created.invoice_number);
    }

    #[tokio::test]
    async fn test_update_never_touches_stock() {
        let f = fixture(10, 5.0).await;
        let repo = f.store.invoices();

        let created = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 3, 5.0)]))
            .await
            .unwrap();
        assert_eq!(
            f.store.items().get(f.item_id).await.unwrap().unwrap().quantity,
            7
        );

        // Regression: neither the old decrement is reversed nor the new
        // quantities applied.
        repo.update(
            created.id,
            &draft(f.customer_id, vec![line(f.item_id, 6, 5.0)]),
        )
        .await
        .unwrap();

        assert_eq!(
            f.store.items().get(f.item_id).await.unwrap().unwrap().quantity,
            7
        );
    }

    #[tokio::test]
    async fn test_update_missing_invoice_is_not_found() {
        let f = fixture(10, 5.0).await;

        let err = f
            .store
            .invoices()
            .update(404, &draft(f.customer_id, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let f = fixture(100, 5.0).await;
        let repo = f.store.invoices();

        let first = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
            .await
            .unwrap();
        let second = repo
            .create(&draft(f.customer_id, vec![line(f.item_id, 1, 5.0)]))
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_aborted_create_leaves_no_partial_rows() {
        let f = fixture(10, 5.0).await;
        let repo = f.store.invoices();

        // Second line violates the positive-quantity CHECK mid-transaction.
        let err = repo
            .create(&draft(
                f.customer_id,
                vec![line(f.item_id, 2, 5.0), line(f.item_id, 0, 5.0)],
            ))
            .await;
        assert!(err.is_err());

        // Rolled back: no invoice, no lines, stock untouched, number unused.
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(
            f.store.items().get(f.item_id).await.unwrap().unwrap().quantity,
            10
        );
        assert_eq!(repo.peek_number().await.unwrap(), "INV-000001");
    }
}
