//! # Transaction Ledger Repository
//!
//! Database operations for completed sales.
//!
//! ## Ledger Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Lifecycle                                  │
//! │                                                                         │
//! │  1. RECORD                                                             │
//! │     └── record() → id assigned by the store, row returned as stored    │
//! │         record_and_adjust_stock() → same, plus per-line stock          │
//! │         decrement in the SAME SQL transaction                          │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── list() / list_between() / get_by_id()                          │
//! │                                                                         │
//! │  3. EDIT (explicit flow only)                                          │
//! │     └── update() → full replace by id; money figures arrive            │
//! │         re-derived by the checkout calculator                          │
//! │                                                                         │
//! │  There is NO delete. History only grows.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{CartItem, Money, NewTransaction, Transaction};

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw transactions row. Items are stored as a JSON snapshot in a TEXT
/// column, frozen at checkout time.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    items: String,
    total: i64,
    payment: i64,
    change: i64,
    date: DateTime<Utc>,
    cogs: i64,
    profit: i64,
    customer_name: Option<String>,
    customer_phone: Option<String>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DbError;

    fn try_from(row: TransactionRow) -> DbResult<Transaction> {
        let items: Vec<CartItem> = serde_json::from_str(&row.items)?;
        Ok(Transaction {
            id: row.id,
            items,
            total: Money::from_rupiah(row.total),
            payment: Money::from_rupiah(row.payment),
            change: Money::from_rupiah(row.change),
            date: row.date,
            cogs: Money::from_rupiah(row.cogs),
            profit: Money::from_rupiah(row.profit),
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, items, total, payment, change, date, cogs, profit, \
     customer_name, customer_phone FROM transactions";

// =============================================================================
// Repository
// =============================================================================

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a completed sale and returns it as stored, with the id the
    /// store assigned.
    pub async fn record(&self, new: &NewTransaction) -> DbResult<Transaction> {
        let mut db_tx = self.pool.begin().await?;
        let id = insert_transaction(&mut db_tx, new).await?;
        db_tx.commit().await?;

        debug!(id = %id, total = %new.total, "Transaction recorded");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))
    }

    /// Records a completed sale and decrements catalog stock for every
    /// line, in one SQL transaction.
    ///
    /// ## Why One Transaction
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Uncoupled writes can split on a crash:                             │
    /// │     insert sale ✓ ... decrement stock ✗  → stock drifts upward     │
    /// │                                                                     │
    /// │  Coupled writes cannot:                                             │
    /// │     BEGIN; insert sale; stock -= qty per line; COMMIT;              │
    /// │                                                                     │
    /// │  Stock is clamped at zero rather than going negative, and a line   │
    /// │  whose product has since been deleted from the catalog is skipped  │
    /// │  (history keeps its own snapshot either way).                      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn record_and_adjust_stock(&self, new: &NewTransaction) -> DbResult<Transaction> {
        let mut db_tx = self.pool.begin().await?;

        let id = insert_transaction(&mut db_tx, new).await?;

        for line in &new.items {
            // MAX keeps the stock invariant (never negative) even if the
            // catalog changed while the cart was open.
            sqlx::query("UPDATE products SET stock = MAX(stock - ?2, 0) WHERE id = ?1")
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *db_tx)
                .await?;
        }

        db_tx.commit().await?;

        debug!(id = %id, total = %new.total, lines = new.items.len(), "Transaction recorded with stock adjustment");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))
    }

    /// Lists the whole ledger in recording order.
    pub async fn list(&self) -> DbResult<Vec<Transaction>> {
        let rows: Vec<TransactionRow> =
            sqlx::query_as(&format!("{} ORDER BY id", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Lists transactions inside an inclusive date range. Either bound may
    /// be `None` to leave that side open.
    pub async fn list_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "{} WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2) ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Gets a transaction by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let row: Option<TransactionRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Transaction::try_from).transpose()
    }

    /// Fully replaces a stored transaction by id.
    ///
    /// Used by the edit flow; the caller re-derives every money figure
    /// from the revised item list before handing the record over.
    pub async fn update(&self, tx: &Transaction) -> DbResult<()> {
        debug!(id = %tx.id, total = %tx.total, "Updating transaction");

        let items = serde_json::to_string(&tx.items)?;

        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                items = ?2,
                total = ?3,
                payment = ?4,
                change = ?5,
                date = ?6,
                cogs = ?7,
                profit = ?8,
                customer_name = ?9,
                customer_phone = ?10
            WHERE id = ?1
            "#,
        )
        .bind(tx.id)
        .bind(&items)
        .bind(tx.total.rupiah())
        .bind(tx.payment.rupiah())
        .bind(tx.change.rupiah())
        .bind(tx.date)
        .bind(tx.cogs.rupiah())
        .bind(tx.profit.rupiah())
        .bind(&tx.customer_name)
        .bind(&tx.customer_phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", tx.id));
        }

        Ok(())
    }

    /// Counts ledger rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts the transaction row and returns the store-assigned id.
async fn insert_transaction(
    db_tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    new: &NewTransaction,
) -> DbResult<i64> {
    let items = serde_json::to_string(&new.items)?;

    let result = sqlx::query(
        r#"
        INSERT INTO transactions (
            items, total, payment, change, date,
            cogs, profit, customer_name, customer_phone
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&items)
    .bind(new.total.rupiah())
    .bind(new.payment.rupiah())
    .bind(new.change.rupiah())
    .bind(new.date)
    .bind(new.cogs.rupiah())
    .bind(new.profit.rupiah())
    .bind(&new.customer_name)
    .bind(&new.customer_phone)
    .execute(&mut **db_tx)
    .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Unit Tests
// =============================================================================
