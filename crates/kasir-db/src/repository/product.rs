//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Keyed CRUD (`upsert` has put semantics: insert or full replace by id)
//! - Search across name and barcodes
//! - Exact barcode lookup for the scan flow
//! - Stock-only updates for the adjustment dialog
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Search Works                                   │
//! │                                                                         │
//! │  Cashier types: "CF-0" (or a name fragment like "espr")                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Load catalog, match case-insensitive substring on name OR barcode     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Espresso   | CF-001, 8991234567890      │ ← MATCH                   │
//! │  │ Latte      | CF-002                     │ ← MATCH                   │
//! │  │ Croissant  | PS-001                     │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  No match → empty list, not an error                                   │
//! │                                                                         │
//! │  The catalog is a per-store list (dozens to hundreds of rows), so the  │
//! │  filter runs in memory over one SELECT. Barcodes live in a JSON        │
//! │  column, which SQL LIKE cannot match reliably.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Money, Product};

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw products row. Barcodes are stored as a JSON array in a TEXT column.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    category: String,
    barcodes: String,
    stock: i64,
    image: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Product> {
        let barcodes: Vec<String> = serde_json::from_str(&row.barcodes)?;
        Ok(Product {
            id: row.id,
            name: row.name,
            price: Money::from_rupiah(row.price),
            category: row.category,
            barcodes,
            stock: row.stock,
            image: row.image,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, price, category, barcodes, stock, image FROM products";

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.search("kopi").await?;
///
/// // Get by ID
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{} ORDER BY name", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Product::try_from).transpose()
    }

    /// Searches the catalog by a free-text term.
    ///
    /// Case-insensitive substring match over name and every barcode.
    /// An empty term returns the full catalog; a term that matches nothing
    /// returns an empty list without error.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Product>> {
        let term = term.trim();
        debug!(term = %term, "Searching products");

        let products = self.list().await?;
        let matched: Vec<Product> = products
            .into_iter()
            .filter(|p| p.matches_term(term))
            .collect();

        debug!(count = matched.len(), "Search returned products");
        Ok(matched)
    }

    /// Finds the product carrying an exact barcode (case-insensitive).
    ///
    /// ## Usage
    /// The scan flow: a scanner terminates its code with Enter, and the
    /// matching product goes straight into the active cart.
    pub async fn find_by_barcode(&self, code: &str) -> DbResult<Option<Product>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let products = self.list().await?;
        Ok(products.into_iter().find(|p| p.matches_barcode(code)))
    }

    /// Inserts or fully replaces a product by id (put semantics).
    ///
    /// ## Why Upsert?
    /// Product ids are caller-supplied and the item form does not
    /// distinguish create from edit; the store takes whatever it is given,
    /// last write wins.
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Upserting product");

        let barcodes = serde_json::to_string(&product.barcodes)?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, category, barcodes, stock, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                category = excluded.category,
                barcodes = excluded.barcodes,
                stock = excluded.stock,
                image = excluded.image
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price.rupiah())
        .bind(&product.category)
        .bind(&barcodes)
        .bind(product.stock)
        .bind(&product.image)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets a product's stock level, touching nothing else.
    ///
    /// ## Constrained Upsert
    /// The adjustment dialog edits only the stock figure; the optional
    /// free-text reason is display-only and never persisted.
    pub async fn set_stock(&self, id: i64, stock: i64) -> DbResult<()> {
        debug!(id = %id, stock = %stock, "Setting stock level");

        let result = sqlx::query("UPDATE products SET stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(stock)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product by id.
    ///
    /// Historical transactions keep their own item snapshots, so deleting
    /// a product never rewrites history.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog rows (for diagnostics and seed checks).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Mints an id for a new product from the current time (milliseconds).
///
/// The item form does not distinguish create from edit, so ids are minted
/// before the first save. Collisions are last-write-wins.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_product_id();
/// let product = Product { id, ... };
/// ```
pub fn generate_product_id() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn espresso() -> Product {
        Product {
            id: 1,
            name: "Espresso".to_string(),
            price: Money::from_rupiah(25_000),
            category: "Kopi".to_string(),
            barcodes: vec!["CF-001".to_string(), "8991234567890".to_string()],
            stock: 100,
            image: String::new(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.products();

        repo.upsert(&espresso()).await.unwrap();
        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored, espresso());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let db = test_db().await;
        let repo = db.products();

        repo.upsert(&espresso()).await.unwrap();

        let mut updated = espresso();
        updated.price = Money::from_rupiah(27_000);
        updated.stock = 90;
        repo.upsert(&updated).await.unwrap();

        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.price, Money::from_rupiah(27_000));
        assert_eq!(stored.stock, 90);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_barcode() {
        let db = test_db().await;
        let repo = db.products();
        repo.upsert(&espresso()).await.unwrap();

        assert_eq!(repo.search("espre").await.unwrap().len(), 1);
        assert_eq!(repo.search("8991234").await.unwrap().len(), 1);
        assert_eq!(repo.search("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty_not_error() {
        let db = test_db().await;
        let repo = db.products();
        repo.upsert(&espresso()).await.unwrap();

        let results = repo.search("ZZ-404").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_barcode_is_exact_and_case_insensitive() {
        let db = test_db().await;
        let repo = db.products();
        repo.upsert(&espresso()).await.unwrap();

        assert!(repo.find_by_barcode("cf-001").await.unwrap().is_some());
        // Substring is not enough for a scan
        assert!(repo.find_by_barcode("CF-0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_stock_touches_only_stock() {
        let db = test_db().await;
        let repo = db.products();
        repo.upsert(&espresso()).await.unwrap();

        repo.set_stock(1, 42).await.unwrap();

        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.stock, 42);
        assert_eq!(stored.price, espresso().price);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let db = test_db().await;
        let result = db.products().delete(404).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_generated_id_is_usable_as_a_key() {
        let db = test_db().await;
        let repo = db.products();

        let mut product = espresso();
        product.id = generate_product_id();
        repo.upsert(&product).await.unwrap();

        assert!(repo.get_by_id(product.id).await.unwrap().is_some());
    }
}
