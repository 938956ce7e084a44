//! # POS Service
//!
//! The operations a front end calls, wiring draft sessions (in memory) to
//! the catalog, ledger, and settings (SQLite).
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Flow                                     │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Draft   │────►│  Items   │────►│  Tender  │────►│ Recorded │       │
//! │  │  (tab)   │     │ snapshot │     │  settle  │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       │                │                 │                │             │
//! │  lock, clone      lock released     payment gate     one SQL tx:       │
//! │  the lines        before I/O        (>= total)       insert + stock    │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                             draft deleted; a fresh     │
//! │                                             one appears if it was      │
//! │                                             the last                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Draft operations are synchronous (pure memory); anything touching the
//! store is async. The session lock is never held across an await.

use tracing::{debug, info};

use kasir_core::checkout;
use kasir_core::report::{self, SalesSummary};
use kasir_core::validation;
use kasir_core::{
    AppSettings, CartItem, Customer, DraftCart, Money, Product, StockItem, Transaction,
};
use kasir_db::{seed, Database, DbConfig};

use crate::error::ApiError;
use crate::state::SessionState;

/// A ready-to-use register: one database handle plus the in-memory draft
/// sessions. Cloneable; clones share both.
#[derive(Debug, Clone)]
pub struct Pos {
    db: Database,
    sessions: SessionState,
}

impl Pos {
    /// Opens the register: connects the store, applies migrations, seeds
    /// the starter catalog when the store is empty, and starts the session
    /// book with one fresh draft.
    pub async fn open(config: DbConfig) -> Result<Pos, ApiError> {
        let db = Database::new(config).await?;
        seed::seed_if_empty(&db.products()).await?;

        Ok(Pos {
            db,
            sessions: SessionState::new(),
        })
    }

    /// Wraps an already-open database (useful for tests that pre-populate).
    pub fn with_database(db: Database) -> Pos {
        Pos {
            db,
            sessions: SessionState::new(),
        }
    }

    /// The underlying store handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The whole catalog, sorted by name.
    pub async fn catalog(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list().await?)
    }

    /// Free-text catalog search (name or barcode substring). A term that
    /// matches nothing returns an empty list, not an error.
    pub async fn search_catalog(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().search(term).await?)
    }

    /// Validates and stores a product (insert or full replace by id).
    pub async fn save_product(&self, product: &Product) -> Result<(), ApiError> {
        validation::validate_product(product).map_err(kasir_core::CoreError::from)?;
        self.db.products().upsert(product).await?;
        info!(id = %product.id, name = %product.name, "Product saved");
        Ok(())
    }

    /// Deletes a product from the catalog. History keeps its snapshots.
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.db.products().delete(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Draft sessions
    // =========================================================================

    /// Creates a new draft and makes it active. An empty name gets the
    /// next "Sesi N".
    pub fn create_draft(&self, name: &str) -> String {
        let id = self.sessions.with_sessions_mut(|book| book.create_draft(name));
        debug!(draft_id = %id, "Draft created");
        id
    }

    /// Makes a draft active. No data mutation.
    pub fn switch_draft(&self, draft_id: &str) -> Result<(), ApiError> {
        self.sessions
            .with_sessions_mut(|book| book.switch_draft(draft_id))?;
        Ok(())
    }

    /// Deletes a draft. If it was the last one, a fresh empty draft takes
    /// its place so the register always has a session.
    pub fn delete_draft(&self, draft_id: &str) -> Result<(), ApiError> {
        self.sessions
            .with_sessions_mut(|book| book.delete_draft(draft_id))?;
        debug!(draft_id = %draft_id, "Draft deleted");
        Ok(())
    }

    /// Every open draft, in creation order.
    pub fn drafts(&self) -> Vec<DraftCart> {
        self.sessions.with_sessions(|book| book.drafts().to_vec())
    }

    /// The draft currently displayed and eligible for checkout.
    pub fn active_draft(&self) -> DraftCart {
        self.sessions.with_sessions(|book| book.active().clone())
    }

    /// Adds one unit of a catalog product to a draft.
    ///
    /// The product is fetched fresh from the store so the line freezes the
    /// current price.
    pub async fn add_to_cart(&self, draft_id: &str, product_id: i64) -> Result<DraftCart, ApiError> {
        let product = self
            .db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Product", product_id))?;

        let draft = self.sessions.with_sessions_mut(|book| {
            book.add_to_cart(draft_id, &product)?;
            book.get(draft_id).cloned()
        })?;

        debug!(draft_id = %draft_id, product_id = %product_id, "Added to cart");
        Ok(draft)
    }

    /// Resolves a scanned barcode and adds the product to the active draft.
    ///
    /// ## Returns
    /// The matched product, so the UI can announce what was added. An
    /// unknown code is a NotFound error the UI surfaces as a notification.
    pub async fn scan_into_active(&self, code: &str) -> Result<Product, ApiError> {
        let product = self
            .db
            .products()
            .find_by_barcode(code)
            .await?
            .ok_or_else(|| ApiError::not_found("Barcode", code))?;

        self.sessions.with_sessions_mut(|book| {
            let draft_id = book.active_id().to_string();
            book.add_to_cart(&draft_id, &product)
        })?;

        debug!(code = %code, product = %product.name, "Scanned into active draft");
        Ok(product)
    }

    /// Sets a line quantity; zero or negative removes the line.
    pub fn set_quantity(
        &self,
        draft_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<DraftCart, ApiError> {
        self.sessions
            .with_sessions_mut(|book| book.set_quantity(draft_id, product_id, quantity))?;
        self.draft(draft_id)
    }

    /// Removes a line from a draft.
    pub fn remove_from_cart(&self, draft_id: &str, product_id: i64) -> Result<DraftCart, ApiError> {
        self.sessions
            .with_sessions_mut(|book| book.remove_from_cart(draft_id, product_id))?;
        self.draft(draft_id)
    }

    /// Removes every line from a draft.
    pub fn clear_cart(&self, draft_id: &str) -> Result<DraftCart, ApiError> {
        self.sessions
            .with_sessions_mut(|book| book.clear_cart(draft_id))?;
        self.draft(draft_id)
    }

    /// Quick-cash suggestions for a draft's current total.
    pub fn quick_cash(&self, draft_id: &str) -> Result<Vec<Money>, ApiError> {
        let total = self
            .sessions
            .with_sessions(|book| book.get(draft_id).map(|d| checkout::cart_total(&d.items)))?;
        Ok(checkout::quick_cash_options(total))
    }

    fn draft(&self, draft_id: &str) -> Result<DraftCart, ApiError> {
        Ok(self
            .sessions
            .with_sessions(|book| book.get(draft_id).cloned())?)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Settles a draft against a tendered payment and records the sale.
    ///
    /// ## What Happens
    /// 1. The draft's lines are snapshotted under the session lock
    /// 2. The calculator gates the payment and derives all money figures
    /// 3. The sale is recorded and stock decremented in one SQL transaction
    /// 4. The draft is deleted (a fresh one appears if it was the last)
    ///
    /// On any error the draft is left untouched, so the cashier can fix
    /// the tender and retry.
    pub async fn checkout(
        &self,
        draft_id: &str,
        payment: Money,
        customer: Customer,
    ) -> Result<Transaction, ApiError> {
        let items = self
            .sessions
            .with_sessions(|book| book.get(draft_id).map(|d| d.items.clone()))?;

        let new_tx = checkout::settle(items, payment, customer)?;
        let recorded = self
            .db
            .transactions()
            .record_and_adjust_stock(&new_tx)
            .await?;

        self.sessions
            .with_sessions_mut(|book| book.delete_draft(draft_id))?;

        info!(
            id = %recorded.id,
            total = %recorded.total,
            change = %recorded.change,
            "Checkout complete"
        );
        Ok(recorded)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// The whole transaction history, in recording order.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.db.transactions().list().await?)
    }

    /// Applies the edit flow to a stored transaction: replaces items,
    /// payment, and customer fields, re-deriving every money figure.
    ///
    /// A revised payment below the revised total is rejected before
    /// anything is written.
    pub async fn edit_transaction(
        &self,
        id: i64,
        items: Vec<CartItem>,
        payment: Money,
        customer: Customer,
    ) -> Result<Transaction, ApiError> {
        // The edit form requires every remaining line to be a real line.
        for line in &items {
            validation::validate_quantity(line.quantity)
                .map_err(kasir_core::CoreError::from)?;
        }
        validation::validate_payment(payment).map_err(kasir_core::CoreError::from)?;

        let original = self
            .db
            .transactions()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Transaction", id))?;

        let revised = checkout::revise(&original, items, payment, customer)?;
        self.db.transactions().update(&revised).await?;

        info!(id = %id, total = %revised.total, "Transaction edited");
        Ok(revised)
    }

    /// Sales summary plus the matching transactions, optionally restricted
    /// to an inclusive date range.
    pub async fn sales_report(
        &self,
        from: Option<chrono::DateTime<chrono::Utc>>,
        to: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(SalesSummary, Vec<Transaction>), ApiError> {
        let transactions = self.db.transactions().list_between(from, to).await?;
        let summary = report::summarize(&transactions);
        Ok((summary, transactions))
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// The catalog viewed as stock items, each carrying the threshold it
    /// is judged against.
    pub async fn stock_levels(&self) -> Result<Vec<StockItem>, ApiError> {
        let products = self.db.products().list().await?;
        Ok(products.into_iter().map(StockItem::from).collect())
    }

    /// Sets a product's stock level. The free-text reason shown in the
    /// adjustment dialog is display-only and deliberately not a parameter.
    pub async fn adjust_stock(&self, product_id: i64, stock: i64) -> Result<(), ApiError> {
        validation::validate_stock(stock).map_err(kasir_core::CoreError::from)?;
        self.db.products().set_stock(product_id, stock).await?;
        info!(product_id = %product_id, stock = %stock, "Stock adjusted");
        Ok(())
    }

    /// Whether any product is below the low-stock threshold. Drives a
    /// warning badge only; sales are never blocked on stock.
    pub async fn has_low_stock(&self) -> Result<bool, ApiError> {
        let products = self.db.products().list().await?;
        Ok(products.iter().any(|p| p.is_low_stock()))
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// The store-identity record, or its default when none was saved.
    pub async fn settings(&self) -> Result<AppSettings, ApiError> {
        Ok(self.db.settings().load().await?)
    }

    /// Overwrites the store-identity record wholesale.
    pub async fn save_settings(&self, settings: &AppSettings) -> Result<(), ApiError> {
        self.db.settings().save(settings).await?;
        info!(app_name = %settings.app_name, "Settings saved");
        Ok(())
    }
}
