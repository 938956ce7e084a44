//! # Draft-Cart Sessions
//!
//! The multi-session cart manager: several independently edited carts
//! ("drafts"), exactly one active at a time.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Book Operations                              │
//! │                                                                         │
//! │  Cashier Action            Operation              State Change          │
//! │  ──────────────            ─────────              ────────────          │
//! │                                                                         │
//! │  New tab ────────────────► create_draft() ──────► drafts.push, active  │
//! │                                                                         │
//! │  Click tab ──────────────► switch_draft() ──────► active pointer only  │
//! │                                                                         │
//! │  Click product ──────────► add_to_cart() ───────► qty += 1 or new line │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──────► replace or remove    │
//! │                                                                         │
//! │  Close tab ──────────────► delete_draft() ──────► remove; refill if    │
//! │                                                    book would be empty  │
//! │                                                                         │
//! │  INVARIANT: the active pointer never dangles, and the book is never    │
//! │  empty once live. Deleting the last draft synthesizes a fresh one.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, Product};
use crate::SESSION_NAME_PREFIX;

// =============================================================================
// Draft Cart
// =============================================================================

/// An independently named, in-progress shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product again
///   increments its quantity)
/// - Quantity is always >= 1; a quantity pushed to 0 or below removes
///   the line instead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftCart {
    /// Session-scoped identifier.
    pub id: String,

    /// Display name, e.g. "Sesi 1".
    pub name: String,

    /// Ordered cart lines.
    pub items: Vec<CartItem>,
}

impl DraftCart {
    /// Creates a new empty draft with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        DraftCart {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in the draft: quantity += 1
    /// - Otherwise: appended as a new line with quantity 1
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            line.quantity += 1;
            return;
        }
        self.items.push(CartItem::from_product(product, 1));
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - `quantity > 0`: replaces the line's quantity
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_line(product_id);
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CoreError::LineNotFound {
                draft_id: self.id.clone(),
                product_id,
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_line(&mut self, product_id: i64) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            return Err(CoreError::LineNotFound {
                draft_id: self.id.clone(),
                product_id,
            });
        }
        Ok(())
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Checks if the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines (unique products).
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Session Book
// =============================================================================

/// Holds every open draft and the active-draft pointer.
///
/// ## State Machine
/// Drafts have no internal states beyond "exists, with N lines". The only
/// transition of note is active-pointer reassignment, which must never
/// point at a draft that is not in the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBook {
    drafts: Vec<DraftCart>,
    active_id: String,
    /// Counter behind auto-generated "Sesi N" names. Monotonic for the
    /// lifetime of the book so reopened numbers are never reissued.
    next_session: u64,
}

impl SessionBook {
    /// Creates a book holding a single fresh draft, active.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::session::SessionBook;
    ///
    /// let book = SessionBook::new();
    /// assert_eq!(book.drafts().len(), 1);
    /// assert_eq!(book.active().name, "Sesi 1");
    /// ```
    pub fn new() -> Self {
        let first = DraftCart::new(format!("{} 1", SESSION_NAME_PREFIX));
        let active_id = first.id.clone();
        SessionBook {
            drafts: vec![first],
            active_id,
            next_session: 2,
        }
    }

    /// All open drafts, in creation order.
    pub fn drafts(&self) -> &[DraftCart] {
        &self.drafts
    }

    /// The active draft.
    ///
    /// The book is never empty and the pointer never dangles, so this
    /// always resolves.
    pub fn active(&self) -> &DraftCart {
        self.drafts
            .iter()
            .find(|d| d.id == self.active_id)
            .unwrap_or(&self.drafts[0])
    }

    /// Id of the active draft.
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Looks up a draft by id.
    pub fn get(&self, draft_id: &str) -> CoreResult<&DraftCart> {
        self.drafts
            .iter()
            .find(|d| d.id == draft_id)
            .ok_or_else(|| CoreError::DraftNotFound(draft_id.to_string()))
    }

    fn get_mut(&mut self, draft_id: &str) -> CoreResult<&mut DraftCart> {
        self.drafts
            .iter_mut()
            .find(|d| d.id == draft_id)
            .ok_or_else(|| CoreError::DraftNotFound(draft_id.to_string()))
    }

    /// Appends a new draft and makes it active.
    ///
    /// An empty name gets the next auto-generated "Sesi N".
    pub fn create_draft(&mut self, name: &str) -> String {
        let name = if name.trim().is_empty() {
            self.next_session_name()
        } else {
            name.trim().to_string()
        };

        let draft = DraftCart::new(name);
        let id = draft.id.clone();
        self.drafts.push(draft);
        self.active_id = id.clone();
        id
    }

    /// Reassigns the active pointer. No data mutation.
    pub fn switch_draft(&mut self, draft_id: &str) -> CoreResult<()> {
        // Validate before assigning so the pointer cannot dangle.
        self.get(draft_id)?;
        self.active_id = draft_id.to_string();
        Ok(())
    }

    /// Removes a draft.
    ///
    /// ## Behavior
    /// - If it was active, activation falls to the first remaining draft
    /// - If it was the last draft, a fresh empty one is synthesized and
    ///   made active; a cart session always exists once the book is live
    pub fn delete_draft(&mut self, draft_id: &str) -> CoreResult<()> {
        let before = self.drafts.len();
        self.drafts.retain(|d| d.id != draft_id);

        if self.drafts.len() == before {
            return Err(CoreError::DraftNotFound(draft_id.to_string()));
        }

        if self.drafts.is_empty() {
            let name = self.next_session_name();
            let fresh = DraftCart::new(name);
            self.active_id = fresh.id.clone();
            self.drafts.push(fresh);
        } else if self.active_id == draft_id {
            self.active_id = self.drafts[0].id.clone();
        }

        Ok(())
    }

    /// Adds one unit of a product to a draft.
    pub fn add_to_cart(&mut self, draft_id: &str, product: &Product) -> CoreResult<()> {
        self.get_mut(draft_id)?.add_product(product);
        Ok(())
    }

    /// Sets a line quantity in a draft (<= 0 removes the line).
    pub fn set_quantity(
        &mut self,
        draft_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> CoreResult<()> {
        self.get_mut(draft_id)?.set_quantity(product_id, quantity)
    }

    /// Removes a line from a draft.
    pub fn remove_from_cart(&mut self, draft_id: &str, product_id: i64) -> CoreResult<()> {
        self.get_mut(draft_id)?.remove_line(product_id)
    }

    /// Removes all lines from a draft.
    pub fn clear_cart(&mut self, draft_id: &str) -> CoreResult<()> {
        self.get_mut(draft_id)?.clear();
        Ok(())
    }

    fn next_session_name(&mut self) -> String {
        let name = format!("{} {}", SESSION_NAME_PREFIX, self.next_session);
        self.next_session += 1;
        name
    }
}

impl Default for SessionBook {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn test_product(id: i64, price: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_rupiah(price),
            category: "Kopi".to_string(),
            barcodes: vec![format!("BC-{:03}", id)],
            stock: 100,
            image: String::new(),
        }
    }

    #[test]
    fn test_fresh_book_has_sesi_1_active() {
        let book = SessionBook::new();
        assert_eq!(book.drafts().len(), 1);
        assert_eq!(book.active().name, "Sesi 1");
        assert!(book.active().is_empty());
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut book = SessionBook::new();
        let draft_id = book.active_id().to_string();
        let product = test_product(1, 25_000);

        book.add_to_cart(&draft_id, &product).unwrap();
        book.add_to_cart(&draft_id, &product).unwrap();

        let draft = book.get(&draft_id).unwrap();
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.items[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut book = SessionBook::new();
        let draft_id = book.active_id().to_string();
        let product = test_product(1, 25_000);

        book.add_to_cart(&draft_id, &product).unwrap();
        book.set_quantity(&draft_id, 1, 0).unwrap();
        assert!(book.get(&draft_id).unwrap().is_empty());
    }

    #[test]
    fn test_negative_quantity_also_removes_line() {
        let mut book = SessionBook::new();
        let draft_id = book.active_id().to_string();
        let product = test_product(1, 25_000);

        book.add_to_cart(&draft_id, &product).unwrap();
        book.set_quantity(&draft_id, 1, -3).unwrap();
        assert!(book.get(&draft_id).unwrap().is_empty());
    }

    #[test]
    fn test_set_quantity_replaces_value() {
        let mut book = SessionBook::new();
        let draft_id = book.active_id().to_string();
        let product = test_product(1, 25_000);

        book.add_to_cart(&draft_id, &product).unwrap();
        book.set_quantity(&draft_id, 1, 7).unwrap();
        assert_eq!(book.get(&draft_id).unwrap().items[0].quantity, 7);
    }

    #[test]
    fn test_unknown_draft_is_an_error_not_a_panic() {
        let mut book = SessionBook::new();
        let product = test_product(1, 25_000);

        let result = book.add_to_cart("no-such-draft", &product);
        assert!(matches!(result, Err(CoreError::DraftNotFound(_))));
    }

    #[test]
    fn test_create_and_switch_draft() {
        let mut book = SessionBook::new();
        let first = book.active_id().to_string();

        let second = book.create_draft("");
        assert_eq!(book.active_id(), second);
        assert_eq!(book.active().name, "Sesi 2");

        book.switch_draft(&first).unwrap();
        assert_eq!(book.active_id(), first);
    }

    #[test]
    fn test_switch_to_unknown_draft_leaves_pointer_unchanged() {
        let mut book = SessionBook::new();
        let active = book.active_id().to_string();

        assert!(book.switch_draft("ghost").is_err());
        assert_eq!(book.active_id(), active);
    }

    #[test]
    fn test_custom_draft_name_is_kept() {
        let mut book = SessionBook::new();
        let id = book.create_draft("Meja 4");
        assert_eq!(book.get(&id).unwrap().name, "Meja 4");
    }

    #[test]
    fn test_delete_active_falls_to_first_remaining() {
        let mut book = SessionBook::new();
        let first = book.active_id().to_string();
        let second = book.create_draft("");

        book.delete_draft(&second).unwrap();
        assert_eq!(book.active_id(), first);
        assert_eq!(book.drafts().len(), 1);
    }

    #[test]
    fn test_delete_last_draft_synthesizes_fresh_one() {
        let mut book = SessionBook::new();
        let draft_id = book.active_id().to_string();
        let product = test_product(1, 25_000);
        book.add_to_cart(&draft_id, &product).unwrap();

        book.delete_draft(&draft_id).unwrap();

        // Exactly one fresh, empty, active draft afterwards
        assert_eq!(book.drafts().len(), 1);
        assert!(book.active().is_empty());
        assert_ne!(book.active_id(), draft_id);
        assert_eq!(book.active().name, "Sesi 2");
    }

    #[test]
    fn test_session_numbers_are_never_reissued() {
        let mut book = SessionBook::new();
        let second = book.create_draft("");
        book.delete_draft(&second).unwrap();

        let third = book.create_draft("");
        assert_eq!(book.get(&third).unwrap().name, "Sesi 3");
    }
}
