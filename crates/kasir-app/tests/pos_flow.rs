//! End-to-end register flows against an in-memory store: open, browse,
//! build drafts, tender, and read the history back.

use kasir_app::{ErrorCode, Pos};
use kasir_core::{AppSettings, Customer, Money};
use kasir_db::DbConfig;

async fn open_register() -> Pos {
    Pos::open(DbConfig::in_memory()).await.unwrap()
}

/// Finds the seeded product id by name.
async fn product_id(pos: &Pos, name: &str) -> i64 {
    pos.catalog()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("{} missing from catalog", name))
        .id
}

#[tokio::test]
async fn first_open_seeds_catalog_and_one_session() {
    let pos = open_register().await;

    let catalog = pos.catalog().await.unwrap();
    assert_eq!(catalog.len(), 12);

    let drafts = pos.drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Sesi 1");
    assert!(drafts[0].items.is_empty());
    assert_eq!(pos.active_draft().id, drafts[0].id);
}

#[tokio::test]
async fn checkout_two_coffees_records_the_canonical_figures() {
    let pos = open_register().await;
    let draft_id = pos.active_draft().id;

    let espresso = product_id(&pos, "Espresso").await;
    let latte = product_id(&pos, "Latte").await;

    // Espresso twice merges into one line with quantity 2
    pos.add_to_cart(&draft_id, espresso).await.unwrap();
    pos.add_to_cart(&draft_id, espresso).await.unwrap();
    let draft = pos.add_to_cart(&draft_id, latte).await.unwrap();
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items[0].quantity, 2);

    // Quick cash always offers the exact total
    let options = pos.quick_cash(&draft_id).unwrap();
    assert!(options.contains(&Money::from_rupiah(85_000)));

    let sale = pos
        .checkout(
            &draft_id,
            Money::from_rupiah(100_000),
            Customer {
                name: Some("Budi".to_string()),
                phone: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(sale.total, Money::from_rupiah(85_000));
    assert_eq!(sale.change, Money::from_rupiah(15_000));
    assert_eq!(sale.cogs, Money::from_rupiah(34_000));
    assert_eq!(sale.profit, Money::from_rupiah(51_000));
    assert_eq!(sale.customer_name.as_deref(), Some("Budi"));

    // Stock came down with the sale, in the same transaction
    let stock = pos.stock_levels().await.unwrap();
    let espresso_stock = stock
        .iter()
        .find(|s| s.product.id == espresso)
        .unwrap()
        .product
        .stock;
    assert_eq!(espresso_stock, 98);

    // The draft is gone and a fresh session took its place
    let drafts = pos.drafts();
    assert_eq!(drafts.len(), 1);
    assert_ne!(drafts[0].id, draft_id);
    assert!(drafts[0].items.is_empty());

    // The ledger has it
    let history = pos.transactions().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, sale.id);
}

#[tokio::test]
async fn insufficient_payment_rejects_and_leaves_the_draft_alone() {
    let pos = open_register().await;
    let draft_id = pos.active_draft().id;
    let espresso = product_id(&pos, "Espresso").await;

    pos.add_to_cart(&draft_id, espresso).await.unwrap();

    let err = pos
        .checkout(&draft_id, Money::from_rupiah(20_000), Customer::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentError);

    // Draft untouched, nothing recorded
    assert_eq!(pos.active_draft().id, draft_id);
    assert_eq!(pos.active_draft().items.len(), 1);
    assert!(pos.transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_draft_cannot_be_checked_out() {
    let pos = open_register().await;
    let draft_id = pos.active_draft().id;

    let err = pos
        .checkout(&draft_id, Money::from_rupiah(100_000), Customer::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartError);
}

#[tokio::test]
async fn parallel_sessions_keep_their_own_lines() {
    let pos = open_register().await;
    let first = pos.active_draft().id;
    let espresso = product_id(&pos, "Espresso").await;
    let latte = product_id(&pos, "Latte").await;

    pos.add_to_cart(&first, espresso).await.unwrap();

    let second = pos.create_draft("Meja 4");
    assert_eq!(pos.active_draft().id, second);
    pos.add_to_cart(&second, latte).await.unwrap();

    // Each draft kept only its own line
    let drafts = pos.drafts();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].items[0].name, "Espresso");
    assert_eq!(drafts[1].items[0].name, "Latte");

    // Switching back does not mutate anything
    pos.switch_draft(&first).unwrap();
    assert_eq!(pos.active_draft().items.len(), 1);
}

#[tokio::test]
async fn scan_adds_to_the_active_draft_and_unknown_code_is_not_found() {
    let pos = open_register().await;

    let product = pos.scan_into_active("cf-001").await.unwrap();
    assert_eq!(product.name, "Espresso");
    assert_eq!(pos.active_draft().items.len(), 1);

    let err = pos.scan_into_active("ZZ-404").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    // Search by the same missing fragment is empty, not an error
    assert!(pos.search_catalog("ZZ-404").await.unwrap().is_empty());
}

#[tokio::test]
async fn editing_a_transaction_recomputes_or_rejects() {
    let pos = open_register().await;
    let draft_id = pos.active_draft().id;
    let espresso = product_id(&pos, "Espresso").await;
    let latte = product_id(&pos, "Latte").await;

    pos.add_to_cart(&draft_id, espresso).await.unwrap();
    pos.add_to_cart(&draft_id, espresso).await.unwrap();
    pos.add_to_cart(&draft_id, latte).await.unwrap();

    let sale = pos
        .checkout(&draft_id, Money::from_rupiah(100_000), Customer::anonymous())
        .await
        .unwrap();

    // Dropping the latte lowers the total; change is recomputed upward
    let fewer: Vec<_> = sale
        .items
        .iter()
        .filter(|i| i.product_id == espresso)
        .cloned()
        .collect();
    let revised = pos
        .edit_transaction(sale.id, fewer, sale.payment, Customer::anonymous())
        .await
        .unwrap();
    assert_eq!(revised.total, Money::from_rupiah(50_000));
    assert_eq!(revised.change, Money::from_rupiah(50_000));

    let stored = pos.transactions().await.unwrap();
    assert_eq!(stored[0].total, Money::from_rupiah(50_000));

    // Raising the total above the stored payment is rejected visibly
    let mut more = revised.items.clone();
    more[0].quantity = 10;
    let err = pos
        .edit_transaction(revised.id, more, revised.payment, Customer::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentError);

    // And the rejected edit wrote nothing
    let stored = pos.transactions().await.unwrap();
    assert_eq!(stored[0].total, Money::from_rupiah(50_000));
}

#[tokio::test]
async fn report_sums_the_filtered_history() {
    let pos = open_register().await;
    let espresso = product_id(&pos, "Espresso").await;

    for _ in 0..2 {
        let draft_id = pos.active_draft().id;
        pos.add_to_cart(&draft_id, espresso).await.unwrap();
        pos.checkout(&draft_id, Money::from_rupiah(25_000), Customer::anonymous())
            .await
            .unwrap();
    }

    let (summary, transactions) = pos.sales_report(None, None).await.unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.revenue, Money::from_rupiah(50_000));
    assert_eq!(summary.cogs, Money::from_rupiah(20_000));
    assert_eq!(summary.gross_profit, Money::from_rupiah(30_000));

    // A range in the far past matches nothing
    let past = chrono::DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let (empty, none) = pos.sales_report(None, Some(past)).await.unwrap();
    assert_eq!(empty.transaction_count, 0);
    assert!(none.is_empty());
}

#[tokio::test]
async fn stock_adjustment_and_low_stock_badge() {
    let pos = open_register().await;
    let espresso = product_id(&pos, "Espresso").await;

    // Starter catalog is comfortably stocked
    assert!(!pos.has_low_stock().await.unwrap());

    pos.adjust_stock(espresso, 3).await.unwrap();
    assert!(pos.has_low_stock().await.unwrap());

    let levels = pos.stock_levels().await.unwrap();
    let item = levels.iter().find(|s| s.product.id == espresso).unwrap();
    assert_eq!(item.product.stock, 3);
    assert!(item.is_low());

    // Negative stock never gets in
    let err = pos.adjust_stock(espresso, -1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn product_form_rules_are_enforced_on_save() {
    let pos = open_register().await;
    let mut product = pos.catalog().await.unwrap().remove(0);

    product.barcodes.clear();
    let err = pos.save_product(&product).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    product.barcodes = vec!["NEW-001".to_string()];
    product.name = "Kopi Tubruk".to_string();
    pos.save_product(&product).await.unwrap();

    let found = pos.search_catalog("tubruk").await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn wrapping_an_existing_store_does_not_seed() {
    let db = kasir_db::Database::new(DbConfig::in_memory()).await.unwrap();
    let pos = Pos::with_database(db);

    assert!(pos.catalog().await.unwrap().is_empty());
    // Still one live session even over an empty store
    assert_eq!(pos.drafts().len(), 1);
}

#[tokio::test]
async fn settings_round_trip_with_default_fallback() {
    let pos = open_register().await;

    assert_eq!(pos.settings().await.unwrap(), AppSettings::default());

    let mine = AppSettings {
        app_name: "Kopi Senja".to_string(),
        address: "Jl. Melati No. 7, Bandung".to_string(),
        phone: "022-7654321".to_string(),
        receipt_footer: "Sampai jumpa lagi!".to_string(),
    };
    pos.save_settings(&mine).await.unwrap();
    assert_eq!(pos.settings().await.unwrap(), mine);
}
