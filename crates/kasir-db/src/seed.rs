//! # Catalog Seeding
//!
//! First-run catalog: when the products table is empty, a canned café
//! catalog is inserted so the register is usable out of the box. A store
//! that already has products is never touched.

use tracing::info;

use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use kasir_core::{Money, Product};

/// The canned starter catalog: twelve café products across three
/// categories, each with at least one scan code.
pub fn default_catalog() -> Vec<Product> {
    let product = |id: i64, name: &str, price: i64, category: &str, barcodes: &[&str], stock: i64| {
        Product {
            id,
            name: name.to_string(),
            price: Money::from_rupiah(price),
            category: category.to_string(),
            barcodes: barcodes.iter().map(|b| b.to_string()).collect(),
            stock,
            image: "https://placehold.co/300x300.png".to_string(),
        }
    };

    vec![
        product(1, "Espresso", 25_000, "Kopi", &["CF-001", "8991234567890"], 100),
        product(2, "Latte", 35_000, "Kopi", &["CF-002"], 100),
        product(3, "Cappuccino", 35_000, "Kopi", &["CF-003"], 80),
        product(4, "Croissant", 20_000, "Roti", &["PS-001", "8991234567891"], 50),
        product(5, "Muffin", 22_000, "Roti", &["PS-002"], 60),
        product(6, "Air Mineral", 10_000, "Minuman", &["BV-001"], 200),
        product(7, "Es Teh", 18_000, "Minuman", &["BV-002"], 90),
        product(8, "Americano", 30_000, "Kopi", &["CF-004"], 120),
        product(9, "Kue Danish", 25_000, "Roti", &["PS-003"], 40),
        product(10, "Jus Jeruk", 25_000, "Minuman", &["BV-003"], 75),
        product(11, "Macchiato", 27_500, "Kopi", &["CF-005"], 70),
        product(12, "Roti Kayu Manis", 32_500, "Roti", &["PS-004"], 35),
    ]
}

/// Inserts the starter catalog when the store is empty.
///
/// ## Returns
/// The number of products inserted (0 when the store already had any).
pub async fn seed_if_empty(products: &ProductRepository) -> DbResult<usize> {
    if products.count().await? > 0 {
        return Ok(0);
    }

    let catalog = default_catalog();
    for product in &catalog {
        products.upsert(product).await?;
    }

    info!(count = catalog.len(), "Seeded starter catalog");
    Ok(catalog.len())
}
