//! # Seed Data Tool
//!
//! Creates (or opens) a Kasir database file and fills an empty catalog
//! with the starter products.
//!
//! ## Usage
//! ```bash
//! # Default path ./kasir_dev.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```

use std::env;

use kasir_db::{seed, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    // KASIR_DB overrides the default; --db overrides both
    let mut db_path = env::var("KASIR_DB").unwrap_or_else(|_| String::from("./kasir_dev.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Tool");
    println!("=======================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (runs migrations)
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let inserted = seed::seed_if_empty(&db.products()).await?;
    if inserted == 0 {
        let existing = db.products().count().await?;
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!("✓ Inserted {} starter products", inserted);

    // Quick sanity checks over what we just wrote
    let espresso = db.products().find_by_barcode("CF-001").await?;
    println!(
        "  Barcode CF-001 → {}",
        espresso.map(|p| p.name).unwrap_or_else(|| "??".to_string())
    );

    let lattes = db.products().search("latte").await?;
    println!("  Search 'latte': {} results", lattes.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
