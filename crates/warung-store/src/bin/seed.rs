//! # Seed Data Generator
//!
//! Populates a store document with demo products and customers for
//! development.
//!
//! ## Usage
//! ```bash
//! # Write the default document
//! cargo run -p warung-store --bin seed
//!
//! # Custom output path
//! cargo run -p warung-store --bin seed -- --out ./data/warung.json
//! ```
//!
//! ## Generated Data
//! A small, realistic warung catalog (stocked goods plus a few services)
//! and a couple of internal customers with zero starting balances.

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use warung_core::{Customer, Money, Product, ProductKind};
use warung_store::{
    next_customer_id, next_product_id, CustomerRepository, JsonFileStore, ProductRepository,
};

/// (name, kind, cost, price, stock)
const CATALOG: &[(&str, ProductKind, i64, i64, i64)] = &[
    ("Kopi Sachet", ProductKind::Good, 1_000, 2_000, 120),
    ("Teh Botol 350ml", ProductKind::Good, 3_000, 5_000, 48),
    ("Indomie Goreng", ProductKind::Good, 2_500, 4_000, 80),
    ("Gula Pasir 1kg", ProductKind::Good, 13_000, 16_000, 25),
    ("Beras 5kg", ProductKind::Good, 62_000, 70_000, 10),
    ("Minyak Goreng 1L", ProductKind::Good, 15_000, 18_000, 30),
    ("Telur Ayam (kg)", ProductKind::Good, 24_000, 28_000, 15),
    ("Sabun Mandi", ProductKind::Good, 3_500, 5_000, 40),
    ("Rokok Filter 12", ProductKind::Good, 24_000, 27_000, 20),
    ("Galon Isi Ulang", ProductKind::Service, 4_000, 6_000, 0),
    ("Fotokopi per Lembar", ProductKind::Service, 150, 500, 0),
    ("Jasa Antar", ProductKind::Service, 0, 5_000, 0),
];

/// (name, contact)
const CUSTOMERS: &[(&str, &str)] = &[
    ("Budi Santoso", "0812-3456-7890"),
    ("Siti Aminah", "0856-1122-3344"),
    ("Warung Sebelah", "0813-9988-7766"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut out_path = String::from("./warung_dev.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Warung POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Store document path (default: ./warung_dev.json)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Warung POS Seed Data Generator");
    println!("=================================");
    println!("Document: {}", out_path);
    println!();

    let storage = Arc::new(JsonFileStore::new(&out_path));
    let products = ProductRepository::new(storage.clone());
    let customers = CustomerRepository::new(storage);

    // Skip seeding when the document already has a catalog
    let existing = products.list()?;
    if !existing.is_empty() {
        println!("⚠ Document already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the document to regenerate.");
        return Ok(());
    }

    let mut catalog = Vec::with_capacity(CATALOG.len());
    for &(name, kind, cost, price, stock) in CATALOG {
        catalog.push(Product {
            id: next_product_id(&catalog),
            name: name.to_string(),
            kind,
            cost_rp: Money::from_rupiah(cost),
            price_rp: Money::from_rupiah(price),
            stock: match kind {
                ProductKind::Good => Some(stock),
                ProductKind::Service => None,
            },
        });
    }
    products.save_all(&catalog)?;
    info!(count = catalog.len(), "Seeded products");

    let mut ledger = Vec::with_capacity(CUSTOMERS.len());
    for &(name, contact) in CUSTOMERS {
        ledger.push(Customer {
            id: next_customer_id(&ledger),
            name: name.to_string(),
            contact: contact.to_string(),
            receivable_rp: Money::zero(),
        });
    }
    customers.save_all(&ledger)?;
    info!(count = ledger.len(), "Seeded customers");

    println!("✓ {} products written", catalog.len());
    println!("✓ {} customers written", ledger.len());
    println!();
    println!("Done.");

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,warung=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
