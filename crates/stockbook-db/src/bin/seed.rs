//! # Seed Data Generator
//!
//! Populates a development database with sample catalog, customer, and
//! invoice data.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//! ```
//!
//! The default categories (Electronics, Clothing, Books, Home & Garden) are
//! seeded by `Store::open` itself; this binary adds items under them, a
//! handful of customers, and one demo invoice so every screen has data.

use std::env;

use stockbook_core::invoice::LineInput;
use stockbook_core::{InvoiceDraft, NewCustomer, NewItem};
use stockbook_db::{Store, StoreConfig};

/// Sample items per default category: (category name, [(item, price, stock)]).
const CATALOG: &[(&str, &[(&str, f64, i64)])] = &[
    (
        "Electronics",
        &[
            ("USB-C Cable", 9.99, 40),
            ("Wireless Mouse", 24.5, 15),
            ("Mechanical Keyboard", 89.0, 8),
            ("27\" Monitor", 219.99, 5),
            ("Webcam", 49.95, 12),
            ("Power Bank", 34.0, 0),
        ],
    ),
    (
        "Clothing",
        &[
            ("Plain T-Shirt", 12.0, 60),
            ("Hoodie", 39.5, 22),
            ("Baseball Cap", 14.99, 35),
            ("Wool Socks", 7.25, 80),
        ],
    ),
    (
        "Books",
        &[
            ("Pocket Atlas", 18.0, 9),
            ("Cookbook", 27.5, 14),
            ("Notebook A5", 4.99, 100),
        ],
    ),
    (
        "Home & Garden",
        &[
            ("Watering Can", 11.0, 18),
            ("Garden Trowel", 8.75, 25),
            ("Scented Candle", 6.5, 50),
            ("Plant Pot 20cm", 5.0, 2),
        ],
    ),
];

const CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Ada Lovelace", "+1 555 0100", Some("ada@example.com")),
    ("Grace Hopper", "+1 555 0101", Some("grace@example.com")),
    ("Alan Turing", "+1 555 0102", None),
    ("Edsger Dijkstra", "+1 555 0103", None),
];

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
    let mut db_path = String::from("./stockbook_dev.db");

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
                println!("Stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockbook Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::open(StoreConfig::new(&db_path)).await?;

    println!("✓ Store opened, migrations applied, default categories ensured");

    // Don't double-seed an already-populated database.
    let existing = store.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Map category names to their seeded ids.
    let categories = store.categories().list().await?;
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .expect("default category missing")
    };

    let mut item_count = 0;
    let mut first_item_id = None;
    for (category, items) in CATALOG {
        let cid = category_id(category);
        for (name, price, quantity) in *items {
            let item = store
                .items()
                .insert(&NewItem {
                    name: name.to_string(),
                    category_id: cid,
                    price: *price,
                    quantity: *quantity,
                    description: None,
                })
                .await?;
            first_item_id.get_or_insert(item.id);
            item_count += 1;
        }
    }
    println!("✓ Inserted {} items", item_count);

    let mut first_customer_id = None;
    for (name, phone, email) in CUSTOMERS {
        let customer = store
            .customers()
            .insert(&NewCustomer {
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.map(str::to_string),
            })
            .await?;
        first_customer_id.get_or_insert(customer.id);
    }
    println!("✓ Inserted {} customers", CUSTOMERS.len());

    // One demo invoice so the invoices screen and dashboard have data.
    if let (Some(customer_id), Some(item_id)) = (first_customer_id, first_item_id) {
        let invoice = store
            .invoices()
            .create(&InvoiceDraft {
                customer_id,
                invoice_date: chrono::Utc::now(),
                lines: vec![
                    LineInput {
                        item_id,
                        quantity: 2,
                        unit_price: 9.99,
                    },
                    LineInput {
                        item_id,
                        quantity: 1,
                        unit_price: 8.5,
                    },
                ],
            })
            .await?;
        println!(
            "✓ Created demo invoice {} (total {})",
            invoice.invoice_number,
            stockbook_core::money::format_amount(invoice.total_amount)
        );
    }

    let counts = store.dashboard_counts().await?;
    println!();
    println!(
        "Dashboard: {} items, {} invoices, {} customers",
        counts.items, counts.invoices, counts.customers
    );
    println!();
    println!("✓ Seed complete!");

    store.close().await;
    Ok(())
}
