//! # Seed Data Generator
//!
//! Populates a database with sample products and customers for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p benta-db --bin seed
//!
//! # Custom path and product count
//! cargo run -p benta-db --bin seed -- --db ./data/benta.db --count 200
//! ```

use chrono::Utc;
use std::env;

use benta_core::{Customer, Product};
use benta_db::repository::customer::generate_customer_id;
use benta_db::repository::product::generate_product_id;
use benta_db::{Database, DbConfig};

/// Sample inventory by category, with base prices in centavos.
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Beverages",
        &[
            ("Coke Sakto 200ml", 1500),
            ("Royal Tru-Orange 330ml", 2500),
            ("C2 Apple 355ml", 2800),
            ("Kopiko Black 3-in-1", 900),
            ("Milo Sachet 24g", 1200),
            ("Sting Energy Drink", 2200),
        ],
    ),
    (
        "Snacks",
        &[
            ("Lucky Me Pancit Canton", 1800),
            ("Piattos Cheese 40g", 2300),
            ("Nova Country Cheddar", 2100),
            ("SkyFlakes Singles", 800),
            ("Boy Bawang Cornick", 1700),
            ("Chippy BBQ 27g", 1000),
        ],
    ),
    (
        "Household",
        &[
            ("Surf Powder Sachet", 1100),
            ("Joy Dishwashing 20ml", 900),
            ("Zonrox Bleach 100ml", 1400),
            ("Ariel Powder Sachet", 1300),
        ],
    ),
    (
        "Canned Goods",
        &[
            ("555 Sardines Green", 2400),
            ("Century Tuna Flakes", 3900),
            ("Argentina Corned Beef", 3500),
            ("Ligo Sardines Red", 2600),
        ],
    ),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Aling Rosa", "0917-555-0101"),
    ("Mang Ben", "0918-555-0102"),
    ("Ka Edong", "0919-555-0103"),
    ("Nene Santos", "0920-555-0104"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./benta_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Benta POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Max products to generate (default: full catalog)");
                println!("  -d, --db <PATH>    Database file path (default: ./benta_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Benta POS Seed Data Generator");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products; skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0usize;
    for (category, items) in CATALOG {
        for (idx, (name, price_cents)) in items.iter().enumerate() {
            if generated >= count {
                break;
            }

            let product = Product {
                id: generate_product_id(),
                name: (*name).to_string(),
                description: None,
                category: Some((*category).to_string()),
                price_cents: *price_cents,
                // Varied stock, a few items deliberately below the
                // low-stock threshold
                stock: ((idx * 17 + 3) % 60) as i64,
                created_at: Utc::now(),
            };

            db.products().insert(&product).await?;
            generated += 1;
        }
    }
    println!("Generated {} products", generated);

    for (name, contact) in CUSTOMERS {
        let customer = Customer {
            id: generate_customer_id(),
            name: (*name).to_string(),
            contact_info: Some((*contact).to_string()),
            total_purchases_cents: 0,
            created_at: Utc::now(),
        };
        db.customers().insert(&customer).await?;
    }
    println!("Generated {} customers", CUSTOMERS.len());

    let low = db
        .products()
        .low_stock(benta_core::LOW_STOCK_THRESHOLD)
        .await?;
    println!("{} products start below the low-stock threshold", low.len());

    println!();
    println!("Seed complete");

    Ok(())
}
