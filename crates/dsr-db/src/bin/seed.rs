//! # Seed Data Generator
//!
//! Populates a database with a demo menu and a few weeks of sales, so the
//! report screens have something to show during development.
//!
//! ## Usage
//! ```bash
//! # 14 days of sales (default)
//! cargo run -p dsr-db --bin seed
//!
//! # Custom history length and database path
//! cargo run -p dsr-db --bin seed -- --days 60 --db ./data/dsr.db
//!
//! # Load history exported from the old document store instead
//! cargo run -p dsr-db --bin seed -- --import ./sales.json
//! ```
//!
//! Imported rows are stored exactly as converted, gaps included. Reports
//! skip the malformed ones and say how many.

use chrono::{Duration, Utc};
use dsr_core::import::legacy_rows;
use dsr_core::{ingest, CheckoutLine, NewItem, NewSale};
use dsr_db::{Database, DbConfig};
use std::env;
use std::fs;

/// Demo menu: (name, price in paise)
const MENU: &[(&str, i64)] = &[
    ("Masala Chai", 1500),
    ("Filter Coffee", 2000),
    ("Idli (2 pc)", 4000),
    ("Medu Vada", 3000),
    ("Masala Dosa", 7000),
    ("Samosa", 1500),
    ("Vada Pav", 2500),
    ("Upma", 3500),
    ("Poha", 3000),
    ("Lassi", 4000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 14;
    let mut db_path = String::from("./dsr_dev.db");
    let mut import_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--import" | "-i" => {
                if i + 1 < args.len() {
                    import_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("DSR Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of sales history to generate (default: 14)");
                println!("  -d, --db <PATH>    Database file path (default: ./dsr_dev.db)");
                println!("  -i, --import <F>   Import legacy sales (JSON array or one per line)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 DSR Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if let Some(path) = import_path {
        let rows = legacy_rows(&fs::read_to_string(&path)?)?;
        let skipped = ingest(rows.iter().cloned()).skipped();

        for row in &rows {
            db.sales().insert_raw(row).await?;
        }

        println!("✓ Imported {} sales from {}", rows.len(), path);
        if skipped > 0 {
            println!("⚠ {} of them are incomplete and will be left out of reports", skipped);
        }

        db.close().await;
        return Ok(());
    }

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (name, price_paise) in MENU {
        db.items()
            .insert(&NewItem {
                name: name.to_string(),
                price_paise: *price_paise,
            })
            .await?;
    }
    println!("✓ Added {} menu items", MENU.len());

    let now = Utc::now();
    let mut recorded = 0usize;

    for day in 0..days {
        // A handful of checkouts per day, spread across opening hours.
        for order in 0..(4 + day % 5) {
            let sold_at = now - Duration::days(day) - Duration::minutes(order * 47);
            let lines = (0..1 + order % 3)
                .map(|line| {
                    let (name, price) = MENU[((day * 7 + order * 3 + line) as usize) % MENU.len()];
                    CheckoutLine {
                        item_name: name.to_string(),
                        quantity: 1 + (day + line) % 3,
                        unit_price_paise: price,
                    }
                    .into_sale(sold_at)
                })
                .collect::<Result<Vec<NewSale>, _>>()?;

            recorded += db.sales().insert_many(&lines).await?.len();
        }
    }

    println!("✓ Recorded {} sales over {} days", recorded, days);
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
