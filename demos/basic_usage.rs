//! Basic logger usage example
//!
//! Demonstrates level thresholds, the module allow-list and parameter
//! formatting on the console.
//!
//! Run with: cargo run --example basic_usage

use app_logger::prelude::*;
use app_logger::{debug, error, info};
use serde::Serialize;

#[derive(Serialize)]
struct Cart {
    id: &'static str,
    items: u32,
}

fn main() -> Result<()> {
    println!("=== App Logger - Basic Usage Example ===\n");

    Logger::set_app_name("shop");
    Logger::set_app_version("1.0.0");

    let checkout = Logger::new("checkout");
    let inventory = Logger::new("inventory");

    println!("1. Default threshold is DEBUG - info is hidden:");
    debug!(checkout, "cart loaded", LogValue::json(Cart { id: "c-17", items: 3 }));
    info!(checkout, "Info message (hidden)");
    error!(checkout, ErrorRecord::new("payment declined", "at charge()\nat checkout()"));

    println!("\n2. INFO threshold shows everything:");
    Logger::set_level(LogLevel::Info);
    info!(inventory, "stock level", 12);

    println!("\n3. Only the checkout module:");
    Logger::set_module_names(["checkout"]);
    info!(checkout, "visible");
    info!(inventory, "hidden");

    Logger::flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
