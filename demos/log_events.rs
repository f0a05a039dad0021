//! Log event subscription example
//!
//! Demonstrates the replay-latest `on_log` stream with a callback and a
//! channel subscriber.
//!
//! Run with: cargo run --example log_events

use app_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== App Logger - Log Events Example ===\n");

    // Creating a logger resets the level, so configure afterwards
    let logger = Logger::new("orders");

    Logger::configure()
        .app_name("shop")
        .app_version("1.0.0")
        .level(LogLevel::Error)
        .apply();

    // Called right away with None, then once per accepted call
    let subscription = Logger::on_log().subscribe(|entry| match entry {
        Some(entry) => println!("   event: {} {:?}", entry.level, entry.params),
        None => println!("   event: <nothing logged yet>"),
    });

    logger.debug(["order received (suppressed)"]);
    logger.error([LogValue::error_parts("order rejected", "at validate()")]);

    // A late channel subscriber gets the last entry first
    let events = Logger::on_log().subscribe_channel();
    if let Ok(Some(entry)) = events.try_recv() {
        println!("\nReplayed to late subscriber:\n{}", entry.to_json()?);
    }

    subscription.unsubscribe();

    println!(
        "\nMetrics: {} emitted, {} suppressed",
        Logger::metrics().emitted(),
        Logger::metrics().suppressed()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
