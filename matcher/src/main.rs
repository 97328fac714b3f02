//! Demonstration driver for the matching engine
//!
//! Submits a fixed sequence of orders and prints the executions and the
//! best bid/ask after each submission. Display only; all matching logic
//! lives in the `matching-engine` crate.

use std::collections::HashMap;

use clap::Parser;
use common::model::order::{Order, Side};
use dotenv::dotenv;
use matching_engine::MatchingEngine;
use rust_decimal_macros::dec;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    dotenv().ok();

    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    info!("Starting matching engine demonstration");

    let mut engine = MatchingEngine::new();

    let orders = vec![
        ("Buy-1", Order::new(Side::Buy, dec!(9.99), dec!(300))),
        ("Buy-2", Order::new(Side::Buy, dec!(10.00), dec!(200))),
        ("Sell-1", Order::new(Side::Sell, dec!(10.01), dec!(300))),
        ("Sell-2", Order::new(Side::Sell, dec!(10.00), dec!(100))),
        ("Sell-3", Order::new(Side::Sell, dec!(9.99), dec!(200))),
        ("Sell-4", Order::new(Side::Sell, dec!(10.00), dec!(200))),
        ("Buy-3", Order::new(Side::Buy, dec!(10.00), dec!(300))),
        ("Sell-5", Order::new(Side::Sell, dec!(10.01), dec!(500))),
        ("Buy-4", Order::new(Side::Buy, dec!(10.01), dec!(200))),
        ("Buy-5", Order::new(Side::Buy, dec!(10.01), dec!(300))),
    ];

    let labels: HashMap<Uuid, &str> = orders.iter().map(|(name, o)| (o.id, *name)).collect();
    let label = |id: Uuid| labels.get(&id).copied().unwrap_or("?");

    for (name, order) in orders {
        let side = match order.side {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        };
        println!(
            "--- Processing {side} {name} (price: {}, qty: {}) ---",
            order.price, order.quantity
        );

        match engine.submit(order) {
            Ok(executions) if executions.is_empty() => println!("  No executions"),
            Ok(executions) => {
                println!("  Executions:");
                for execution in &executions {
                    println!(
                        "  - ExecID: {}, Price: {}, Qty: {}",
                        execution.id, execution.price, execution.quantity
                    );
                    println!(
                        "    (Buy: {}, Sell: {})",
                        label(execution.buy_order_id),
                        label(execution.sell_order_id)
                    );
                }
            }
            Err(error) => println!("  Rejected: {error}"),
        }

        let bid = engine
            .best_bid()
            .map(|o| format!("{} ({}) @ {}", label(o.id), o.remaining_quantity, o.price))
            .unwrap_or_else(|| "[]".to_string());
        let ask = engine
            .best_ask()
            .map(|o| format!("{} ({}) @ {}", label(o.id), o.remaining_quantity, o.price))
            .unwrap_or_else(|| "[]".to_string());
        println!("  Best Buy:  {bid}");
        println!("  Best Sell: {ask}\n");
    }
}
