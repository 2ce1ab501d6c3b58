// Admin CLI plumbing: one-shot feed loads and plain-text listings.

use anyhow::Result;

use crate::catalog::normalize::{normalize_rows, NormalizeOptions};
use crate::catalog::Product;
use crate::feed::schema::FeedSchema;
use crate::feed::{fetch_feed, parse_rows, FeedConfig};

/// Fetch and normalize the feed once, with env-driven config.
pub async fn load_products() -> Result<Vec<Product>> {
    let config = FeedConfig::from_env();
    let schema = FeedSchema::with_defaults();
    let options = NormalizeOptions::from_env();

    let body = fetch_feed(&config).await?;
    let rows = parse_rows(&body)?;
    let products = normalize_rows(&rows, &schema, &options);

    tracing::info!(rows = rows.len(), products = products.len(), "feed loaded");
    Ok(products)
}

/// Print a terminal listing of the given products.
pub fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("(no items)");
        return;
    }

    println!(
        "{:<32} {:<24} {:>8} {:>6} {:<6} {}",
        "NAME", "CATEGORY", "PRICE", "OFF%", "STOCK", "TAG"
    );
    for p in products {
        let off = if p.has_discount() {
            format!("{}%", p.discount_percent())
        } else {
            "-".to_string()
        };
        println!(
            "{:<32} {:<24} {:>8} {:>6} {:<6} {}",
            truncate(&p.name, 32),
            truncate(&p.category, 24),
            p.price,
            off,
            if p.in_stock { "in" } else { "out" },
            p.tag.as_deref().unwrap_or("-"),
        );
    }
    println!("\n{} item(s)", products.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
