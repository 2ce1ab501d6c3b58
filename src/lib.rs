pub mod api;
pub mod catalog;
pub mod cli;
pub mod feed;
pub mod state;
pub mod store;
pub mod tracing;
pub mod tracker;

pub mod util {
    pub mod env;
}

use anyhow::Result;
use std::sync::Arc;

use crate::catalog::normalize::{normalize_rows, NormalizeOptions};
use crate::feed::schema::FeedSchema;
use crate::feed::{fetch_feed, parse_rows, FeedConfig};
use crate::state::{CatalogSnapshot, CatalogState};
use crate::store::CacheMirror;

/// One full ingest pass: fetch the published feed, normalize it and install
/// the resulting snapshot (unless a fresher one landed in the meantime).
///
/// A network or parse failure leaves the previously installed snapshot in
/// place. Rows that fail normalization are dropped silently.
pub async fn refresh_catalog(
    state: &CatalogState,
    config: &FeedConfig,
    schema: &FeedSchema,
    options: &NormalizeOptions,
    mirror: Option<&CacheMirror>,
) -> Result<Arc<CatalogSnapshot>> {
    let generation = state.begin_refresh();

    let body = fetch_feed(config).await?;
    let rows = parse_rows(&body)?;
    let products = normalize_rows(&rows, schema, options);

    ::tracing::info!(
        generation,
        rows = rows.len(),
        products = products.len(),
        "feed refresh complete"
    );

    let snapshot = state.install(generation, products);

    // Write-through mirror of the last successful fetch. Nothing reads this
    // back; a write failure must not disturb the refresh.
    if let Some(mirror) = mirror {
        if let Err(err) = mirror.write_products(&snapshot.products) {
            ::tracing::warn!(error = %err, "cache mirror write failed");
        }
    }

    Ok(snapshot)
}
