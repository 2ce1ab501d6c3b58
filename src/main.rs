use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use boutique_catalog::api::server::ApiServer;
use boutique_catalog::api::AppContext;
use boutique_catalog::catalog::normalize::NormalizeOptions;
use boutique_catalog::catalog::select::CategoryAliases;
use boutique_catalog::feed::schema::FeedSchema;
use boutique_catalog::feed::FeedConfig;
use boutique_catalog::refresh_catalog;
use boutique_catalog::state::CatalogState;
use boutique_catalog::store::CacheMirror;
use boutique_catalog::tracker::{ConversionTracker, GoogleAdsTracker, NoopTracker};
use boutique_catalog::util::env;

#[tokio::main]
async fn main() -> Result<()> {
    // --- env + logging -------------------------------------------------------
    env::init_env();
    boutique_catalog::tracing::init_tracing("info")?;

    let feed = FeedConfig::from_env();
    let schema = FeedSchema::with_defaults();
    let options = NormalizeOptions::from_env();
    let state = Arc::new(CatalogState::new());
    let mirror = CacheMirror::from_env();

    let tracker: Arc<dyn ConversionTracker> = match GoogleAdsTracker::from_env() {
        Some(t) => Arc::new(t),
        None => {
            info!("no conversion endpoint configured; tracking disabled");
            Arc::new(NoopTracker)
        }
    };

    // --- initial load --------------------------------------------------------
    // Best effort: an unreachable feed at boot just means an empty catalog
    // until the next refresh succeeds.
    match refresh_catalog(&state, &feed, &schema, &options, mirror.as_ref()).await {
        Ok(snapshot) => info!(products = snapshot.products.len(), "initial catalog loaded"),
        Err(err) => warn!(error = %err, "initial feed load failed; serving empty catalog"),
    }

    // --- background refresh --------------------------------------------------
    let refresh_secs: u64 = env::env_parse("FEED_REFRESH_SECS", 300u64);
    if refresh_secs > 0 {
        let state = Arc::clone(&state);
        let feed = feed.clone();
        let schema = schema.clone();
        let bg_mirror = CacheMirror::from_env();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs));
            ticker.tick().await; // first tick fires immediately; skip it
            loop {
                ticker.tick().await;
                if let Err(err) =
                    refresh_catalog(&state, &feed, &schema, &options, bg_mirror.as_ref()).await
                {
                    warn!(error = %err, "scheduled feed refresh failed");
                }
            }
        });
    }

    // --- serve ---------------------------------------------------------------
    let server = ApiServer::from_env()?;
    let ctx = AppContext {
        state,
        feed,
        schema,
        options,
        aliases: CategoryAliases::with_defaults(),
        mirror,
        tracker,
    };
    server.run(ctx).await
}
