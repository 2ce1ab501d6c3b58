// HTTP API for the storefront catalog

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::catalog::normalize::NormalizeOptions;
use crate::catalog::select::CategoryAliases;
use crate::feed::schema::FeedSchema;
use crate::feed::FeedConfig;
use crate::state::CatalogState;
use crate::store::CacheMirror;
use crate::tracker::ConversionTracker;

/// Everything the handlers need, shared across workers via `web::Data`.
pub struct AppContext {
    pub state: Arc<CatalogState>,
    pub feed: FeedConfig,
    pub schema: FeedSchema,
    pub options: NormalizeOptions,
    pub aliases: CategoryAliases,
    pub mirror: Option<CacheMirror>,
    pub tracker: Arc<dyn ConversionTracker>,
}
