// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(handlers::health_check))
        .route("/", web::get().to(handlers::health_check))
        // Conversion-tracked outbound links (WhatsApp, directions, phone)
        .route(
            "/outbound/{kind}",
            web::get().to(handlers::outbound_redirect),
        )
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Catalog views
                .route("/catalog", web::get().to(handlers::list_catalog))
                .route("/catalog/search", web::get().to(handlers::search_catalog))
                // Category browsing
                .route("/category/tag/{tag}", web::get().to(handlers::tag_listing))
                .route(
                    "/category/{name}",
                    web::get().to(handlers::category_listing),
                )
                // Curated home sections
                .route(
                    "/sections/{section}",
                    web::get().to(handlers::section_listing),
                )
                // Feed control
                .route("/refresh", web::post().to(handlers::refresh_feed)),
        );
}
