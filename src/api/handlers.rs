// HTTP request handlers for API endpoints

use actix_web::{web, HttpResponse, Result};

use crate::api::models::*;
use crate::api::AppContext;
use crate::catalog::select;
use crate::tracker::OutboundKind;

/// Health check endpoint
pub async fn health_check(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let snapshot = ctx.state.snapshot();
    let response = ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        products: snapshot.products.len(),
        generation: snapshot.generation,
        fetched_at: snapshot.fetched_at,
    });
    Ok(HttpResponse::Ok().json(response))
}

/// Full normalized catalog
pub async fn list_catalog(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let snapshot = ctx.state.snapshot();
    let response = ApiResponse::success(views(snapshot.products.clone()));
    Ok(HttpResponse::Ok().json(response))
}

/// Case-insensitive substring search over name + category
pub async fn search_catalog(
    query: web::Query<SearchQuery>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let snapshot = ctx.state.snapshot();
    let hits = select::search_text(&snapshot.products, &query.q);

    tracing::debug!(q = %query.q, hits = hits.len(), "catalog search");

    let response = ApiResponse::success(views(hits));
    Ok(HttpResponse::Ok().json(response))
}

/// Category listing (alias redirects, then symmetric substring match).
/// An empty result is success with an empty list; the "no items" placeholder
/// is the UI's concern.
pub async fn category_listing(
    path: web::Path<String>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    let snapshot = ctx.state.snapshot();
    let hits = select::select_category(&snapshot.products, &ctx.aliases, &name);

    tracing::debug!(category = %name, hits = hits.len(), "category listing");

    let response = ApiResponse::success(views(hits));
    Ok(HttpResponse::Ok().json(response))
}

/// Promotional tag listing keyed by normalized path segment
pub async fn tag_listing(
    path: web::Path<String>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let segment = path.into_inner();
    let snapshot = ctx.state.snapshot();
    let hits = select::select_tag(&snapshot.products, &segment);

    tracing::debug!(tag = %segment, hits = hits.len(), "tag listing");

    let response = ApiResponse::success(views(hits));
    Ok(HttpResponse::Ok().json(response))
}

/// Curated home sections: new-arrivals, favourites, trending
pub async fn section_listing(
    path: web::Path<String>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let Some(section) = select::Section::from_slug(&slug) else {
        let response = ApiResponse::<()>::error(format!("unknown section: {slug}"));
        return Ok(HttpResponse::NotFound().json(response));
    };

    let snapshot = ctx.state.snapshot();
    let hits = select::select_section(&snapshot.products, section);
    let response = ApiResponse::success(views(hits));
    Ok(HttpResponse::Ok().json(response))
}

/// Re-fetch the feed. A failed fetch keeps the previous snapshot in place and
/// reports the error in the envelope; the catalog itself is never broken by
/// an unreachable feed.
pub async fn refresh_feed(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match crate::refresh_catalog(
        &ctx.state,
        &ctx.feed,
        &ctx.schema,
        &ctx.options,
        ctx.mirror.as_ref(),
    )
    .await
    {
        Ok(snapshot) => {
            let response = ApiResponse::success(RefreshResponse {
                generation: snapshot.generation,
                products: snapshot.products.len(),
                fetched_at: snapshot.fetched_at,
            });
            Ok(HttpResponse::Accepted().json(response))
        }
        Err(err) => {
            tracing::warn!(error = %err, "feed refresh failed; keeping current snapshot");
            let response = ApiResponse::<()>::error(format!("feed unreachable: {err}"));
            Ok(HttpResponse::Ok().json(response))
        }
    }
}

/// Fire conversion tracking, then redirect to the external link. The tracker
/// is best-effort by contract; the redirect goes out regardless.
pub async fn outbound_redirect(
    path: web::Path<String>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let Some(kind) = OutboundKind::from_slug(&slug) else {
        let response = ApiResponse::<()>::error(format!("unknown outbound link: {slug}"));
        return Ok(HttpResponse::NotFound().json(response));
    };

    ctx.tracker.track(kind).await;

    let target = kind.target_url();
    tracing::info!(kind = kind.slug(), "outbound redirect");
    Ok(HttpResponse::TemporaryRedirect()
        .insert_header(("Location", target))
        .finish())
}
