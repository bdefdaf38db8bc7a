// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    create_recipe, delete_recipe, get_recipe, health_handler, list_recipes, not_found_handler,
    preflight_handler, update_recipe,
};
use super::middleware::{cors_headers, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::SharedStore;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: SharedStore,
}

/// Build the request-handling service.
///
/// The caller owns the store handle and is responsible for closing it once
/// the server has stopped.
pub fn create_router(config: AppConfig, store: SharedStore) -> Result<Router> {
    let body_limit = config.server.body_limit_bytes;
    let state = AppState {
        config: Arc::new(config),
        store,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    // The collection answers with or without a trailing slash.
    let collection = get(list_recipes)
        .post(create_recipe)
        .options(preflight_handler);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/recipes", collection.clone())
        .route("/api/recipes/", collection)
        .route(
            "/api/recipes/:id",
            get(get_recipe)
                .put(update_recipe)
                .delete(delete_recipe)
                .options(preflight_handler),
        )
        .fallback(not_found_handler)
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .layer(middleware::from_fn(cors_headers))
        .with_state(state);

    Ok(app)
}
