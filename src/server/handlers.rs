// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::extract::{RecipeBody, RecipeIdPath};
use super::routes::AppState;
use crate::error::{ApiError, Result, StoreError};
use crate::models::{CreatedResponse, MessageResponse, Recipe};
use crate::store::WriteOutcome;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Always 200; the body carries the overall status and per-check detail.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    let (overall_status, store_check) = match state.store.ping().await {
        Ok(()) => (
            HealthStatus::Healthy,
            HealthCheck {
                status: "ok".to_string(),
                message: "Document store reachable".to_string(),
            },
        ),
        Err(e) => (
            HealthStatus::Unhealthy,
            HealthCheck {
                status: "error".to_string(),
                message: e.to_string(),
            },
        ),
    };
    checks.insert("document_store".to_string(), store_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    RecipeBody(fields): RecipeBody,
) -> Result<impl IntoResponse> {
    let recipe = state.store.insert(fields).await.map_err(|e| {
        error!("Failed to save recipe: {}", e);
        ApiError::from_store_flat(e)
    })?;

    info!("Created recipe {}", recipe.id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(recipe.id))))
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    RecipeIdPath(id): RecipeIdPath,
) -> Result<Json<Recipe>> {
    let recipe = state.store.find_by_id(id).await.map_err(|e| {
        match &e {
            StoreError::NotFound(_) => debug!("Recipe {} not found", id),
            _ => error!("Failed to fetch recipe {}: {}", id, e),
        }
        ApiError::from_store_lookup(e)
    })?;

    Ok(Json(recipe))
}

/// GET /api/recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    let recipes = state.store.find_all().await.map_err(|e| {
        error!("Failed to list recipes: {}", e);
        ApiError::from_store_flat(e)
    })?;

    debug!("Listing {} recipes", recipes.len());
    Ok(Json(recipes))
}

/// PUT /api/recipes/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    RecipeIdPath(id): RecipeIdPath,
    RecipeBody(fields): RecipeBody,
) -> Result<impl IntoResponse> {
    let outcome = state.store.update_by_id(id, fields).await.map_err(|e| {
        error!("Failed to update recipe {}: {}", id, e);
        ApiError::from_store_flat(e)
    })?;

    match outcome {
        WriteOutcome::Matched => info!("Updated recipe {}", id),
        WriteOutcome::NoMatch if state.config.api.strict_writes => {
            return Err(ApiError::NotFound(StoreError::NotFound(id).to_string()));
        }
        WriteOutcome::NoMatch => warn!("Update matched no recipe with id {}", id),
    }

    Ok((StatusCode::CREATED, Json(MessageResponse::updated())))
}

/// DELETE /api/recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    RecipeIdPath(id): RecipeIdPath,
) -> Result<Json<MessageResponse>> {
    let outcome = state.store.delete_by_id(id).await.map_err(|e| {
        error!("Failed to delete recipe {}: {}", id, e);
        ApiError::from_store_flat(e)
    })?;

    match outcome {
        WriteOutcome::Matched => info!("Deleted recipe {}", id),
        WriteOutcome::NoMatch if state.config.api.strict_writes => {
            return Err(ApiError::NotFound(StoreError::NotFound(id).to_string()));
        }
        WriteOutcome::NoMatch => warn!("Delete matched no recipe with id {}", id),
    }

    Ok(Json(MessageResponse::deleted()))
}

/// CORS preflight; the headers themselves come from the middleware
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
