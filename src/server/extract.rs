// Request extractors that report failures in the API's error shape
// Author: kelexine (https://github.com/kelexine)

use crate::error::ApiError;
use crate::models::{RecipeFields, RecipeId};
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::{Form, Json};
use serde_json::Number;

/// Write payload for create and update.
///
/// Accepts `application/x-www-form-urlencoded` as well as JSON. Any other
/// content type goes through the JSON path, whose rejections become
/// `400 {"error": ...}` instead of axum's plain-text 4xx responses.
#[derive(Debug)]
pub struct RecipeBody(pub RecipeFields);

#[async_trait]
impl<S> FromRequest<S> for RecipeBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            return Ok(Self(fields_from_form(pairs)?));
        }

        let Json(fields) = Json::<RecipeFields>::from_request(req, state).await?;
        Ok(Self(fields))
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}

/// Build recipe fields from decoded form pairs.
///
/// `ingredients` (or `ingredients[]`) may repeat and accumulates in order.
/// For the other keys the last occurrence wins; unknown keys are ignored.
fn fields_from_form(pairs: Vec<(String, String)>) -> Result<RecipeFields, ApiError> {
    let mut fields = RecipeFields::default();

    for (key, value) in pairs {
        match key.as_str() {
            "title" => fields.title = Some(value),
            "instructions" => fields.instructions = Some(value),
            "ingredients" | "ingredients[]" => {
                fields.ingredients.get_or_insert_with(Vec::new).push(value)
            }
            "difficulty" => fields.difficulty = form_number(&key, &value)?,
            "time" => fields.time = form_number(&key, &value)?,
            _ => {}
        }
    }

    Ok(fields)
}

// Empty means absent; anything else must read as an integer or a finite float.
fn form_number(key: &str, value: &str) -> Result<Option<Number>, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = value.parse::<i64>() {
        return Ok(Some(Number::from(n)));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Some)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Cast to Number failed for value \"{}\" at path \"{}\"",
                value, key
            ))
        })
}

/// The `:id` path segment, parsed as a [`RecipeId`].
///
/// A malformed id is rejected with 400 before any handler runs, so handlers
/// only ever see well-formed ids.
#[derive(Debug, Clone, Copy)]
pub struct RecipeIdPath(pub RecipeId);

#[async_trait]
impl<S> FromRequestParts<S> for RecipeIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(raw.parse()?))
    }
}
