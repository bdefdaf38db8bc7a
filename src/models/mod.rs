//! Data models for the recipe API.
//!
//! - `recipe`: the stored document, its identifier and the writable field set
//! - `responses`: JSON bodies returned by the HTTP handlers

// Author: kelexine (https://github.com/kelexine)

pub mod recipe;
pub mod responses;

pub use recipe::{InvalidRecipeId, Recipe, RecipeFields, RecipeId};
pub use responses::{CreatedResponse, MessageResponse};
