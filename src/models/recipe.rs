// Recipe document and write payload
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// System-assigned identifier of a recipe document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when a path segment cannot be read as a recipe id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cast to id failed for value \"{value}\": {reason}")]
pub struct InvalidRecipeId {
    pub value: String,
    pub reason: String,
}

impl FromStr for RecipeId {
    type Err = InvalidRecipeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| InvalidRecipeId {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// The writable fields of a recipe.
///
/// Every field is optional: the API enforces schema typing only, so a body
/// missing `title` is stored with `title: null` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeFields {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub ingredients: Option<Vec<String>>,

    #[serde(default)]
    pub instructions: Option<String>,

    /// Numeric difficulty level; any JSON number, fractions included
    #[serde(default)]
    pub difficulty: Option<Number>,

    /// Preparation time, e.g. `2.5` for two and a half minutes
    #[serde(default)]
    pub time: Option<Number>,
}

/// A stored recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    #[serde(flatten)]
    pub fields: RecipeFields,
}

impl Recipe {
    pub fn new(id: RecipeId, fields: RecipeFields) -> Self {
        Self { id, fields }
    }
}
