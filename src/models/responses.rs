// Response bodies for the recipe endpoints
// Author: kelexine (https://github.com/kelexine)

use super::recipe::RecipeId;
use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "Post saved successfully!";
pub const UPDATED_MESSAGE: &str = "Thing updated successfully!";
pub const DELETED_MESSAGE: &str = "Deleted!";

/// `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn updated() -> Self {
        Self::new(UPDATED_MESSAGE)
    }

    pub fn deleted() -> Self {
        Self::new(DELETED_MESSAGE)
    }
}

/// Returned by create; carries the id so callers can address the new record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: RecipeId,
}

impl CreatedResponse {
    pub fn new(id: RecipeId) -> Self {
        Self {
            message: CREATED_MESSAGE.to_string(),
            id,
        }
    }
}
