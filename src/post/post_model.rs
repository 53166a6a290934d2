use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::StoreError;

pub const DEFAULT_AUTHOR: &str = "anonymous";

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

/// Create and update request body. Missing title/content deserialize empty so validation names them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Post {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostOut {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Post {
    /// Only the fields the caller actually sent.
    pub fn to_fields(&self) -> Result<Document, StoreError> {
        bson::to_document(self).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

impl PostOut {
    pub fn from_document(id: String, mut fields: Document) -> Result<Self, StoreError> {
        fields.insert("id", id);
        bson::from_document(fields).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
