use async_trait::async_trait;
use mongodb::bson::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("could not decode stored document: {0}")]
    Decode(String),

    #[error("document {0} does not exist")]
    MissingDocument(String),
}

/// Operations the post handler needs from a document database.
///
/// Identifiers are assigned by the store on `add` and are opaque strings to callers.
/// Documents handed back never carry the identifier inside their fields.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn add(&self, collection: &str, fields: Document) -> Result<String, StoreError>;

    async fn stream_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrites only the keys present in `fields`; other stored keys are kept.
    async fn merge_update(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
