use std::sync::Arc;

use validator::Validate;

use crate::database::{DocumentStore, StoreError};
use crate::post::post_model::{Post, PostOut};
use crate::utils::error::CustomError;

pub struct PostService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

fn post_not_found() -> CustomError {
    CustomError::NotFoundError("Post not found".into())
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        PostService {
            store,
            collection: collection.into(),
        }
    }

    /// Inserts the submitted fields and answers with the document as stored.
    pub async fn create_post(&self, post: Post) -> Result<PostOut, CustomError> {
        post.validate()?;

        let fields = post.to_fields()?;
        let id = self.store.add(&self.collection, fields).await?;
        log::info!("created post {}", id);

        // A freshly issued id must be readable
        match self.get_post(&id).await {
            Err(CustomError::NotFoundError(_)) => Err(CustomError::InternalServerError(format!(
                "post {} missing right after insert",
                id
            ))),
            result => result,
        }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostOut>, CustomError> {
        let documents = self.store.stream_all(&self.collection).await?;

        let posts = documents
            .into_iter()
            .map(|(id, fields)| PostOut::from_document(id, fields))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<PostOut, CustomError> {
        let fields = self
            .store
            .get(&self.collection, id)
            .await?
            .ok_or_else(post_not_found)?;

        Ok(PostOut::from_document(id.to_string(), fields)?)
    }

    /// Merges the sent fields over the stored document, then re-reads it.
    /// Optional fields left out of `post` keep their stored values.
    pub async fn update_post(&self, id: &str, post: Post) -> Result<PostOut, CustomError> {
        post.validate()?;

        self.ensure_exists(id).await?;

        let fields = post.to_fields()?;
        match self.store.merge_update(&self.collection, id, fields).await {
            Ok(()) => {}
            // Deleted between the existence check and the merge
            Err(StoreError::MissingDocument(_)) => return Err(post_not_found()),
            Err(e) => return Err(e.into()),
        }
        log::info!("updated post {}", id);

        self.get_post(id).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), CustomError> {
        self.ensure_exists(id).await?;

        self.store.delete(&self.collection, id).await?;
        log::info!("deleted post {}", id);

        Ok(())
    }

    async fn ensure_exists(&self, id: &str) -> Result<(), CustomError> {
        match self.store.get(&self.collection, id).await? {
            Some(_) => Ok(()),
            None => Err(post_not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::post::post_model::DEFAULT_AUTHOR;
    use async_trait::async_trait;
    use mongodb::bson::{Document, doc};

    fn service() -> PostService {
        PostService::new(Arc::new(InMemoryStore::new()), "posts")
    }

    fn post(title: &str, content: &str) -> Post {
        Post {
            title: title.into(),
            content: content.into(),
            author: None,
            created_at: None,
        }
    }

    #[actix_web::test]
    async fn create_then_get_returns_submitted_fields() {
        let service = service();
        let created = service.create_post(post("Hello", "World")).await.unwrap();

        assert_eq!(created.title, "Hello");
        assert_eq!(created.content, "World");
        assert_eq!(created.author, DEFAULT_AUTHOR);
        assert_eq!(created.created_at, None);

        let fetched = service.get_post(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn invalid_post_never_reaches_store() {
        let service = service();
        let result = service.create_post(post("", "World")).await;

        assert!(matches!(result, Err(CustomError::ValidationError(_))));
        assert!(service.list_posts().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn get_unknown_id_is_not_found() {
        let result = service().get_post("never-issued").await;
        assert!(matches!(result, Err(CustomError::NotFoundError(_))));
    }

    #[actix_web::test]
    async fn partial_update_is_idempotent_and_keeps_other_fields() {
        let service = service();
        let mut first = post("Hello", "World");
        first.author = Some("kim".into());
        first.created_at = Some("2024-01-01".into());
        let created = service.create_post(first).await.unwrap();

        let once = service
            .update_post(&created.id, post("Renamed", "World"))
            .await
            .unwrap();
        let twice = service
            .update_post(&created.id, post("Renamed", "World"))
            .await
            .unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.title, "Renamed");
        assert_eq!(twice.content, "World");
        assert_eq!(twice.author, "kim");
        assert_eq!(twice.created_at.as_deref(), Some("2024-01-01"));
    }

    #[actix_web::test]
    async fn update_without_required_fields_is_rejected() {
        let service = service();
        let created = service.create_post(post("Hello", "World")).await.unwrap();

        let mut body = post("", "");
        body.author = Some("kim".into());
        let result = service.update_post(&created.id, body).await;
        assert!(matches!(result, Err(CustomError::ValidationError(_))));

        let stored = service.get_post(&created.id).await.unwrap();
        assert_eq!(stored.author, DEFAULT_AUTHOR);
    }

    #[actix_web::test]
    async fn update_unknown_id_is_not_found() {
        let result = service()
            .update_post("missing", post("Hello", "World"))
            .await;
        assert!(matches!(result, Err(CustomError::NotFoundError(_))));
    }

    /// Finds every document but loses it before anything else can touch it.
    struct VanishingStore;

    #[async_trait]
    impl DocumentStore for VanishingStore {
        async fn add(&self, _: &str, _: Document) -> Result<String, StoreError> {
            Ok("fresh".into())
        }

        async fn stream_all(&self, _: &str) -> Result<Vec<(String, Document)>, StoreError> {
            Ok(Vec::new())
        }

        async fn get(&self, _: &str, id: &str) -> Result<Option<Document>, StoreError> {
            // Existence checks see the document, the post-insert read does not
            if id == "fresh" {
                return Ok(None);
            }
            Ok(Some(doc! { "title": "Hello", "content": "World" }))
        }

        async fn merge_update(&self, _: &str, id: &str, _: Document) -> Result<(), StoreError> {
            Err(StoreError::MissingDocument(id.to_string()))
        }

        async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn update_racing_a_delete_is_not_found() {
        let service = PostService::new(Arc::new(VanishingStore), "posts");
        let result = service.update_post("gone", post("Hello", "World")).await;
        assert!(matches!(result, Err(CustomError::NotFoundError(_))));
    }

    #[actix_web::test]
    async fn create_losing_its_document_is_internal_error() {
        let service = PostService::new(Arc::new(VanishingStore), "posts");
        let result = service.create_post(post("Hello", "World")).await;
        assert!(matches!(result, Err(CustomError::InternalServerError(_))));
    }

    #[actix_web::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create_post(post("Hello", "World")).await.unwrap();

        service.delete_post(&created.id).await.unwrap();

        assert!(matches!(
            service.get_post(&created.id).await,
            Err(CustomError::NotFoundError(_))
        ));
        assert!(matches!(
            service.delete_post(&created.id).await,
            Err(CustomError::NotFoundError(_))
        ));
    }

    #[actix_web::test]
    async fn list_returns_every_post_with_unique_ids() {
        let service = service();
        for i in 0..3 {
            service
                .create_post(post(&format!("title {i}"), "body"))
                .await
                .unwrap();
        }

        let posts = service.list_posts().await.unwrap();
        let mut ids: Vec<_> = posts.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
