use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::{Client, Collection, Database, options::ClientOptions};

use super::store::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn init(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some("posts_api".to_string());

        let client = Client::with_options(client_options)?;

        // Fail at startup rather than on the first request
        client.database("admin").run_command(doc! {"ping": 1}).await?;

        log::info!("Connected successfully to MongoDB database {}", database);

        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

/// Matches `_id` stored either as an ObjectId or as a plain string.
fn id_filter(id: &str) -> Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": { "$in": [oid, id] } },
        Err(_) => doc! { "_id": id },
    }
}

/// Documents whose `_id` cannot be addressed by a string id are left out.
fn split_id(mut document: Document) -> Option<(String, Document)> {
    match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => Some((oid.to_hex(), document)),
        Some(Bson::String(id)) => Some((id, document)),
        Some(other) => {
            log::warn!("skipping document with unaddressable _id {}", other);
            None
        }
        None => None,
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn add(&self, collection: &str, fields: Document) -> Result<String, StoreError> {
        let result = self.collection(collection).insert_one(fields).await?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Decode("inserted id is not an ObjectId".into()))
    }

    async fn stream_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().filter_map(split_id).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let found = self.collection(collection).find_one(id_filter(id)).await?;

        Ok(found.map(|mut document| {
            document.remove("_id");
            document
        }))
    }

    async fn merge_update(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        // `$set` rejects an empty document
        if fields.is_empty() {
            return Ok(());
        }

        let result = self
            .collection(collection)
            .update_one(id_filter(id), doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::MissingDocument(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.collection(collection).delete_one(id_filter(id)).await?;

        Ok(())
    }
}
