use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde_json::Value;
use std::time::Duration;

use super::UserStore;
use crate::config::Settings;
use crate::models::{UserDocument, STORE_ID_FIELD, USER_ID_FIELD};
use crate::utils::AppError;

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    users_collection: String,
}

impl MongoDB {
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(settings.connection_uri()).await?;

        client_options.app_name = Some("user-service".to_string());
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&settings.db_name);

        let mongodb = Self {
            db,
            users_collection: settings.users_collection.clone(),
        };

        // Test connection
        mongodb.ping().await?;

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique index on the application `id`; makes inserts conditional at the store.
    /// Fails when the collection already holds duplicate ids.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users().create_index(id_index).await.map_err(|e| {
            log::error!(
                "❌ Could not create unique index on {}.{}: {}",
                self.users_collection,
                USER_ID_FIELD,
                e
            );
            AppError::DatabaseError(format!(
                "unique index on '{}' unavailable: {}",
                USER_ID_FIELD, e
            ))
        })?;

        log::info!("   ✅ Index ready: {}({}) unique", self.users_collection, USER_ID_FIELD);
        Ok(())
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection(&self.users_collection)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn to_bson(doc: &UserDocument) -> Result<Document, AppError> {
    let mut document = mongodb::bson::to_document(doc)?;
    document.remove(STORE_ID_FIELD);
    Ok(document)
}

fn from_bson(document: Document) -> UserDocument {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => UserDocument::new(),
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<UserDocument>, AppError> {
        let cursor = self
            .users()
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(from_bson).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
        let found = self
            .users()
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 0 })
            .await?;

        Ok(found.map(from_bson))
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError> {
        let found = self
            .users()
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 1 })
            .await?;

        Ok(found.is_some())
    }

    async fn insert_if_absent(&self, _user_id: &str, doc: UserDocument) -> Result<bool, AppError> {
        // Store-assigned `_id`; the unique index on `id` rejects the loser of a race.
        let document = to_bson(&doc)?;

        match self.users().insert_one(document).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_fields(&self, id: &str, fields: UserDocument) -> Result<bool, AppError> {
        let update = to_bson(&fields)?;

        let result = self
            .users()
            .update_one(doc! { "id": id }, doc! { "$set": update })
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn remove(&self, id: &str) -> Result<bool, AppError> {
        let result = self.users().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bson_conversion_drops_store_id() {
        let user = json!({"_id": "x", "id": "u1", "address": {"city": "Dekalb"}})
            .as_object()
            .cloned()
            .unwrap();

        let document = to_bson(&user).unwrap();
        assert!(!document.contains_key(STORE_ID_FIELD));

        let back = from_bson(document);
        assert_eq!(Value::Object(back), json!({"id": "u1", "address": {"city": "Dekalb"}}));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_round_trip() {
        dotenv::dotenv().ok();

        let mut settings = Settings::from_env().unwrap();
        settings.users_collection = "users_it".to_string();
        let db = MongoDB::new(&settings).await.unwrap();
        db.remove("it-1").await.unwrap();

        let user = json!({"id": "it-1", "name": "A"}).as_object().cloned().unwrap();
        assert!(db.insert_if_absent("it-1", user.clone()).await.unwrap());
        assert!(!db.insert_if_absent("it-1", user.clone()).await.unwrap());
        assert_eq!(db.find_by_id("it-1").await.unwrap(), Some(user));
        assert!(db.remove("it-1").await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_startup_fails_on_duplicate_ids() {
        dotenv::dotenv().ok();

        let mut settings = Settings::from_env().unwrap();
        settings.users_collection = "users_it_dupes".to_string();

        let client = Client::with_uri_str(settings.connection_uri()).await.unwrap();
        let raw = client
            .database(&settings.db_name)
            .collection::<Document>(&settings.users_collection);
        raw.drop().await.unwrap();
        raw.insert_many(vec![doc! { "id": "dup" }, doc! { "id": "dup" }])
            .await
            .unwrap();

        let err = MongoDB::new(&settings).await.err().unwrap();
        assert!(matches!(err, AppError::DatabaseError(_)));

        raw.drop().await.unwrap();
    }
}
