//! JSON document persistence.

use mongodb::bson::{self, Bson};
use mongodb::{Client, Collection};

use crate::config::Config;
use crate::error::ApiError;

/// Stores arbitrary JSON objects in a MongoDB collection.
#[derive(Clone)]
pub struct JsonStore {
    collection: Collection<bson::Document>,
}

impl JsonStore {
    /// Connect to the configured database and collection.
    pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let collection = client
            .database(&config.mongo_database)
            .collection(&config.mongo_collection);

        log::info!(
            "Connected to MongoDB, collection {}.{}",
            config.mongo_database,
            config.mongo_collection
        );
        Ok(Self { collection })
    }

    /// Insert a JSON value and return the generated identifier.
    ///
    /// Non-object values fail BSON conversion and surface as an unexpected
    /// error, like the driver-level failure they are.
    pub async fn insert(&self, value: serde_json::Value) -> Result<String, ApiError> {
        let doc = bson::to_document(&value).map_err(|e| ApiError::Unexpected(e.to_string()))?;
        let result = self.collection.insert_one(doc).await?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(id)
    }
}
