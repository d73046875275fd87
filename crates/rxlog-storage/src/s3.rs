use aws_sdk_s3::Client;
use rxlog_core::keys::{self, Collection};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::documents;
use crate::error::StorageError;
use crate::objects;
use crate::store::{Document, DocumentStore};

/// Documents stored as one JSON object per record in an S3 bucket, laid out
/// by [`rxlog_core::keys`].
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Fetch and decode each listed key that belongs to `collection`.
///
/// Objects that disappear between listing and fetching are skipped.
async fn fetch_listed<F, Fut>(
    collection: Collection,
    object_keys: &[String],
    mut fetch: F,
) -> Result<Vec<Document>, StorageError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, StorageError>>,
{
    let mut docs = Vec::with_capacity(object_keys.len());
    for key in object_keys {
        let Some(id) = keys::document_id(collection, key) else {
            debug!(key = %key, "skipping object outside the document layout");
            continue;
        };
        let bytes = match fetch(key.clone()).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound { .. }) => {
                debug!(key = %key, "object deleted since listing; skipping");
                continue;
            }
            Err(e) => return Err(e),
        };
        // Unparseable bodies still reach the schema check so they are
        // rejected and reported alongside other malformed documents.
        let body = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "document body is not valid JSON");
            Value::Null
        });
        docs.push(Document {
            id: id.to_string(),
            body,
        });
    }

    Ok(docs)
}

impl DocumentStore for S3Store {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StorageError> {
        let object_keys =
            objects::list_keys(&self.client, &self.bucket, collection.prefix()).await?;
        fetch_listed(collection, &object_keys, |key| async move {
            let output = objects::get_object(&self.client, &self.bucket, &key).await?;
            Ok(output.body)
        })
        .await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StorageError> {
        let key = keys::document(collection, id);
        let (body, _etag) = documents::load_document(&self.client, &self.bucket, &key).await?;
        Ok(Document {
            id: id.to_string(),
            body,
        })
    }

    async fn put(&self, collection: Collection, id: &str, body: Value) -> Result<(), StorageError> {
        let key = keys::document(collection, id);
        documents::save_document(&self.client, &self.bucket, &key, &body).await?;
        Ok(())
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StorageError> {
        let key = keys::document(collection, id);
        let (mut body, etag) = documents::load_document(&self.client, &self.bucket, &key).await?;
        let existing = body
            .as_object_mut()
            .ok_or_else(|| StorageError::NotAnObject { key: key.clone() })?;
        existing.extend(fields);

        documents::save_document_if_match(&self.client, &self.bucket, &key, &body, &etag).await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        let key = keys::document(collection, id);
        objects::delete_object(&self.client, &self.bucket, &key).await
    }
}
