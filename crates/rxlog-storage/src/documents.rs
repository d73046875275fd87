//! JSON document load/save on top of [`crate::objects`].

use aws_sdk_s3::Client;
use serde_json::Value;

use crate::error::StorageError;
use crate::objects;

/// Load a JSON document. Returns the parsed body and its ETag.
pub async fn load_document(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(Value, String), StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: Value = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag))
}

/// Save a JSON document unconditionally. Returns the new ETag.
pub async fn save_document(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &Value,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_json(client, bucket, key, body, None).await
}

/// Save a JSON document with ETag optimistic locking.
pub async fn save_document_if_match(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &Value,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_json(client, bucket, key, body, Some(expected_etag)).await
}
