use std::future::Future;

use rxlog_core::keys::Collection;
use serde_json::{Map, Value};

use crate::error::StorageError;

/// One stored record: its identifier and its untyped body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Per-collection document storage keyed by opaque string identifiers.
///
/// Implementations perform no schema checks; typed access goes through
/// [`crate::Backend`].
pub trait DocumentStore: Send + Sync {
    /// Every document in a collection, in no particular order.
    fn list(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<Document>, StorageError>> + Send;

    /// Fetch one document. Missing documents yield `StorageError::NotFound`.
    fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl Future<Output = Result<Document, StorageError>> + Send;

    /// Create or overwrite a document.
    fn put(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Merge `fields` into an existing document, replacing keys it already
    /// has. Missing documents yield `StorageError::NotFound`.
    fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn delete(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
