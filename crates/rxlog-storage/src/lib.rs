//! rxlog-storage
//!
//! Document persistence. A thin wrapper around the AWS S3 SDK behind the
//! [`store::DocumentStore`] seam, an in-memory store for tests and offline
//! use, and the typed [`backend::Backend`] that every screen talks to.

pub mod backend;
pub mod client;
pub mod documents;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;

pub use backend::Backend;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::{Document, DocumentStore};
