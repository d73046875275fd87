//! Document key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of documents in the backing bucket: one JSON object per record,
//! grouped by collection prefix, keyed by an opaque identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Interventions,
    Medications,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Interventions => "interventions",
            Collection::Medications => "medications",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Collection::Users => "users/",
            Collection::Interventions => "interventions/",
            Collection::Medications => "medications/",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn document(collection: Collection, id: &str) -> String {
    format!("{}{id}.json", collection.prefix())
}

/// Recover the document identifier from an object key listed under a
/// collection prefix. Keys that do not follow the layout yield `None`.
pub fn document_id(collection: Collection, key: &str) -> Option<&str> {
    key.strip_prefix(collection.prefix())?
        .strip_suffix(".json")
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

/// Allocate a fresh opaque document identifier.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
