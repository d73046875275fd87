use thiserror::Error;

use crate::keys::Collection;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid document {collection}/{id}: {violation}")]
    Schema {
        collection: Collection,
        id: String,
        violation: Violation,
    },
}

/// The reason a stored document was rejected at the schema boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("body is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown {field} `{value}`")]
    UnknownVariant { field: &'static str, value: String },

    #[error("field `{field}` is not an RFC 3339 timestamp: `{value}`")]
    InvalidTimestamp { field: &'static str, value: String },
}
