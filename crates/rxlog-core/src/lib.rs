//! rxlog-core
//!
//! Pure domain types, document schema, collection key conventions, and the
//! statistics layer. No AWS SDK dependency; this is the shared vocabulary
//! of the intervention log.

pub mod error;
pub mod keys;
pub mod leaderboard;
pub mod models;
pub mod schema;
pub mod stats;
