//! rxlog-auth
//!
//! Identity provider flows (Cognito) behind the [`provider::AuthProvider`]
//! seam, and the explicit [`session::Session`] that replaces ambient
//! signed-in state.

pub mod client;
pub mod cognito;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod provider;
pub mod session;

pub use error::AuthError;
pub use provider::{AuthProvider, SignedIn, Tokens};
pub use session::{Session, SessionStore};
