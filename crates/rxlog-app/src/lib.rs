//! rxlog-app
//!
//! Configuration, the application context, and the screens of the
//! intervention log. The `rxlog` binary drives these from the command line.

pub mod config;
pub mod context;
pub mod error;
pub mod notice;
pub mod route;
pub mod screens;

pub use context::AppContext;
pub use error::AppError;
pub use notice::{Notice, NoticeKind};
pub use route::{Route, landing_route};
