//! Screen state and the fetches behind each screen.
//!
//! A screen owns one snapshot. Loading replaces it wholesale; a failed load
//! is logged and leaves the previous snapshot on display. Derived views are
//! recomputed from the fetched data on every load and never cached.

pub mod admin;
pub mod intervention_form;
pub mod pharmacist;
pub mod profile;

use std::future::Future;

use crate::error::AppError;

#[derive(Debug)]
pub struct Screen<T> {
    name: &'static str,
    snapshot: Option<T>,
    loading: bool,
}

impl<T> Screen<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            snapshot: None,
            loading: false,
        }
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run `fetch` and install its result. Returns whether the snapshot was
    /// replaced.
    pub async fn load<F>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = Result<T, AppError>>,
    {
        self.loading = true;
        let replaced = match fetch.await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                true
            }
            Err(e) => {
                tracing::error!(screen = self.name, error = %e, "error loading data");
                false
            }
        };
        self.loading = false;
        replaced
    }
}
