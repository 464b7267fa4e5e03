//! CourseHub Rust Client Library
//!
//! A Rust client for the CourseHub course marketplace API: catalog browsing
//! with a pure filter/sort pipeline, favorites and cart with optimistic
//! toggles, checkout with a hosted-payment redirect, and resumable video
//! progress tracking.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod fetch;
pub mod favorites;
pub mod instructors;
pub mod orders;
pub mod progress;
pub mod session;
pub mod store;
pub mod toggle;

use reqwest::Client;
use std::sync::Arc;
use url::Url;

use crate::auth::AuthClient;
use crate::cart::CartClient;
use crate::catalog::CatalogClient;
use crate::config::ClientOptions;
use crate::contact::ContactClient;
use crate::error::Error;
use crate::favorites::FavoritesClient;
use crate::instructors::InstructorsClient;
use crate::orders::OrdersClient;
use crate::progress::{ProgressClient, ProgressTracker};
use crate::session::SessionStore;
use crate::store::SharedStore;

/// The main entry point for the CourseHub client
pub struct CourseHub {
    /// The base URL of the CourseHub API
    pub base_url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: Arc<SessionStore>,
    store: Arc<SharedStore>,
}

impl CourseHub {
    /// Create a new CourseHub client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coursehub_rust::CourseHub;
    ///
    /// let hub = CourseHub::new("https://api.coursehub.example").unwrap();
    /// ```
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new CourseHub client with custom options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self, Error> {
        // Validate up front; a bad base URL should fail at construction,
        // not on the first request.
        Url::parse(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            options,
            session: Arc::new(SessionStore::new()),
            store: Arc::new(SharedStore::new()),
        })
    }

    /// The shared session store (token, user snapshot, staged checkout)
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    /// The shared observable store (cart count, user snapshot)
    pub fn store(&self) -> Arc<SharedStore> {
        Arc::clone(&self.store)
    }

    /// Client for login, signup, password reset and profile operations
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
            Arc::clone(&self.store),
        )
    }

    /// Client for course and category reads
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
        )
    }

    /// Client for the favorites endpoints
    pub fn favorites(&self) -> FavoritesClient {
        FavoritesClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
        )
    }

    /// Client for the cart endpoints
    pub fn cart(&self) -> CartClient {
        CartClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
            Arc::clone(&self.store),
        )
    }

    /// Client for the order and payment lifecycle
    pub fn orders(&self) -> OrdersClient {
        OrdersClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
            Arc::clone(&self.store),
        )
    }

    /// Client for the progress endpoints
    pub fn progress(&self) -> ProgressClient {
        ProgressClient::new(
            &self.base_url,
            self.http_client.clone(),
            Arc::clone(&self.session),
        )
    }

    /// A playback tracker for one course, configured from the client options
    pub fn progress_tracker(&self, course_id: &str) -> ProgressTracker {
        ProgressTracker::new(
            self.progress(),
            course_id,
            self.options.completion_threshold,
            self.options.save_quiet_period,
        )
    }

    /// Client for instructor profile lookup
    pub fn instructors(&self) -> InstructorsClient {
        InstructorsClient::new(&self.base_url, self.http_client.clone())
    }

    /// Client for the contact form endpoint
    pub fn contact(&self) -> ContactClient {
        ContactClient::new(&self.base_url, self.http_client.clone())
    }

    /// Resolve a raw asset reference (thumbnail, video) into a fetchable URL
    pub fn resolve_asset_url(&self, raw: Option<&str>) -> String {
        catalog::resolve_asset_url(raw, &self.base_url, self.options.asset_base_url.as_deref())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::catalog::{filter_and_sort, CatalogState, CategoryIndex, Facet, Selection, SortKey};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::CourseHub;
}
