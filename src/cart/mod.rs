//! Cart CRUD and the optimistic add/remove toggle
//!
//! Successful mutations publish the new item count through [`SharedStore`],
//! so a cart badge elsewhere refreshes without being called directly.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Course;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;
use crate::store::SharedStore;
use crate::toggle::{Notification, ToggleOutcome};

/// A cart line with its server-assigned metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub course: Course,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

fn default_quantity() -> u32 {
    1
}

/// The cart endpoint returns either `{"items": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum CartList {
    Wrapped {
        #[serde(default)]
        items: Vec<CartItem>,
    },
    Bare(Vec<CartItem>),
}

impl CartList {
    fn into_items(self) -> Vec<CartItem> {
        match self {
            CartList::Wrapped { items } => items,
            CartList::Bare(items) => items,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartRequest<'a> {
    course_id: &'a str,
}

/// Client for the cart endpoints
#[derive(Debug, Clone)]
pub struct CartClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
    store: Arc<SharedStore>,
}

impl CartClient {
    pub(crate) fn new(
        base_url: &str,
        client: Client,
        session: Arc<SessionStore>,
        store: Arc<SharedStore>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/cart{}", self.base_url, path)
    }

    /// Fetch the user's cart
    pub async fn list(&self) -> Result<Vec<CartItem>, Error> {
        let list: CartList = Fetch::get(&self.client, &self.url(""))
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(list.into_items())
    }

    /// Add a course to the cart and broadcast the new count
    pub async fn add(&self, course_id: &str) -> Result<(), Error> {
        Fetch::post(&self.client, &self.url(""))
            .authed(&self.session)?
            .json(&CartRequest { course_id })?
            .execute::<serde_json::Value>()
            .await?;
        self.refresh_count().await;
        Ok(())
    }

    /// Remove a course from the cart and broadcast the new count
    pub async fn remove(&self, course_id: &str) -> Result<(), Error> {
        let url = self.url(&format!("/{}", course_id));
        Fetch::delete(&self.client, &url)
            .authed(&self.session)?
            .execute::<serde_json::Value>()
            .await?;
        self.refresh_count().await;
        Ok(())
    }

    /// Optimistically flip a course's in-cart state and reconcile against the
    /// server response; the same contract as the favorites toggle.
    pub async fn toggle(&self, course_id: &str, currently_in_cart: bool) -> Result<ToggleOutcome, Error> {
        if !self.session.is_authenticated() {
            return Err(Error::unauthenticated("log in to manage your cart"));
        }

        let desired = !currently_in_cart;
        let result = if desired {
            self.add(course_id).await
        } else {
            self.remove(course_id).await
        };

        match result {
            Ok(()) => {
                let message = if desired {
                    "Added to cart"
                } else {
                    "Removed from cart"
                };
                Ok(ToggleOutcome::committed(
                    desired,
                    Notification::success(message),
                ))
            }
            Err(Error::Conflict(message)) => {
                tracing::debug!(course_id, %message, "cart toggle reconciled");
                Ok(ToggleOutcome::reconciled(desired, Notification::info(message)))
            }
            Err(Error::Unauthenticated(message)) => Err(Error::Unauthenticated(message)),
            Err(err) => {
                let message = match &err {
                    Error::Api { message, .. } => message.clone(),
                    _ => "Failed to update cart".to_string(),
                };
                tracing::warn!(course_id, error = %err, "cart toggle rolled back");
                Ok(ToggleOutcome::rolled_back(
                    currently_in_cart,
                    Notification::error(message),
                ))
            }
        }
    }

    /// Re-count the cart and publish the result. Count refresh failures only
    /// affect the badge, so they are logged rather than propagated.
    async fn refresh_count(&self) {
        match self.list().await {
            Ok(items) => self.store.set_cart_count(items.len()),
            Err(err) => tracing::warn!(error = %err, "failed to refresh cart count"),
        }
    }
}
