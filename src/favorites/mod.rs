//! Favorites CRUD and the optimistic favorite toggle

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Course;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;
use crate::toggle::{Notification, ToggleOutcome};

/// A favorited course with its server-assigned metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub course: Course,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

/// The favorites endpoint returns either `{"items": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum FavoritesList {
    Wrapped {
        #[serde(default)]
        items: Vec<FavoriteItem>,
    },
    Bare(Vec<FavoriteItem>),
}

#[derive(Deserialize)]
struct FavoriteCheck {
    #[serde(rename = "isFavorite")]
    is_favorite: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRequest<'a> {
    course_id: &'a str,
}

/// Client for the favorites endpoints
#[derive(Debug, Clone)]
pub struct FavoritesClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
}

impl FavoritesClient {
    pub(crate) fn new(base_url: &str, client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/favorites{}", self.base_url, path)
    }

    /// List the user's favorited courses
    pub async fn list(&self) -> Result<Vec<FavoriteItem>, Error> {
        let list: FavoritesList = Fetch::get(&self.client, &self.url(""))
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(match list {
            FavoritesList::Wrapped { items } => items,
            FavoritesList::Bare(items) => items,
        })
    }

    /// Whether the given course is currently favorited
    pub async fn check(&self, course_id: &str) -> Result<bool, Error> {
        let url = self.url(&format!("/check/{}", course_id));
        let check: FavoriteCheck = Fetch::get(&self.client, &url)
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(check.is_favorite)
    }

    /// Add a course to favorites
    pub async fn add(&self, course_id: &str) -> Result<(), Error> {
        Fetch::post(&self.client, &self.url(""))
            .authed(&self.session)?
            .json(&FavoriteRequest { course_id })?
            .execute::<serde_json::Value>()
            .await?;
        Ok(())
    }

    /// Remove a course from favorites
    pub async fn remove(&self, course_id: &str) -> Result<(), Error> {
        let url = self.url(&format!("/{}", course_id));
        Fetch::delete(&self.client, &url)
            .authed(&self.session)?
            .execute::<serde_json::Value>()
            .await?;
        Ok(())
    }

    /// Remove every favorited course
    pub async fn clear(&self) -> Result<(), Error> {
        Fetch::delete(&self.client, &self.url(""))
            .authed(&self.session)?
            .execute::<serde_json::Value>()
            .await?;
        Ok(())
    }

    /// Optimistically flip the favorite state of a course and reconcile
    /// against the server response.
    ///
    /// Requires a session: with none stored this returns
    /// [`Error::Unauthenticated`] so the caller can prompt for login and
    /// defer the action. A conflict (already present / already absent) forces
    /// local state to the server's implied truth rather than failing; any
    /// other error rolls the flip back.
    pub async fn toggle(
        &self,
        course_id: &str,
        currently_favorited: bool,
    ) -> Result<ToggleOutcome, Error> {
        if !self.session.is_authenticated() {
            return Err(Error::unauthenticated(
                "log in to add courses to favorites",
            ));
        }

        let desired = !currently_favorited;
        let result = if desired {
            self.add(course_id).await
        } else {
            self.remove(course_id).await
        };

        match result {
            Ok(()) => {
                let message = if desired {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                };
                Ok(ToggleOutcome::committed(
                    desired,
                    Notification::success(message),
                ))
            }
            Err(Error::Conflict(message)) => {
                // The server already holds the desired state; adopt it.
                tracing::debug!(course_id, %message, "favorite toggle reconciled");
                Ok(ToggleOutcome::reconciled(desired, Notification::info(message)))
            }
            Err(Error::Unauthenticated(message)) => Err(Error::Unauthenticated(message)),
            Err(err) => {
                let message = match &err {
                    Error::Api { message, .. } => message.clone(),
                    _ => "Failed to update favorites".to_string(),
                };
                tracing::warn!(course_id, error = %err, "favorite toggle rolled back");
                Ok(ToggleOutcome::rolled_back(
                    currently_favorited,
                    Notification::error(message),
                ))
            }
        }
    }
}
