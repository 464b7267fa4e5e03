//! Video progress persistence and the playback tracker

mod debounce;
mod tracker;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Course;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;

pub use debounce::Debouncer;
pub use tracker::{ProgressTracker, TrackerState};

/// Saved playback state for one (user, course) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, alias = "completed")]
    pub is_completed: bool,
    #[serde(default)]
    pub last_watched: Option<DateTime<Utc>>,
}

/// A course reference returned either as an id or as the embedded course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseRef {
    Id(String),
    Embedded(Box<Course>),
}

impl CourseRef {
    pub fn id(&self) -> &str {
        match self {
            CourseRef::Id(id) => id,
            CourseRef::Embedded(course) => &course.id,
        }
    }
}

/// One entry of the all-courses progress listing
#[derive(Debug, Clone, Deserialize)]
pub struct UserProgressEntry {
    pub course: CourseRef,
    #[serde(flatten)]
    pub record: ProgressRecord,
}

#[derive(Deserialize)]
struct ProgressResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    progress: Option<ProgressRecord>,
}

#[derive(Deserialize)]
struct UserProgressResponse {
    #[serde(default)]
    progress: Vec<UserProgressEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveProgressRequest<'a> {
    course_id: &'a str,
    current_time: f64,
    duration: f64,
}

/// Client for the progress endpoints
#[derive(Debug, Clone)]
pub struct ProgressClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
}

impl ProgressClient {
    pub(crate) fn new(base_url: &str, client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
        }
    }

    /// Fetch the saved progress for a course, `None` when nothing was saved.
    /// A 404 also means "never watched", so playback starts from the
    /// beginning instead of failing.
    pub async fn get(&self, course_id: &str) -> Result<Option<ProgressRecord>, Error> {
        let url = format!("{}/api/progress/{}", self.base_url, course_id);
        let result: Result<ProgressResponse, Error> = Fetch::get(&self.client, &url)
            .authed(&self.session)?
            .execute()
            .await;
        match result {
            Ok(response) if response.success => Ok(response.progress),
            Ok(_) => Ok(None),
            Err(Error::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Upsert the playback position for a course
    pub async fn save(&self, course_id: &str, current_time: f64, duration: f64) -> Result<(), Error> {
        let url = format!("{}/api/progress", self.base_url);
        Fetch::post(&self.client, &url)
            .authed(&self.session)?
            .json(&SaveProgressRequest {
                course_id,
                current_time,
                duration,
            })?
            .execute::<serde_json::Value>()
            .await?;
        Ok(())
    }

    /// Fetch progress across every course the user has watched
    pub async fn user_all(&self) -> Result<Vec<UserProgressEntry>, Error> {
        let url = format!("{}/api/progress/user/all", self.base_url);
        let response: UserProgressResponse = Fetch::get(&self.client, &url)
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(response.progress)
    }
}
