//! Instructor profile lookup

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Course;
use crate::error::Error;
use crate::fetch::Fetch;

/// An instructor's public profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// The instructor-courses endpoint returns either `{"courses": [...]}` or a
/// bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum CoursesList {
    Wrapped {
        #[serde(default)]
        courses: Vec<Course>,
    },
    Bare(Vec<Course>),
}

/// Client for the instructor endpoints
#[derive(Debug, Clone)]
pub struct InstructorsClient {
    base_url: String,
    client: Client,
}

impl InstructorsClient {
    pub(crate) fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/instructor-profile{}", self.base_url, path)
    }

    /// Fetch an instructor profile by id
    pub async fn profile(&self, id: &str) -> Result<Instructor, Error> {
        Fetch::get(&self.client, &self.url(&format!("/{}", id)))
            .execute()
            .await
    }

    /// Fetch the courses taught by an instructor
    pub async fn courses(&self, id: &str) -> Result<Vec<Course>, Error> {
        let list: CoursesList = Fetch::get(&self.client, &self.url(&format!("/{}/courses", id)))
            .execute()
            .await?;
        Ok(match list {
            CoursesList::Wrapped { courses } => courses,
            CoursesList::Bare(courses) => courses,
        })
    }

    /// Look up an instructor by display name; 404 maps to
    /// [`Error::NotFound`] so callers can render a not-found state.
    pub async fn search(&self, name: &str) -> Result<Instructor, Error> {
        let mut params = HashMap::new();
        params.insert("name".to_string(), name.to_string());
        Fetch::get(&self.client, &self.url("/search"))
            .query(params)
            .execute()
            .await
    }
}
