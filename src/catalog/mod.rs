//! Course catalog: reads, category indexing, filter/sort pipeline

mod index;
mod media;
mod pipeline;
mod types;

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;

pub use index::{CategoryIndex, UNCATEGORIZED, UNKNOWN_CATEGORY};
pub use media::{resolve_asset_url, DEFAULT_THUMBNAIL};
pub use pipeline::{filter_and_sort, result_summary, CatalogState, Facet, Selection, SortKey};
pub use types::{Category, Course, ParentRef};

/// The course list arrives either as `{"courses": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum CoursesList {
    Wrapped {
        #[serde(default)]
        courses: Vec<Course>,
    },
    Bare(Vec<Course>),
}

/// The category list arrives either as `{"categories": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoriesList {
    Wrapped {
        #[serde(default)]
        categories: Vec<Category>,
    },
    Bare(Vec<Category>),
}

/// Client for catalog reads
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
}

impl CatalogClient {
    pub(crate) fn new(base_url: &str, client: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
        }
    }

    /// Fetch the full course list
    pub async fn courses(&self) -> Result<Vec<Course>, Error> {
        let url = format!("{}/api/courses", self.base_url);
        let list: CoursesList = Fetch::get(&self.client, &url).execute().await?;
        Ok(match list {
            CoursesList::Wrapped { courses } => courses,
            CoursesList::Bare(courses) => courses,
        })
    }

    /// Fetch a single course. The token is attached when present so
    /// purchased-only material is included for signed-in users.
    pub async fn course(&self, id: &str) -> Result<Course, Error> {
        let url = format!("{}/api/courses/{}", self.base_url, id);
        Fetch::get(&self.client, &url)
            .maybe_authed(&self.session)
            .execute()
            .await
    }

    /// Fetch the flat category list
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        let url = format!("{}/api/categories", self.base_url);
        let list: CategoriesList = Fetch::get(&self.client, &url).execute().await?;
        Ok(match list {
            CategoriesList::Wrapped { categories } => categories,
            CategoriesList::Bare(categories) => categories,
        })
    }

    /// Fetch the category list and build the hierarchical index over it
    pub async fn category_index(&self) -> Result<CategoryIndex, Error> {
        Ok(CategoryIndex::new(self.categories().await?))
    }
}
