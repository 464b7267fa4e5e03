//! Course and category records as returned by the catalog endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Instructor display name, free text rather than a user reference
    #[serde(default)]
    pub instructor: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    #[serde(default, rename = "sub_subcategory")]
    pub sub_subcategory: Option<String>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub video_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub learning_outcomes: Vec<String>,

    #[serde(default)]
    pub what_you_will_learn: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Whether the course costs nothing, by price or by explicit flag
    pub fn is_free_of_charge(&self) -> bool {
        self.is_free || self.price == 0.0
    }

    /// Display label for the price column
    pub fn price_label(&self) -> String {
        if self.is_free_of_charge() {
            "Free".to_string()
        } else {
            format!("₹{}", self.price)
        }
    }
}

/// A parent category reference, which the backend returns either as a raw
/// identifier or as an embedded object carrying `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParentRef {
    Id(String),
    Embedded {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl ParentRef {
    /// The parent identifier in either representation
    pub fn id(&self) -> &str {
        match self {
            ParentRef::Id(id) => id,
            ParentRef::Embedded { id } => id,
        }
    }
}

/// A category record; level 1 is a root category, levels 2 and 3 reference
/// their parent one level up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    pub level: u8,

    #[serde(default, rename = "parentCategory")]
    pub parent: Option<ParentRef>,
}

impl Category {
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_ref_accepts_raw_id_and_embedded_object() {
        let raw: Category = serde_json::from_str(
            r#"{"_id":"sub1","name":"Frontend","level":2,"parentCategory":"web"}"#,
        )
        .unwrap();
        assert_eq!(raw.parent_id(), Some("web"));

        let embedded: Category = serde_json::from_str(
            r#"{"_id":"sub1","name":"Frontend","level":2,"parentCategory":{"_id":"web","name":"Web Development"}}"#,
        )
        .unwrap();
        assert_eq!(embedded.parent_id(), Some("web"));
    }

    #[test]
    fn course_deserializes_backend_shape() {
        let course: Course = serde_json::from_str(
            r#"{
                "_id": "c1",
                "title": "Rust Basics",
                "description": "Start here",
                "instructor": "Priya",
                "price": 499,
                "isPublished": true,
                "sub_subcategory": "react",
                "thumbnailUrl": "course.jpg"
            }"#,
        )
        .unwrap();
        assert_eq!(course.id, "c1");
        assert!(course.is_published);
        assert_eq!(course.sub_subcategory.as_deref(), Some("react"));
        assert_eq!(course.thumbnail_url.as_deref(), Some("course.jpg"));
    }

    #[test]
    fn zero_price_or_flag_means_free() {
        let free: Course =
            serde_json::from_str(r#"{"_id":"a","title":"T","price":0}"#).unwrap();
        assert!(free.is_free_of_charge());
        assert_eq!(free.price_label(), "Free");

        let flagged: Course =
            serde_json::from_str(r#"{"_id":"b","title":"T","price":100,"isFree":true}"#).unwrap();
        assert!(flagged.is_free_of_charge());
    }
}
