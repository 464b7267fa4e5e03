//! Hierarchical lookup over the flat category list

use super::types::{Category, Course};

/// Sentinel name for an id that resolves to no known category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Sentinel path for a course with no category levels set
pub const UNCATEGORIZED: &str = "Uncategorized";

const PATH_SEPARATOR: &str = " > ";

/// Three-level category index built from the flat `/api/categories` list.
///
/// Input order is preserved, so sidebar rendering follows whatever ordering
/// the backend chose. Unknown parent ids simply yield empty child lists.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// All level-1 categories, original order preserved
    pub fn main_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.level == 1).collect()
    }

    /// Level-2 categories whose parent is `parent_id`
    pub fn sub_categories(&self, parent_id: &str) -> Vec<&Category> {
        self.children_at(2, parent_id)
    }

    /// Level-3 categories whose parent is `parent_id`
    pub fn sub_sub_categories(&self, parent_id: &str) -> Vec<&Category> {
        self.children_at(3, parent_id)
    }

    fn children_at(&self, level: u8, parent_id: &str) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.level == level && c.parent_id() == Some(parent_id))
            .collect()
    }

    /// Category name for `id`, or [`UNKNOWN_CATEGORY`] when absent or null
    pub fn name_of(&self, id: Option<&str>) -> &str {
        let Some(id) = id else {
            return UNKNOWN_CATEGORY;
        };
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Full category path of a course, skipping unset levels.
    /// Returns [`UNCATEGORIZED`] when no level is set.
    pub fn path_of(&self, course: &Course) -> String {
        let parts: Vec<&str> = [
            course.category.as_deref(),
            course.subcategory.as_deref(),
            course.sub_subcategory.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(|id| self.name_of(Some(id)))
        .collect();

        if parts.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            parts.join(PATH_SEPARATOR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, name: &str, level: u8, parent: Option<&str>) -> Category {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": name,
            "level": level,
            "parentCategory": parent,
        }))
        .unwrap()
    }

    fn sample_index() -> CategoryIndex {
        CategoryIndex::new(vec![
            cat("web", "Web Development", 1, None),
            cat("ai", "AI & Machine Learning", 1, None),
            cat("frontend", "Frontend", 2, Some("web")),
            cat("backend", "Backend", 2, Some("web")),
            cat("react", "React.js", 3, Some("frontend")),
        ])
    }

    #[test]
    fn main_categories_preserve_input_order() {
        let index = sample_index();
        let names: Vec<_> = index.main_categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Web Development", "AI & Machine Learning"]);
    }

    #[test]
    fn children_filter_by_parent_and_level() {
        let index = sample_index();
        let subs: Vec<_> = index.sub_categories("web").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(subs, ["frontend", "backend"]);

        let subsubs: Vec<_> = index
            .sub_sub_categories("frontend")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(subsubs, ["react"]);
    }

    #[test]
    fn unknown_parent_yields_empty_list() {
        let index = sample_index();
        assert!(index.sub_categories("nope").is_empty());
    }

    #[test]
    fn name_of_handles_missing_and_null() {
        let index = sample_index();
        assert_eq!(index.name_of(Some("web")), "Web Development");
        assert_eq!(index.name_of(Some("missing")), UNKNOWN_CATEGORY);
        assert_eq!(index.name_of(None), UNKNOWN_CATEGORY);
    }

    #[test]
    fn path_of_joins_set_levels() {
        let index = sample_index();
        let mut course: Course =
            serde_json::from_str(r#"{"_id":"c1","title":"T"}"#).unwrap();
        assert_eq!(index.path_of(&course), UNCATEGORIZED);

        course.category = Some("web".into());
        course.subcategory = Some("frontend".into());
        assert_eq!(index.path_of(&course), "Web Development > Frontend");

        course.sub_subcategory = Some("react".into());
        assert_eq!(index.path_of(&course), "Web Development > Frontend > React.js");
    }
}
