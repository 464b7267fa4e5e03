//! Pure filter/sort pipeline over an in-memory course list
//!
//! Stages run in a fixed order: hierarchy, search, facet, sort. Each stage
//! narrows the previous result; the input slice is never mutated.

use super::index::CategoryIndex;
use super::types::Course;

/// A category-level selection: everything, or one specific id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Id(String),
}

impl Selection {
    pub fn id<T: Into<String>>(id: T) -> Self {
        Selection::Id(id.into())
    }

    fn matches(&self, field: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Id(id) => field == Some(id.as_str()),
        }
    }

    fn selected_id(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Id(id) => Some(id),
        }
    }
}

/// Price/publish facet filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Free,
    Paid,
    Published,
    Draft,
}

/// Sort key applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Preserve the filtered order
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

/// Current catalog filter/sort/search state
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub category: Selection,
    pub subcategory: Selection,
    pub sub_subcategory: Selection,
    pub search: String,
    pub facet: Facet,
    pub sort: SortKey,
}

impl CatalogState {
    /// Reset every filter back to its default
    pub fn reset(&mut self) {
        *self = CatalogState::default();
    }

    /// Display label for the deepest selected category level, resolved
    /// through the index; `None` when no category is selected.
    pub fn active_filter_label(&self, index: &CategoryIndex) -> Option<String> {
        let deepest = self
            .sub_subcategory
            .selected_id()
            .or_else(|| self.subcategory.selected_id())
            .or_else(|| self.category.selected_id())?;
        Some(index.name_of(Some(deepest)).to_string())
    }
}

/// Apply the full pipeline and return a new, ordered course list.
pub fn filter_and_sort(courses: &[Course], state: &CatalogState) -> Vec<Course> {
    let term = state.search.trim().to_lowercase();

    let mut result: Vec<Course> = courses
        .iter()
        .filter(|course| matches_hierarchy(course, state))
        .filter(|course| term.is_empty() || matches_search(course, &term))
        .filter(|course| matches_facet(course, state.facet))
        .cloned()
        .collect();

    match state.sort {
        SortKey::Default => {}
        SortKey::TitleAsc => {
            result.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::TitleDesc => {
            result.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
        }
        SortKey::PriceAsc => result.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => result.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    result
}

/// Summary line for the result count, e.g. "3 courses found"
pub fn result_summary(count: usize) -> String {
    if count == 1 {
        "1 course found".to_string()
    } else {
        format!("{} courses found", count)
    }
}

fn matches_hierarchy(course: &Course, state: &CatalogState) -> bool {
    state.category.matches(course.category.as_deref())
        && state.subcategory.matches(course.subcategory.as_deref())
        && state.sub_subcategory.matches(course.sub_subcategory.as_deref())
}

fn matches_search(course: &Course, term: &str) -> bool {
    course.title.to_lowercase().contains(term)
        || course.description.to_lowercase().contains(term)
        || course.instructor.to_lowercase().contains(term)
}

fn matches_facet(course: &Course, facet: Facet) -> bool {
    match facet {
        Facet::All => true,
        Facet::Free => course.price == 0.0,
        Facet::Paid => course.price > 0.0,
        Facet::Published => course.is_published,
        Facet::Draft => !course.is_published,
    }
}
