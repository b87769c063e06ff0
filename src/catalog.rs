//! Catalog entries and client-side filtering
//!
//! Courses and communities share one filter. Search is case-insensitive and
//! matches the title, the description, or any single keyword; keywords are
//! never joined before matching.

use crate::types::{Category, Community, Course, CourseLevel};
use serde::{Deserialize, Serialize};

/// Which catalog to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Course,
    Community,
}

/// Personalised recommendations or the full approved list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    Recommended,
    All,
}

/// Common read-only view over anything listed in a catalog
pub trait CatalogEntry {
    fn entry_id(&self) -> &str;

    /// Course title or community name
    fn title(&self) -> &str;

    fn description(&self) -> &str;

    fn category(&self) -> Category;

    /// Free-form strings searched individually (skills, tags)
    fn keywords(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Difficulty, for entries that have one
    fn level(&self) -> Option<CourseLevel> {
        None
    }
}

impl CatalogEntry for Course {
    fn entry_id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Category {
        self.category
    }

    fn keywords(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.skills.iter().chain(self.tags.iter()).map(String::as_str))
    }

    fn level(&self) -> Option<CourseLevel> {
        Some(self.level)
    }
}

impl CatalogEntry for Community {
    fn entry_id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Category {
        self.category
    }

    fn keywords(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.tags.iter().map(String::as_str))
    }
}

/// Either kind of catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Course(Course),
    Community(Community),
}

impl CatalogItem {
    pub fn kind(&self) -> CatalogKind {
        match self {
            CatalogItem::Course(_) => CatalogKind::Course,
            CatalogItem::Community(_) => CatalogKind::Community,
        }
    }

    fn inner(&self) -> &dyn CatalogEntry {
        match self {
            CatalogItem::Course(c) => c,
            CatalogItem::Community(c) => c,
        }
    }
}

impl CatalogEntry for CatalogItem {
    fn entry_id(&self) -> &str {
        self.inner().entry_id()
    }

    fn title(&self) -> &str {
        self.inner().title()
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    fn category(&self) -> Category {
        self.inner().category()
    }

    fn keywords(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.inner().keywords()
    }

    fn level(&self) -> Option<CourseLevel> {
        self.inner().level()
    }
}

/// User-controlled narrowing of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: Option<Category>,
    /// Only constrains entries that carry a level
    pub level: Option<CourseLevel>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_level(mut self, level: CourseLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.category.is_none() && self.level.is_none()
    }

    /// Whether a single entry passes every set predicate
    pub fn matches<E: CatalogEntry + ?Sized>(&self, entry: &E) -> bool {
        self.matches_search(entry)
            && self.category.map_or(true, |c| entry.category() == c)
            && match (self.level, entry.level()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => true,
            }
    }

    fn matches_search<E: CatalogEntry + ?Sized>(&self, entry: &E) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(entry.title())
            || contains(entry.description())
            || entry.keywords().any(contains)
    }
}

/// Narrow `entries` to those matching `criteria`, preserving order
pub fn filter<E: CatalogEntry + Clone>(entries: &[E], criteria: &FilterCriteria) -> Vec<E> {
    entries
        .iter()
        .filter(|entry| criteria.matches(*entry))
        .cloned()
        .collect()
}
