//! Editable forms for courses and the user profile
//!
//! Forms hold user input until submit. [`CourseForm::validate`] turns one
//! into the payload the API accepts.

use crate::client::CourseInput;
use crate::error::{ClientError, Result};
use crate::types::{Category, Course, CourseLevel, LearningPreferences, UserProfile};

/// Ordered list of unique, trimmed, non-empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` after trimming. Returns false if it was blank or present.
    pub fn add(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    /// Remove an exact match
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|v| v != value);
        self.0.len() != before
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for TagList {
    fn from(values: Vec<String>) -> Self {
        let mut list = TagList::new();
        for value in &values {
            list.add(value);
        }
        list
    }
}

/// Admin course editor
#[derive(Debug, Clone, PartialEq)]
pub struct CourseForm {
    /// Id of the course being edited; `None` creates a new one
    pub editing: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub level: CourseLevel,
    /// Hours
    pub duration: f64,
    pub skills: TagList,
    pub tags: TagList,
    pub url: String,
    pub is_active: bool,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            category: None,
            level: CourseLevel::Beginner,
            duration: 0.0,
            skills: TagList::new(),
            tags: TagList::new(),
            url: String::new(),
            is_active: true,
        }
    }
}

impl CourseForm {
    /// Empty form for a new course
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing course
    pub fn edit(course: &Course) -> Self {
        Self {
            editing: Some(course.id.clone()),
            title: course.title.clone(),
            description: course.description.clone(),
            category: Some(course.category),
            level: course.level,
            duration: course.duration,
            skills: course.skills.clone().into(),
            tags: course.tags.clone().into(),
            url: course.url.clone().unwrap_or_default(),
            is_active: course.is_active.unwrap_or(true),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Check required fields and build the request payload
    pub fn validate(&self) -> Result<CourseInput> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let url = required(&self.url, "url")?;
        let category = self
            .category
            .ok_or_else(|| ClientError::Validation("category is required".into()))?;
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ClientError::Validation(
                "duration must be a non-negative number of hours".into(),
            ));
        }

        Ok(CourseInput {
            title,
            description,
            category,
            level: self.level,
            duration: self.duration,
            skills: self.skills.as_slice().to_vec(),
            tags: self.tags.as_slice().to_vec(),
            url,
            is_active: self.is_active,
        })
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Profile editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub skills: TagList,
    pub goals: TagList,
    pub industries: TagList,
    pub learning_preferences: LearningPreferences,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            skills: profile.skills.clone().into(),
            goals: profile.goals.clone().into(),
            industries: profile.preferred_industries.clone().into(),
            learning_preferences: profile.learning_preferences.clone(),
        }
    }

    /// Body for the profile update; identity fields are left out
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: None,
            name: self.name.trim().to_string(),
            email: None,
            skills: self.skills.as_slice().to_vec(),
            goals: self.goals.as_slice().to_vec(),
            preferred_industries: self.industries.as_slice().to_vec(),
            learning_preferences: self.learning_preferences.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_list_trims_and_dedups() {
        let mut skills = TagList::new();
        assert!(skills.add("  Rust "));
        assert!(!skills.add("Rust"));
        assert!(!skills.add("   "));
        assert!(skills.add("rust"));
        assert_eq!(skills.as_slice(), ["Rust", "rust"]);
    }

    #[test]
    fn test_tag_list_remove_exact() {
        let mut tags: TagList = vec!["SQL".to_string(), "Python".to_string()].into();
        assert!(!tags.remove("sql"));
        assert!(tags.remove("SQL"));
        assert_eq!(tags.as_slice(), ["Python"]);
    }

    #[test]
    fn test_course_form_requires_fields() {
        let mut form = CourseForm::new();
        form.title = "Intro to SQL".into();
        form.description = "Queries and joins".into();
        form.url = "https://example.com/sql".into();

        let err = form.validate().unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m.contains("category")));

        form.category = Some(Category::DataScience);
        form.duration = -1.0;
        assert!(form.validate().is_err());

        form.duration = 8.0;
        let input = form.validate().unwrap();
        assert_eq!(input.category, Category::DataScience);
        assert!(input.is_active);
    }

    #[test]
    fn test_blank_title_rejected() {
        let form = CourseForm {
            title: "   ".into(),
            ..CourseForm::new()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_profile_form_round_trip() {
        let profile = UserProfile {
            id: Some("u1".into()),
            name: "Sam".into(),
            email: Some("sam@example.com".into()),
            skills: vec!["Excel".into()],
            goals: vec![],
            preferred_industries: vec!["Finance".into()],
            learning_preferences: LearningPreferences::default(),
        };

        let mut form = ProfileForm::from_profile(&profile);
        form.goals.add("Become a data analyst");
        let body = form.to_profile();

        assert_eq!(body.id, None);
        assert_eq!(body.goals, vec!["Become a data analyst"]);
        assert_eq!(body.preferred_industries, vec!["Finance"]);
    }
}
