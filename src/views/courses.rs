//! Course browser with filtering and the "start course" action

use std::sync::Arc;

use crate::catalog::{self, CatalogMode, FilterCriteria};
use crate::config::AppConfig;
use crate::membership::{ActionState, DerivedMembership, EngageOutcome};
use crate::source::DataSource;
use crate::types::{Category, Course, CourseLevel};

use super::or_default;

/// A visible course paired with the state of its start button
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub course: Course,
    pub action: ActionState,
}

pub struct CoursesView {
    courses: Vec<Course>,
    criteria: FilterCriteria,
    membership: DerivedMembership,
}

impl CoursesView {
    /// Fetch recommended courses and progress records together.
    ///
    /// Progress records seed the membership set; if they fail to load the
    /// set starts empty and the server remains the final arbiter.
    pub async fn load(source: Arc<dyn DataSource>, config: &AppConfig) -> Self {
        let (courses, records) = futures::join!(
            source.fetch_courses(CatalogMode::Recommended),
            source.fetch_progress_records(),
        );

        let courses = or_default(courses, "recommended courses");
        let records: Vec<_> = or_default(records, "progress records");
        let membership = DerivedMembership::from_records(source, config.engagement, &records);

        Self {
            courses,
            criteria: FilterCriteria::default(),
            membership,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn membership(&self) -> &DerivedMembership {
        &self.membership
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.criteria.category = category;
    }

    pub fn set_level(&mut self, level: Option<CourseLevel>) {
        self.criteria.level = level;
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Courses passing the current criteria, in server order
    pub fn filtered(&self) -> Vec<Course> {
        catalog::filter(&self.courses, &self.criteria)
    }

    pub fn cards(&self) -> Vec<CourseCard> {
        self.filtered()
            .into_iter()
            .map(|course| CourseCard {
                action: self.membership.action_state(&course.id),
                course,
            })
            .collect()
    }

    pub fn action_state(&self, course_id: &str) -> ActionState {
        self.membership.action_state(course_id)
    }

    pub async fn engage(&self, course_id: &str) -> EngageOutcome {
        self.membership.request_engage(course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockSource};
    use crate::types::{EntryRef, ProgressRecord};

    fn course(id: &str, title: &str, level: CourseLevel, skills: &[&str]) -> Course {
        Course {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: Category::WebDevelopment,
            level,
            duration: 6.0,
            provider: Some("Coursera".into()),
            url: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            tags: vec![],
            rating: Some(4.5),
            is_active: Some(true),
        }
    }

    fn record(course_id: &str) -> ProgressRecord {
        ProgressRecord {
            id: None,
            course_id: Some(EntryRef::Id(course_id.to_string())),
            community_id: None,
            score_gained: 10,
            time_spent_minutes: 30,
            created_at: None,
        }
    }

    fn source() -> Arc<MockSource> {
        Arc::new(
            MockSource::new()
                .with_courses(
                    CatalogMode::Recommended,
                    vec![
                        course("A", "HTML Foundations", CourseLevel::Beginner, &["HTML"]),
                        course("B", "React in Depth", CourseLevel::Advanced, &["JavaScript", "React"]),
                        course("C", "Node APIs", CourseLevel::Intermediate, &["JavaScript"]),
                    ],
                )
                .with_progress(vec![record("A")]),
        )
    }

    #[tokio::test]
    async fn test_load_seeds_membership() {
        let view = CoursesView::load(source(), &AppConfig::default()).await;

        assert_eq!(view.courses().len(), 3);
        assert_eq!(view.action_state("A"), ActionState::Engaged);
        assert_eq!(view.action_state("B"), ActionState::Available);
    }

    #[tokio::test]
    async fn test_filters_compose() {
        let mut view = CoursesView::load(source(), &AppConfig::default()).await;

        view.set_search("javascript");
        let ids: Vec<_> = view.filtered().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["B", "C"]);

        view.set_level(Some(CourseLevel::Advanced));
        let ids: Vec<_> = view.filtered().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["B"]);

        view.clear_filters();
        assert_eq!(view.filtered().len(), 3);
    }

    #[tokio::test]
    async fn test_engage_updates_card() {
        let view = CoursesView::load(source(), &AppConfig::default()).await;

        let outcome = view.engage("B").await;
        assert_eq!(outcome, EngageOutcome::Engaged);

        let card = view.cards().into_iter().find(|c| c.course.id == "B").unwrap();
        assert_eq!(card.action, ActionState::Engaged);
        assert!(!card.action.is_enabled());
    }

    #[tokio::test]
    async fn test_progress_failure_leaves_courses() {
        let source = Arc::new(
            MockSource::new()
                .with_courses(
                    CatalogMode::Recommended,
                    vec![course("A", "HTML Foundations", CourseLevel::Beginner, &[])],
                )
                .failing(Endpoint::ProgressRecords),
        );
        let view = CoursesView::load(source, &AppConfig::default()).await;

        assert_eq!(view.courses().len(), 1);
        assert!(view.membership().members().is_empty());
    }
}
