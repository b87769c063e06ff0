//! Dashboard: stats, level and a few recommendations

use crate::catalog::CatalogMode;
use crate::config::AppConfig;
use crate::leveling::LevelSummary;
use crate::source::DataSource;
use crate::types::{AnalyticsSummary, Course, ScoreStats};

use super::{or_absent, or_default};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: ScoreStats,
    pub level: LevelSummary,
    /// First `recommendation_limit` recommended courses
    pub recommendations: Vec<Course>,
    pub analytics: Option<AnalyticsSummary>,
}

impl DashboardView {
    pub async fn load(source: &dyn DataSource, config: &AppConfig) -> Self {
        let (stats, courses, analytics) = futures::join!(
            source.fetch_stats(),
            source.fetch_courses(CatalogMode::Recommended),
            source.fetch_analytics_summary(),
        );

        let stats: ScoreStats = or_default(stats, "stats");
        let mut recommendations: Vec<Course> = or_default(courses, "recommended courses");
        recommendations.truncate(config.views.recommendation_limit);

        Self {
            level: LevelSummary::from_stats(&stats, &config.leveling.thresholds),
            stats,
            recommendations,
            analytics: or_absent(analytics, "analytics"),
        }
    }

    pub fn total_hours(&self) -> u64 {
        self.stats.total_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockSource};
    use crate::types::{Category, CourseLevel};

    fn course(id: &str) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {}", id),
            description: String::new(),
            category: Category::DataScience,
            level: CourseLevel::Beginner,
            duration: 4.0,
            provider: None,
            url: None,
            skills: vec![],
            tags: vec![],
            rating: None,
            is_active: Some(true),
        }
    }

    #[tokio::test]
    async fn test_dashboard_truncates_recommendations() {
        let source = MockSource::new()
            .with_stats(ScoreStats {
                total_score: 600,
                streak_days: 3,
                completed_count: 2,
                total_time_minutes: 150,
            })
            .with_courses(
                CatalogMode::Recommended,
                vec![course("a"), course("b"), course("c"), course("d")],
            );

        let view = DashboardView::load(&source, &AppConfig::default()).await;

        assert_eq!(view.recommendations.len(), 3);
        assert_eq!(view.recommendations[0].id, "a");
        assert_eq!(view.level.level, 3);
        assert_eq!(view.total_hours(), 3);
        assert!(view.analytics.is_some());
    }

    #[tokio::test]
    async fn test_failed_stats_does_not_blank_recommendations() {
        let source = MockSource::new()
            .with_courses(CatalogMode::Recommended, vec![course("a")])
            .failing(Endpoint::Stats)
            .failing(Endpoint::Analytics);

        let view = DashboardView::load(&source, &AppConfig::default()).await;

        assert_eq!(view.stats, ScoreStats::default());
        assert_eq!(view.level.level, 1);
        assert_eq!(view.recommendations.len(), 1);
        assert!(view.analytics.is_none());
    }
}
