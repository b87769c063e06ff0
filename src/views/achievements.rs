//! Unlocked achievements with display names and icons

use chrono::{DateTime, Utc};

use crate::source::DataSource;
use crate::types::Achievement;

use super::or_default;

const DEFAULT_ICON: &str = "🏆";

/// Display name and icon for each achievement type the server awards
const KNOWN_KINDS: &[(&str, &str, &str)] = &[
    ("first_course", "First Steps", "🎯"),
    ("streak_7", "Week Warrior", "🔥"),
    ("streak_30", "Monthly Master", "⭐"),
    ("streak_100", "Century Champion", "💯"),
    ("xp_1000", "Knowledge Seeker", "📚"),
    ("xp_5000", "Expert Learner", "🎓"),
    ("xp_10000", "Master Scholar", "👑"),
    ("course_complete", "Course Completer", "✅"),
    ("courses_5", "Course Collector", "🏅"),
    ("courses_10", "Course Master", "🏆"),
    ("community_join", "Community Builder", "👥"),
    ("weekly_challenge", "Challenge Champion", "⚡"),
];

/// Look up the display name and icon for a known type
pub fn kind_info(kind: &str) -> Option<(&'static str, &'static str)> {
    KNOWN_KINDS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, name, icon)| (*name, *icon))
}

/// An achievement ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementBadge {
    pub title: String,
    pub icon: String,
    pub description: Option<String>,
    pub score_reward: u64,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<&Achievement> for AchievementBadge {
    fn from(achievement: &Achievement) -> Self {
        let (type_name, icon) = match kind_info(&achievement.kind) {
            Some((name, icon)) => (name.to_string(), icon.to_string()),
            None => (
                achievement.title.clone().unwrap_or_default(),
                achievement
                    .icon
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            ),
        };

        let title = achievement
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or(type_name);

        Self {
            title,
            icon,
            description: achievement.description.clone(),
            score_reward: achievement.score_reward,
            unlocked_at: achievement.unlocked_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementsView {
    pub achievements: Vec<Achievement>,
}

impl AchievementsView {
    pub async fn load(source: &dyn DataSource) -> Self {
        Self {
            achievements: or_default(source.fetch_achievements().await, "achievements"),
        }
    }

    pub fn badges(&self) -> Vec<AchievementBadge> {
        self.achievements.iter().map(AchievementBadge::from).collect()
    }

    /// Sum of score rewarded across all achievements
    pub fn total_reward(&self) -> u64 {
        self.achievements.iter().map(|a| a.score_reward).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockSource};

    fn achievement(kind: &str, title: Option<&str>, icon: Option<&str>) -> Achievement {
        Achievement {
            id: format!("ach-{}", kind),
            kind: kind.to_string(),
            title: title.map(str::to_string),
            description: None,
            icon: icon.map(str::to_string),
            score_reward: 50,
            unlocked_at: None,
        }
    }

    #[test]
    fn test_known_kind_uses_table_icon() {
        let badge = AchievementBadge::from(&achievement("streak_7", None, Some("x")));
        assert_eq!(badge.title, "Week Warrior");
        assert_eq!(badge.icon, "🔥");
    }

    #[test]
    fn test_own_title_wins() {
        let badge = AchievementBadge::from(&achievement("first_course", Some("Welcome aboard"), None));
        assert_eq!(badge.title, "Welcome aboard");
        assert_eq!(badge.icon, "🎯");
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let badge = AchievementBadge::from(&achievement("mystery", Some("Hidden Gem"), Some("💎")));
        assert_eq!(badge.title, "Hidden Gem");
        assert_eq!(badge.icon, "💎");

        let bare = AchievementBadge::from(&achievement("mystery", None, None));
        assert_eq!(bare.title, "");
        assert_eq!(bare.icon, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn test_load_and_totals() {
        let source = MockSource::new().with_achievements(vec![
            achievement("streak_7", None, None),
            achievement("xp_1000", None, None),
        ]);
        let view = AchievementsView::load(&source).await;

        assert_eq!(view.badges().len(), 2);
        assert_eq!(view.total_reward(), 100);
    }

    #[tokio::test]
    async fn test_load_failure_is_empty() {
        let source = MockSource::new().failing(Endpoint::Achievements);
        let view = AchievementsView::load(&source).await;
        assert!(view.achievements.is_empty());
    }
}
