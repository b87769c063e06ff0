//! Wire types for the CareerPath REST API
//!
//! Field names follow the server's JSON (`_id`, camelCase). Collections and
//! counters default when the server omits them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate per-user metrics returned alongside progress records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStats {
    /// Cumulative experience points
    #[serde(rename = "totalXP", default)]
    pub total_score: u64,
    /// Consecutive active days
    #[serde(rename = "streak", default)]
    pub streak_days: u64,
    /// Completed catalog entries
    #[serde(rename = "completedCount", default)]
    pub completed_count: u64,
    /// Total learning time in minutes
    #[serde(rename = "totalTime", default)]
    pub total_time_minutes: u64,
}

impl ScoreStats {
    /// Total learning time in whole hours, rounded half-up
    pub fn total_hours(&self) -> u64 {
        minutes_to_hours(self.total_time_minutes)
    }
}

/// Convert minutes to whole hours, rounding half-up
pub fn minutes_to_hours(minutes: u64) -> u64 {
    minutes.saturating_add(30) / 60
}

/// Closed set of catalog categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Digital Marketing")]
    DigitalMarketing,
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    #[serde(rename = "Project Management")]
    ProjectManagement,
    #[serde(rename = "Business Analysis")]
    BusinessAnalysis,
    #[serde(rename = "DevOps")]
    DevOps,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Career Transition")]
    CareerTransition,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::WebDevelopment,
        Category::DataScience,
        Category::AiMl,
        Category::Cybersecurity,
        Category::CloudComputing,
        Category::DigitalMarketing,
        Category::UiUxDesign,
        Category::ProjectManagement,
        Category::BusinessAnalysis,
        Category::DevOps,
        Category::MobileDevelopment,
        Category::CareerTransition,
        Category::Other,
    ];

    /// Display label, identical to the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::DataScience => "Data Science",
            Self::AiMl => "AI/ML",
            Self::Cybersecurity => "Cybersecurity",
            Self::CloudComputing => "Cloud Computing",
            Self::DigitalMarketing => "Digital Marketing",
            Self::UiUxDesign => "UI/UX Design",
            Self::ProjectManagement => "Project Management",
            Self::BusinessAnalysis => "Business Analysis",
            Self::DevOps => "DevOps",
            Self::MobileDevelopment => "Mobile Development",
            Self::CareerTransition => "Career Transition",
            Self::Other => "Other",
        }
    }

    /// Parse from the display label (exact, case-sensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Course difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub level: CourseLevel,
    /// Duration in hours
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A community in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_approved: Option<bool>,
}

/// Reference to a catalog entry inside a progress record.
///
/// The server sends either the bare identifier or the populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryRef {
    Id(String),
    Expanded {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl EntryRef {
    pub fn id(&self) -> &str {
        match self {
            EntryRef::Id(id) => id,
            EntryRef::Expanded { id, .. } => id,
        }
    }

    /// Course title or community name, when the reference was populated
    pub fn label(&self) -> Option<&str> {
        match self {
            EntryRef::Id(_) => None,
            EntryRef::Expanded { title, name, .. } => title.as_deref().or(name.as_deref()),
        }
    }
}

/// One recorded unit of learning activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub course_id: Option<EntryRef>,
    #[serde(default)]
    pub community_id: Option<EntryRef>,
    #[serde(rename = "xpGained", default)]
    pub score_gained: u64,
    #[serde(rename = "timeSpent", default)]
    pub time_spent_minutes: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Identifier of the course this record counts toward, if any
    pub fn course_identifier(&self) -> Option<&str> {
        self.course_id.as_ref().map(EntryRef::id)
    }

    /// Label shown in activity lists
    pub fn activity_label(&self) -> &str {
        self.course_id
            .as_ref()
            .and_then(EntryRef::label)
            .or_else(|| self.community_id.as_ref().and_then(EntryRef::label))
            .unwrap_or("Activity")
    }
}

/// Body of the engagement mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRequest {
    #[serde(rename = "courseId")]
    pub entry_id: String,
    #[serde(rename = "xpGained")]
    pub score_increment: u64,
    #[serde(rename = "timeSpent")]
    pub time_spent_minutes: u64,
}

/// Aggregates over one reporting period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    #[serde(rename = "xp", default)]
    pub score: u64,
    #[serde(rename = "time", default)]
    pub time_minutes: u64,
    #[serde(default)]
    pub activities: u64,
}

impl PeriodAggregate {
    pub fn hours(&self) -> u64 {
        minutes_to_hours(self.time_minutes)
    }
}

/// Weekly and monthly activity aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub weekly: PeriodAggregate,
    #[serde(default)]
    pub monthly: PeriodAggregate,
}

/// An unlocked achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "xpReward", default)]
    pub score_reward: u64,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Platform-wide counters for the admin console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_courses: u64,
    pub total_communities: u64,
    pub pending_communities: u64,
    pub total_progress: u64,
    pub total_achievements: u64,
}

/// Course registration analytics for the admin console
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRegistrations {
    pub summary: RegistrationSummary,
    pub courses: Vec<CourseRegistration>,
    pub categories: Vec<CategoryRegistration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationSummary {
    pub total_courses: u64,
    pub total_registrations: u64,
    pub total_unique_users: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRegistration {
    pub course_id: String,
    pub course_title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub total_registrations: u64,
    #[serde(default)]
    pub unique_users: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRegistration {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub course_count: u64,
    #[serde(default)]
    pub total_registrations: u64,
    #[serde(default)]
    pub unique_users: u64,
}

/// How the learner likes to study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPreferences {
    pub pace: String,
    pub format: Vec<String>,
    pub duration: String,
}

impl Default for LearningPreferences {
    fn default() -> Self {
        Self {
            pace: "moderate".to_string(),
            format: vec!["video".to_string()],
            duration: "medium".to_string(),
        }
    }
}

/// The signed-in user's profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub preferred_industries: Vec<String>,
    #[serde(default)]
    pub learning_preferences: LearningPreferences,
}
