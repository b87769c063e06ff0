//! Progress history and period analytics

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::leveling::LevelSummary;
use crate::source::DataSource;
use crate::types::{AnalyticsSummary, ProgressRecord, ScoreStats};

use super::{or_absent, or_default};

/// One line of the recent activity list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub label: String,
    pub score_gained: u64,
    pub time_spent_minutes: u64,
    pub at: Option<DateTime<Utc>>,
}

impl From<&ProgressRecord> for ActivityEntry {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            label: record.activity_label().to_string(),
            score_gained: record.score_gained,
            time_spent_minutes: record.time_spent_minutes,
            at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub records: Vec<ProgressRecord>,
    pub stats: ScoreStats,
    pub level: LevelSummary,
    /// Absent when the analytics request failed
    pub analytics: Option<AnalyticsSummary>,
    recent_limit: usize,
}

impl ProgressView {
    pub async fn load(source: &dyn DataSource, config: &AppConfig) -> Self {
        let ((records, stats), analytics) = futures::join!(
            source.fetch_progress_snapshot(),
            source.fetch_analytics_summary(),
        );

        let records = or_default(records, "progress records");
        let stats: ScoreStats = or_default(stats, "stats");
        Self {
            level: LevelSummary::from_stats(&stats, &config.leveling.thresholds),
            records,
            stats,
            analytics: or_absent(analytics, "analytics"),
            recent_limit: config.views.recent_activity_limit,
        }
    }

    /// First records as served, capped at the configured limit
    pub fn recent_activity(&self) -> Vec<ActivityEntry> {
        self.records
            .iter()
            .take(self.recent_limit)
            .map(ActivityEntry::from)
            .collect()
    }
}
