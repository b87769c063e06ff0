//! In-memory data source for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use super::traits::DataSource;
use crate::catalog::CatalogMode;
use crate::error::{ClientError, Result};
use crate::types::{
    Achievement, AnalyticsSummary, Community, Course, EngagementRequest, ProgressRecord,
    ScoreStats,
};

/// Endpoints the mock can fail or count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stats,
    RecommendedCourses,
    AllCourses,
    RecommendedCommunities,
    AllCommunities,
    ProgressRecords,
    Engagement,
    Analytics,
    Achievements,
}

impl Endpoint {
    const ALL: [Endpoint; 9] = [
        Endpoint::Stats,
        Endpoint::RecommendedCourses,
        Endpoint::AllCourses,
        Endpoint::RecommendedCommunities,
        Endpoint::AllCommunities,
        Endpoint::ProgressRecords,
        Endpoint::Engagement,
        Endpoint::Analytics,
        Endpoint::Achievements,
    ];
}

/// Mock data source.
///
/// Serves fixed data, fails configured endpoints with a 503, counts calls,
/// and can hold engagement submissions open until released.
pub struct MockSource {
    stats: ScoreStats,
    courses: HashMap<CatalogMode, Vec<Course>>,
    communities: HashMap<CatalogMode, Vec<Community>>,
    progress: Vec<ProgressRecord>,
    analytics: AnalyticsSummary,
    achievements: Vec<Achievement>,
    failing: HashSet<Endpoint>,
    calls: HashMap<Endpoint, AtomicU32>,
    gate: Option<Arc<Notify>>,
    rejection: Mutex<Option<Option<String>>>,
    engaged: Mutex<HashSet<String>>,
    submissions: Mutex<Vec<EngagementRequest>>,
}

impl MockSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self {
            stats: ScoreStats::default(),
            courses: HashMap::new(),
            communities: HashMap::new(),
            progress: Vec::new(),
            analytics: AnalyticsSummary::default(),
            achievements: Vec::new(),
            failing: HashSet::new(),
            calls: Endpoint::ALL.into_iter().map(|e| (e, AtomicU32::new(0))).collect(),
            gate: None,
            rejection: Mutex::new(None),
            engaged: Mutex::new(HashSet::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stats(mut self, stats: ScoreStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_courses(mut self, mode: CatalogMode, courses: Vec<Course>) -> Self {
        self.courses.insert(mode, courses);
        self
    }

    pub fn with_communities(mut self, mode: CatalogMode, communities: Vec<Community>) -> Self {
        self.communities.insert(mode, communities);
        self
    }

    /// Seed progress records; their course ids count as already engaged.
    pub fn with_progress(mut self, records: Vec<ProgressRecord>) -> Self {
        let ids = records
            .iter()
            .filter_map(|r| r.course_identifier().map(str::to_string));
        lock(&self.engaged).extend(ids);
        self.progress = records;
        self
    }

    pub fn with_analytics(mut self, analytics: AnalyticsSummary) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_achievements(mut self, achievements: Vec<Achievement>) -> Self {
        self.achievements = achievements;
        self
    }

    /// Make an endpoint fail with a server error.
    pub fn failing(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    /// Hold every engagement submission until [`release`](Self::release) is called.
    pub fn with_gate(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held submission complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Reject subsequent submissions, optionally with a reason.
    pub fn reject_engagements(&self, reason: Option<&str>) {
        *lock(&self.rejection) = Some(reason.map(str::to_string));
    }

    /// Accept subsequent submissions again.
    pub fn accept_engagements(&self) {
        *lock(&self.rejection) = None;
    }

    /// Number of times an endpoint was called.
    pub fn call_count(&self, endpoint: Endpoint) -> u32 {
        self.calls
            .get(&endpoint)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Every engagement request received, including rejected ones.
    pub fn submissions(&self) -> Vec<EngagementRequest> {
        lock(&self.submissions).clone()
    }

    fn hit(&self, endpoint: Endpoint) -> Result<()> {
        if let Some(counter) = self.calls.get(&endpoint) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        if self.failing.contains(&endpoint) {
            return Err(ClientError::Server {
                status: 503,
                message: format!("{:?} unavailable", endpoint),
            });
        }
        Ok(())
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch_stats(&self) -> Result<ScoreStats> {
        self.hit(Endpoint::Stats)?;
        Ok(self.stats)
    }

    async fn fetch_courses(&self, mode: CatalogMode) -> Result<Vec<Course>> {
        self.hit(match mode {
            CatalogMode::Recommended => Endpoint::RecommendedCourses,
            CatalogMode::All => Endpoint::AllCourses,
        })?;
        Ok(self.courses.get(&mode).cloned().unwrap_or_default())
    }

    async fn fetch_communities(&self, mode: CatalogMode) -> Result<Vec<Community>> {
        self.hit(match mode {
            CatalogMode::Recommended => Endpoint::RecommendedCommunities,
            CatalogMode::All => Endpoint::AllCommunities,
        })?;
        Ok(self.communities.get(&mode).cloned().unwrap_or_default())
    }

    async fn fetch_progress_records(&self) -> Result<Vec<ProgressRecord>> {
        self.hit(Endpoint::ProgressRecords)?;
        Ok(self.progress.clone())
    }

    async fn submit_engagement(&self, request: &EngagementRequest) -> Result<()> {
        self.hit(Endpoint::Engagement)?;
        lock(&self.submissions).push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(reason) = lock(&self.rejection).clone() {
            return Err(ClientError::Rejected { status: 400, reason });
        }

        if !lock(&self.engaged).insert(request.entry_id.clone()) {
            return Err(ClientError::Rejected {
                status: 400,
                reason: Some("Course already in progress".to_string()),
            });
        }
        Ok(())
    }

    async fn fetch_analytics_summary(&self) -> Result<AnalyticsSummary> {
        self.hit(Endpoint::Analytics)?;
        Ok(self.analytics)
    }

    async fn fetch_achievements(&self) -> Result<Vec<Achievement>> {
        self.hit(Endpoint::Achievements)?;
        Ok(self.achievements.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_and_fails() {
        let source = MockSource::new()
            .with_stats(ScoreStats { total_score: 40, ..Default::default() })
            .failing(Endpoint::Analytics);

        assert_eq!(source.fetch_stats().await.unwrap().total_score, 40);
        assert!(source.fetch_analytics_summary().await.is_err());
        assert_eq!(source.call_count(Endpoint::Stats), 1);
        assert_eq!(source.call_count(Endpoint::Analytics), 1);
        assert_eq!(source.call_count(Endpoint::Engagement), 0);
    }

    #[tokio::test]
    async fn test_mock_rejects_duplicate_engagement() {
        let source = MockSource::new();
        let request = EngagementRequest {
            entry_id: "course-1".into(),
            score_increment: 10,
            time_spent_minutes: 30,
        };

        assert!(source.submit_engagement(&request).await.is_ok());
        let err = source.submit_engagement(&request).await.unwrap_err();
        assert_eq!(err.rejection_reason(), Some("Course already in progress"));
        assert_eq!(source.submissions().len(), 2);
    }
}
