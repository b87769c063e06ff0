//! The `DataSource` trait - the remote API as seen by views.

use async_trait::async_trait;

use crate::catalog::{CatalogItem, CatalogKind, CatalogMode};
use crate::error::Result;
use crate::types::{
    Achievement, AnalyticsSummary, Community, Course, EngagementRequest, ProgressRecord,
    ScoreStats,
};

/// Read and mutation endpoints the view layer depends on.
///
/// Implemented by [`ApiClient`](crate::client::ApiClient) over HTTP and by
/// [`MockSource`](super::MockSource) for tests.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Aggregate stats for the signed-in user.
    async fn fetch_stats(&self) -> Result<ScoreStats>;

    /// Courses, recommended or all.
    async fn fetch_courses(&self, mode: CatalogMode) -> Result<Vec<Course>>;

    /// Communities, recommended or all approved.
    ///
    /// An empty recommended list means "no personalised picks"; callers
    /// retry with [`CatalogMode::All`].
    async fn fetch_communities(&self, mode: CatalogMode) -> Result<Vec<Community>>;

    /// Every progress record for the signed-in user.
    async fn fetch_progress_records(&self) -> Result<Vec<ProgressRecord>>;

    /// Record engagement with a catalog entry.
    async fn submit_engagement(&self, request: &EngagementRequest) -> Result<()>;

    /// Weekly and monthly aggregates.
    async fn fetch_analytics_summary(&self) -> Result<AnalyticsSummary>;

    /// Achievements unlocked by the signed-in user.
    async fn fetch_achievements(&self) -> Result<Vec<Achievement>>;

    /// Records and stats together, each succeeding or failing on its own.
    ///
    /// Override when the backend serves both from one request.
    async fn fetch_progress_snapshot(&self) -> (Result<Vec<ProgressRecord>>, Result<ScoreStats>) {
        futures::join!(self.fetch_progress_records(), self.fetch_stats())
    }

    /// Either catalog as a uniform list.
    async fn fetch_catalog(&self, kind: CatalogKind, mode: CatalogMode) -> Result<Vec<CatalogItem>> {
        Ok(match kind {
            CatalogKind::Course => self
                .fetch_courses(mode)
                .await?
                .into_iter()
                .map(CatalogItem::Course)
                .collect(),
            CatalogKind::Community => self
                .fetch_communities(mode)
                .await?
                .into_iter()
                .map(CatalogItem::Community)
                .collect(),
        })
    }
}
