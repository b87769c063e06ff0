//! Screen-level state assembled from the data source
//!
//! Each view loads its data in one concurrent batch. Batch members fail
//! independently: a failed fetch logs a warning and leaves that part of the
//! view at its empty default while the rest still renders. Wrap a load in
//! [`ViewScope::run`] to drop results that settle after the view is gone.

pub mod achievements;
pub mod admin;
pub mod communities;
pub mod courses;
pub mod dashboard;
pub mod profile;
pub mod progress;
pub mod scope;

pub use achievements::{AchievementBadge, AchievementsView};
pub use admin::AdminConsole;
pub use communities::CommunitiesView;
pub use courses::{CourseCard, CoursesView};
pub use dashboard::DashboardView;
pub use profile::ProfileView;
pub use progress::{ActivityEntry, ProgressView};
pub use scope::ViewScope;

use tracing::warn;

use crate::error::Result;

/// Unwrap a batch member, logging and defaulting on failure
pub(crate) fn or_default<T: Default>(result: Result<T>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to fetch {}: {}", what, e);
        T::default()
    })
}

/// Like [`or_default`] but keeps absence visible
pub(crate) fn or_absent<T>(result: Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            None
        }
    }
}
