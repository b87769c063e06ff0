//! Client core for the CareerPath learning platform
//!
//! Turns raw progress into levels, filters the course and community
//! catalogs, and tracks which courses the learner has started.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use careerpath_client::{ApiClient, AppConfig, CoursesView, DataSource, EngageOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load("careerpath.toml")?;
//! let source: Arc<dyn DataSource> = Arc::new(ApiClient::new(config.api.clone())?);
//!
//! let mut courses = CoursesView::load(source, &config).await;
//! courses.set_search("python");
//!
//! if let Some(card) = courses.cards().into_iter().find(|c| c.action.is_enabled()) {
//!     if let EngageOutcome::Rejected(notice) = courses.engage(&card.course.id).await {
//!         eprintln!("{}", notice);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod leveling;
pub mod membership;
pub mod notice;
pub mod source;
pub mod types;
pub mod views;

// Re-export main types
pub use catalog::{filter, CatalogEntry, CatalogItem, CatalogKind, CatalogMode, FilterCriteria};
pub use client::{ApiClient, CourseInput};
pub use config::{ApiSettings, AppConfig, EngagementDefaults, ViewSettings};
pub use error::{ClientError, Result};
pub use forms::{CourseForm, ProfileForm, TagList};
pub use leveling::{compute_level, LevelSummary, LevelThresholds};
pub use membership::{ActionState, DerivedMembership, EngageOutcome};
pub use notice::{Notice, NoticeLevel};
pub use source::{DataSource, Endpoint, MockSource};
pub use types::*;
pub use views::{
    AchievementsView, AdminConsole, CommunitiesView, CoursesView, DashboardView, ProfileView,
    ProgressView, ViewScope,
};
