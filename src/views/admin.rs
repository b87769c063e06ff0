//! Admin console: platform stats, community approval and course management

use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::CatalogMode;
use crate::client::ApiClient;
use crate::forms::CourseForm;
use crate::notice::Notice;
use crate::source::DataSource;
use crate::types::{AdminStats, Community, Course, CourseRegistrations};

use super::{or_absent, or_default};

pub struct AdminConsole {
    client: Arc<ApiClient>,
    pub stats: AdminStats,
    pub pending: Vec<Community>,
    /// Every course, active or not
    pub courses: Vec<Course>,
}

impl AdminConsole {
    pub async fn load(client: Arc<ApiClient>) -> Self {
        let mut console = Self {
            client,
            stats: AdminStats::default(),
            pending: Vec::new(),
            courses: Vec::new(),
        };
        console.refresh().await;
        console
    }

    /// Re-fetch stats, pending communities and courses
    pub async fn refresh(&mut self) {
        let (stats, pending, courses) = futures::join!(
            self.client.fetch_admin_stats(),
            self.client.fetch_pending_communities(),
            self.client.fetch_courses(CatalogMode::All),
        );

        self.stats = or_default(stats, "admin stats");
        self.pending = or_default(pending, "pending communities");
        self.courses = or_default(courses, "courses");
    }

    pub async fn approve_community(&mut self, id: &str) -> Notice {
        match self.client.approve_community(id).await {
            Ok(()) => {
                self.pending.retain(|c| c.id != id);
                info!("Approved community {}", id);
                self.refresh().await;
                Notice::success("Community approved!")
            }
            Err(e) => {
                warn!("Approve {} failed: {}", id, e);
                Notice::error("Failed to approve community")
            }
        }
    }

    pub async fn delete_course(&mut self, id: &str) -> Notice {
        match self.client.delete_course(id).await {
            Ok(()) => {
                self.courses.retain(|c| c.id != id);
                info!("Deleted course {}", id);
                self.refresh().await;
                Notice::success("Course deleted successfully!")
            }
            Err(e) => {
                warn!("Delete {} failed: {}", id, e);
                Notice::error("Failed to delete course")
            }
        }
    }

    /// Create or update depending on whether the form is editing.
    ///
    /// Invalid forms are reported without sending anything.
    pub async fn save_course(&mut self, form: &CourseForm) -> Notice {
        let input = match form.validate() {
            Ok(input) => input,
            Err(e) => return Notice::error(e.to_string()),
        };

        let (result, success) = match &form.editing {
            Some(id) => (
                self.client.update_course(id, &input).await,
                "Course updated successfully!",
            ),
            None => (
                self.client.create_course(&input).await,
                "Course created successfully!",
            ),
        };

        match result {
            Ok(_) => {
                info!("Saved course {}", input.title);
                self.refresh().await;
                Notice::success(success)
            }
            Err(e) => {
                warn!("Save course failed: {}", e);
                Notice::error("Failed to save course")
            }
        }
    }

    /// Per-course and per-category registration counts
    pub async fn course_registrations(&self) -> Option<CourseRegistrations> {
        or_absent(
            self.client.fetch_course_registrations().await,
            "course registrations",
        )
    }
}
