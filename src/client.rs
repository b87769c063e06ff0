//! HTTP client for the CareerPath REST API

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::CatalogMode;
use crate::config::ApiSettings;
use crate::error::{ClientError, Result};
use crate::source::DataSource;
use crate::types::*;

/// HTTP client for the CareerPath API
///
/// # Example
///
/// ```rust,no_run
/// use careerpath_client::{ApiClient, ApiSettings, CatalogMode, DataSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ApiSettings {
///     base_url: "http://localhost:5000/api".into(),
///     token: Some("jwt".into()),
///     ..Default::default()
/// })?;
///
/// let courses = client.fetch_courses(CatalogMode::Recommended).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    settings: ApiSettings,
    client: Client,
}

// Response envelopes. The server wraps every payload in a named field.

#[derive(Deserialize)]
struct ProgressEnvelope {
    #[serde(default)]
    progress: Vec<ProgressRecord>,
    #[serde(default)]
    stats: ScoreStats,
}

#[derive(Deserialize)]
struct CoursesEnvelope {
    #[serde(default)]
    courses: Vec<Course>,
}

#[derive(Deserialize)]
struct CourseEnvelope {
    course: Course,
}

#[derive(Deserialize)]
struct CommunitiesEnvelope {
    #[serde(default)]
    communities: Vec<Community>,
}

#[derive(Deserialize)]
struct AnalyticsEnvelope {
    #[serde(default)]
    analytics: AnalyticsSummary,
}

#[derive(Deserialize)]
struct AchievementsEnvelope {
    #[serde(default)]
    achievements: Vec<Achievement>,
}

#[derive(Deserialize)]
struct AdminStatsEnvelope {
    #[serde(default)]
    stats: AdminStats,
}

#[derive(Deserialize)]
struct RegistrationsEnvelope {
    #[serde(default)]
    data: CourseRegistrations,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Course payload for create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub level: CourseLevel,
    pub duration: f64,
    pub skills: Vec<String>,
    pub tags: Vec<String>,
    pub url: String,
    pub is_active: bool,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = settings.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::Config(format!("invalid API token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    /// Send a mutation; non-success statuses become `Rejected`
    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty());
        Err(ClientError::Rejected { status, reason })
    }

    // ==================== Progress ====================

    /// Progress records and stats from a single request
    pub async fn fetch_progress(&self) -> Result<(Vec<ProgressRecord>, ScoreStats)> {
        let envelope: ProgressEnvelope = self.get("/progress").await?;
        Ok((envelope.progress, envelope.stats))
    }

    // ==================== Admin ====================

    pub async fn fetch_admin_stats(&self) -> Result<AdminStats> {
        let envelope: AdminStatsEnvelope = self.get("/admin/stats").await?;
        Ok(envelope.stats)
    }

    /// Communities awaiting approval
    pub async fn fetch_pending_communities(&self) -> Result<Vec<Community>> {
        let envelope: CommunitiesEnvelope = self.get("/communities/pending").await?;
        Ok(envelope.communities)
    }

    pub async fn approve_community(&self, id: &str) -> Result<()> {
        let path = format!("/communities/{}/approve", urlencoding::encode(id));
        self.mutate::<()>(Method::PUT, &path, None).await?;
        Ok(())
    }

    pub async fn create_course(&self, input: &CourseInput) -> Result<Option<Course>> {
        let response = self.mutate(Method::POST, "/courses", Some(input)).await?;
        Ok(response.json::<CourseEnvelope>().await.ok().map(|e| e.course))
    }

    pub async fn update_course(&self, id: &str, input: &CourseInput) -> Result<Option<Course>> {
        let path = format!("/courses/{}", urlencoding::encode(id));
        let response = self.mutate(Method::PUT, &path, Some(input)).await?;
        Ok(response.json::<CourseEnvelope>().await.ok().map(|e| e.course))
    }

    pub async fn delete_course(&self, id: &str) -> Result<()> {
        let path = format!("/courses/{}", urlencoding::encode(id));
        self.mutate::<()>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    pub async fn fetch_course_registrations(&self) -> Result<CourseRegistrations> {
        let envelope: RegistrationsEnvelope =
            self.get("/admin/analytics/course-registrations").await?;
        Ok(envelope.data)
    }

    // ==================== Profile ====================

    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        let envelope: UserEnvelope = self.get("/users/profile").await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        let response = self.mutate(Method::PUT, "/users/profile", Some(profile)).await?;
        let envelope: UserEnvelope = response.json().await?;
        Ok(envelope.user)
    }

    // ==================== Helper Methods ====================

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(response.url().path().to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status,
                message: body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch_stats(&self) -> Result<ScoreStats> {
        let (_, stats) = self.fetch_progress().await?;
        Ok(stats)
    }

    async fn fetch_courses(&self, mode: CatalogMode) -> Result<Vec<Course>> {
        let path = match mode {
            CatalogMode::Recommended => "/courses/recommendations",
            CatalogMode::All => "/courses",
        };
        let envelope: CoursesEnvelope = self.get(path).await?;
        Ok(envelope.courses)
    }

    async fn fetch_communities(&self, mode: CatalogMode) -> Result<Vec<Community>> {
        let path = match mode {
            CatalogMode::Recommended => "/communities/recommendations",
            CatalogMode::All => "/communities",
        };
        let envelope: CommunitiesEnvelope = self.get(path).await?;
        Ok(envelope.communities)
    }

    async fn fetch_progress_records(&self) -> Result<Vec<ProgressRecord>> {
        let (records, _) = self.fetch_progress().await?;
        Ok(records)
    }

    async fn submit_engagement(&self, request: &EngagementRequest) -> Result<()> {
        self.mutate(Method::POST, "/progress", Some(request)).await?;
        Ok(())
    }

    async fn fetch_analytics_summary(&self) -> Result<AnalyticsSummary> {
        let envelope: AnalyticsEnvelope = self.get("/progress/analytics").await?;
        Ok(envelope.analytics)
    }

    async fn fetch_achievements(&self) -> Result<Vec<Achievement>> {
        let envelope: AchievementsEnvelope = self.get("/progress/achievements").await?;
        Ok(envelope.achievements)
    }

    async fn fetch_progress_snapshot(&self) -> (Result<Vec<ProgressRecord>>, Result<ScoreStats>) {
        match self.fetch_progress().await {
            Ok((records, stats)) => (Ok(records), Ok(stats)),
            Err(e) => {
                let echoed = echo(&e);
                (Err(e), Err(echoed))
            }
        }
    }
}

/// Copy of a failure for a second member served by the same request
fn echo(err: &ClientError) -> ClientError {
    match err {
        ClientError::NotFound(path) => ClientError::NotFound(path.clone()),
        ClientError::Server { status, message } => ClientError::Server {
            status: *status,
            message: message.clone(),
        },
        other => ClientError::Server {
            status: 0,
            message: other.to_string(),
        },
    }
}
