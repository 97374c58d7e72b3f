//! HTTP client for the course service.
//!
//! This module provides the `ApiClient` struct, the production
//! `CourseSource` used by the load sequencer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Course;

use super::{ApiError, CourseSource, FetchError};

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for the course service.
pub const DEFAULT_API_BASE_URL: &str = "https://api.learnshelf.app/v1";

/// HTTP request timeout in seconds.
/// The sequencer enforces no timeout of its own, so this bounds a load cycle.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The service has returned both shapes over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoursesResponse {
    List(Vec<Course>),
    Wrapped { courses: Vec<Course> },
}

impl CoursesResponse {
    fn into_courses(self) -> Vec<Course> {
        match self {
            CoursesResponse::List(courses) => courses,
            CoursesResponse::Wrapped { courses } => courses,
        }
    }
}

/// API client for the course service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn courses_url(&self) -> String {
        format!("{}/courses", self.base_url)
    }

    fn headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    fn parse_courses(body: &str) -> Result<Vec<Course>, ApiError> {
        serde_json::from_str::<CoursesResponse>(body)
            .map(CoursesResponse::into_courses)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse course list: {}", e)))
    }

    /// Fetch the full course list
    pub async fn fetch_course_list(&self) -> Result<Vec<Course>, ApiError> {
        let url = self.courses_url();
        debug!(url = %url, "Fetching course list");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        let courses = Self::parse_courses(&text)?;

        debug!(count = courses.len(), "Course list received");
        Ok(courses)
    }
}

#[async_trait]
impl CourseSource for ApiClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        self.fetch_course_list().await.map_err(|e| {
            warn!(error = %e, "Course fetch failed");
            to_fetch_error(e)
        })
    }
}

/// User-facing fetch failure for an API error. Request timeouts read as
/// plain "timeout".
fn to_fetch_error(err: ApiError) -> FetchError {
    match err {
        ApiError::NetworkError(ref inner) if inner.is_timeout() => FetchError::new("timeout"),
        other => other.into(),
    }
}
