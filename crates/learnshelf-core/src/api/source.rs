use async_trait::async_trait;
use thiserror::Error;

use crate::models::Course;

use super::ApiError;

/// Failure of the fetch capability, carrying a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        Self::new(err.to_string())
    }
}

/// Something that can produce the current course list.
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_is_display() {
        let err = FetchError::new("timeout");
        assert_eq!(err.message(), "timeout");
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn test_from_api_error() {
        let err: FetchError = ApiError::RateLimited.into();
        assert_eq!(
            err.message(),
            "Course service is rate limiting requests - please wait before retrying"
        );
    }
}
