use crate::models::Course;

/// What the course screen should currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded(Vec<Course>),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Courses to display; empty for every state but `Loaded`.
    pub fn courses(&self) -> &[Course] {
        match self {
            LoadState::Loaded(courses) => courses,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// True for a completed load that produced no courses.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, LoadState::Loaded(courses) if courses.is_empty())
    }
}
