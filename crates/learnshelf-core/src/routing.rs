//! What tapping a course card does.

use crate::models::Course;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapAction {
    /// Navigate to the detail screen for this course id.
    OpenDetail(String),
    /// Stay put and show a transient notice.
    Notice(String),
}

/// Courses with at least one module open their detail screen; the rest only
/// get a notice.
pub fn route_tap(course: &Course) -> TapAction {
    if course.has_modules() {
        TapAction::OpenDetail(course.id.clone())
    } else {
        TapAction::Notice(format!("{} has no modules yet", course.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseModule;

    fn course(modules: Vec<CourseModule>) -> Course {
        Course {
            id: "rust-101".to_string(),
            title: "Rust 101".to_string(),
            description: None,
            instructor: None,
            thumbnail_url: None,
            level: None,
            duration_minutes: None,
            modules,
        }
    }

    #[test]
    fn test_course_with_modules_opens_detail() {
        let c = course(vec![CourseModule {
            id: "m".to_string(),
            title: "Getting started".to_string(),
            summary: None,
            lesson_count: 4,
        }]);
        assert_eq!(route_tap(&c), TapAction::OpenDetail("rust-101".to_string()));
    }

    #[test]
    fn test_course_without_modules_shows_notice() {
        assert_eq!(
            route_tap(&course(vec![])),
            TapAction::Notice("Rust 101 has no modules yet".to_string())
        );
    }
}
