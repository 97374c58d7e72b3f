use serde::{Deserialize, Serialize};

/// A course as returned by the course service and stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(rename = "durationMinutes", default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CourseModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "lessonCount", default)]
    pub lesson_count: u32,
}

impl Course {
    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }

    pub fn total_lessons(&self) -> u32 {
        self.modules.iter().map(|m| m.lesson_count).sum()
    }

    pub fn display_module_count(&self) -> String {
        match self.modules.len() {
            0 => "No modules".to_string(),
            1 => "1 module".to_string(),
            n => format!("{} modules", n),
        }
    }

    /// Duration as "45m" or "2h 10m"; "Self-paced" when unknown.
    pub fn display_duration(&self) -> String {
        match self.duration_minutes {
            None | Some(0) => "Self-paced".to_string(),
            Some(m) if m < 60 => format!("{}m", m),
            Some(m) if m % 60 == 0 => format!("{}h", m / 60),
            Some(m) => format!("{}h {}m", m / 60, m % 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_with(duration: Option<u32>, modules: Vec<CourseModule>) -> Course {
        Course {
            id: "c1".to_string(),
            title: "Rust Basics".to_string(),
            description: None,
            instructor: None,
            thumbnail_url: None,
            level: None,
            duration_minutes: duration,
            modules,
        }
    }

    fn module(id: &str, lessons: u32) -> CourseModule {
        CourseModule {
            id: id.to_string(),
            title: format!("Module {}", id),
            summary: None,
            lesson_count: lessons,
        }
    }

    #[test]
    fn test_parse_wire_format() {
        let json = r#"{
            "id": "42",
            "title": "Ownership",
            "thumbnailUrl": "https://cdn.example.com/42.png",
            "durationMinutes": 90,
            "modules": [
                {"id": "m1", "title": "Moves", "lessonCount": 3},
                {"id": "m2", "title": "Borrows", "summary": "Shared and unique"}
            ]
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, "42");
        assert_eq!(course.thumbnail_url.as_deref(), Some("https://cdn.example.com/42.png"));
        assert_eq!(course.duration_minutes, Some(90));
        assert_eq!(course.modules.len(), 2);
        assert_eq!(course.modules[0].lesson_count, 3);
        assert_eq!(course.modules[1].lesson_count, 0);
        assert_eq!(course.modules[1].summary.as_deref(), Some("Shared and unique"));
        assert!(course.description.is_none());
    }

    #[test]
    fn test_missing_modules_defaults_to_empty() {
        let course: Course = serde_json::from_str(r#"{"id": "1", "title": "Intro"}"#).unwrap();
        assert!(course.modules.is_empty());
        assert!(!course.has_modules());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        assert!(serde_json::from_str::<Course>(r#"{"id": "1"}"#).is_err());
    }

    #[test]
    fn test_display_duration() {
        assert_eq!(course_with(None, vec![]).display_duration(), "Self-paced");
        assert_eq!(course_with(Some(45), vec![]).display_duration(), "45m");
        assert_eq!(course_with(Some(120), vec![]).display_duration(), "2h");
        assert_eq!(course_with(Some(130), vec![]).display_duration(), "2h 10m");
    }

    #[test]
    fn test_module_count_and_lessons() {
        let course = course_with(None, vec![module("a", 2), module("b", 5)]);
        assert_eq!(course.display_module_count(), "2 modules");
        assert_eq!(course.total_lessons(), 7);
        assert_eq!(course_with(None, vec![module("a", 1)]).display_module_count(), "1 module");
        assert_eq!(course_with(None, vec![]).display_module_count(), "No modules");
    }
}
