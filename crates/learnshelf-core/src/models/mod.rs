//! Data models for the course library.
//!
//! - `Course`: a learning unit with descriptive metadata
//! - `CourseModule`: one ordered section of a course

pub mod course;

pub use course::{Course, CourseModule};
