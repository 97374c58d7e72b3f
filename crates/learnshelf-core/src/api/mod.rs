//! Course service access.
//!
//! `CourseSource` is the one capability the load sequencer needs: fetch the
//! course list. `ApiClient` implements it against the course REST service.

pub mod client;
pub mod error;
pub mod source;

pub use client::ApiClient;
pub use error::ApiError;
pub use source::{CourseSource, FetchError};
