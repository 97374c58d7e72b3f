//! Core library for learnshelf.
//!
//! - `models`: `Course` and `CourseModule`
//! - `api`: the `CourseSource` fetch capability and its HTTP implementation
//! - `store`: persisted key/value storage (`FileStore`, `MemoryStore`)
//! - `cache`: the single course snapshot kept in that storage
//! - `loader`: the cache-then-fetch load sequencer and its observable state
//! - `routing`: what a tap on a course card does
//! - `config`: user configuration and environment overrides

pub mod api;
pub mod cache;
pub mod config;
pub mod loader;
pub mod models;
pub mod routing;
pub mod store;

pub use api::{ApiClient, ApiError, CourseSource, FetchError};
pub use cache::{CacheError, SnapshotCache, SNAPSHOT_KEY};
pub use config::{BannerSlide, Config};
pub use loader::{LoadSequencer, LoadState, LoaderConfig};
pub use models::{Course, CourseModule};
pub use routing::{route_tap, TapAction};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
