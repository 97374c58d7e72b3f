use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::models::Course;
use crate::store::{KeyValueStore, StoreError};

/// Store key holding the serialized course list.
pub const SNAPSHOT_KEY: &str = "course_snapshot";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to parse snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Snapshot store panicked: {0}")]
    Panicked(String),
}

/// Reads and writes the single course snapshot.
#[derive(Clone)]
pub struct SnapshotCache {
    store: Arc<dyn KeyValueStore>,
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the snapshot. `Ok(None)` when nothing has been stored yet.
    ///
    /// A panic inside the store is reported as `CacheError::Panicked` rather
    /// than unwinding into the caller.
    pub fn read(&self) -> Result<Option<Vec<Course>>, CacheError> {
        let raw = panic::catch_unwind(AssertUnwindSafe(|| self.store.get_string(SNAPSHOT_KEY)))
            .map_err(|payload| CacheError::Panicked(panic_message(&*payload)))??;

        let Some(raw) = raw else {
            debug!("No course snapshot stored");
            return Ok(None);
        };

        let courses: Vec<Course> = serde_json::from_str(&raw).map_err(CacheError::Decode)?;
        debug!(count = courses.len(), "Course snapshot read");
        Ok(Some(courses))
    }

    /// Replace the snapshot with `courses`. A panic inside the store is
    /// reported as `CacheError::Panicked`, as in `read`.
    pub fn write(&self, courses: &[Course]) -> Result<(), CacheError> {
        let raw = serde_json::to_string(courses).map_err(CacheError::Encode)?;
        panic::catch_unwind(AssertUnwindSafe(|| self.store.set_string(SNAPSHOT_KEY, &raw)))
            .map_err(|payload| CacheError::Panicked(panic_message(&*payload)))??;
        debug!(count = courses.len(), "Course snapshot written");
        Ok(())
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseModule;
    use crate::store::MemoryStore;

    struct PanickingStore;

    struct PanickingWriteStore;

    impl KeyValueStore for PanickingWriteStore {
        fn get_string(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set_string(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            panic!("quota exceeded");
        }
    }

    impl KeyValueStore for PanickingStore {
        fn get_string(&self, _key: &str) -> Result<Option<String>, StoreError> {
            panic!("disk on fire");
        }

        fn set_string(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read only".to_string()))
        }
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course {
                id: "1".to_string(),
                title: "Intro".to_string(),
                description: Some("Start here".to_string()),
                instructor: Some("Ada Lovelace".to_string()),
                thumbnail_url: None,
                level: Some("Beginner".to_string()),
                duration_minutes: Some(30),
                modules: vec![CourseModule {
                    id: "m1".to_string(),
                    title: "Welcome".to_string(),
                    summary: None,
                    lesson_count: 2,
                }],
            },
            Course {
                id: "2".to_string(),
                title: "Empty".to_string(),
                description: None,
                instructor: None,
                thumbnail_url: None,
                level: None,
                duration_minutes: None,
                modules: vec![],
            },
        ]
    }

    #[test]
    fn test_read_empty_store() {
        let cache = SnapshotCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_returns_same_list() {
        let cache = SnapshotCache::new(Arc::new(MemoryStore::new()));
        let courses = sample_courses();
        cache.write(&courses).unwrap();
        assert_eq!(cache.read().unwrap(), Some(courses));
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let cache = SnapshotCache::new(Arc::new(MemoryStore::new()));
        cache.write(&sample_courses()).unwrap();
        let shorter = vec![sample_courses().remove(1)];
        cache.write(&shorter).unwrap();
        assert_eq!(cache.read().unwrap(), Some(shorter));
    }

    #[test]
    fn test_malformed_snapshot_is_decode_error() {
        let store = MemoryStore::with_value(SNAPSHOT_KEY, "{not json");
        let cache = SnapshotCache::new(Arc::new(store));
        assert!(matches!(cache.read(), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_store_panic_becomes_error() {
        let cache = SnapshotCache::new(Arc::new(PanickingStore));
        match cache.read() {
            Err(CacheError::Panicked(msg)) => assert_eq!(msg, "disk on fire"),
            other => panic!("expected Panicked, got {:?}", other),
        }
    }

    #[test]
    fn test_store_write_panic_becomes_error() {
        let cache = SnapshotCache::new(Arc::new(PanickingWriteStore));
        match cache.write(&sample_courses()) {
            Err(CacheError::Panicked(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected Panicked, got {:?}", other),
        }
    }

    #[test]
    fn test_write_failure_is_store_error() {
        let cache = SnapshotCache::new(Arc::new(PanickingStore));
        assert!(matches!(cache.write(&[]), Err(CacheError::Store(_))));
    }
}
