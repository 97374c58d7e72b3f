use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::api::CourseSource;
use crate::cache::snapshot::panic_message;
use crate::cache::SnapshotCache;
use crate::models::Course;
use crate::store::KeyValueStore;

use super::LoadState;

/// Shown when a load cycle fails for a reason other than the fetch itself.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Something went wrong while loading courses";

/// Prefix for fetch failures shown to the user.
const FETCH_ERROR_PREFIX: &str = "Failed to load courses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Use a non-empty snapshot without consulting the network.
    pub trust_cache: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { trust_cache: true }
    }
}

/// Runs load cycles and publishes their state on a watch channel.
///
/// Each call to `load` takes a new generation number. Only the newest
/// generation publishes state or writes the snapshot, so a slow cycle that
/// was overtaken by a retry finishes without touching the screen.
pub struct LoadSequencer {
    config: LoaderConfig,
    source: Arc<dyn CourseSource>,
    cache: SnapshotCache,
    state_tx: watch::Sender<LoadState>,
    generation: AtomicU64,
}

impl LoadSequencer {
    pub fn new(
        config: LoaderConfig,
        source: Arc<dyn CourseSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        Self {
            config,
            source,
            cache: SnapshotCache::new(store),
            state_tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Receive every state this sequencer publishes from now on.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// The most recently published state.
    pub fn state(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    /// Run one load cycle and return the terminal state it reached.
    ///
    /// If a newer cycle started meanwhile, the returned state is this
    /// cycle's own result and was not published.
    pub async fn load(&self) -> LoadState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, trust_cache = self.config.trust_cache, "Loading courses");

        self.publish(generation, LoadState::Loading);

        match AssertUnwindSafe(self.run_cycle(generation)).catch_unwind().await {
            Ok(state) => {
                info!(
                    generation,
                    courses = state.courses().len(),
                    failed = state.error_message().is_some(),
                    "Course load finished"
                );
                state
            }
            Err(payload) => {
                error!(generation, panic = %panic_message(&*payload), "Course load panicked");
                let state = LoadState::Error(UNEXPECTED_ERROR_MESSAGE.to_string());
                self.publish(generation, state.clone());
                state
            }
        }
    }

    async fn run_cycle(&self, generation: u64) -> LoadState {
        if self.config.trust_cache {
            if let Some(courses) = self.read_trusted_snapshot() {
                let state = LoadState::Loaded(courses);
                self.publish(generation, state.clone());
                return state;
            }
        }

        match self.source.fetch_courses().await {
            Ok(courses) => {
                self.publish(generation, LoadState::Loaded(courses.clone()));
                self.persist(generation, &courses);
                LoadState::Loaded(courses)
            }
            Err(e) => {
                let state = LoadState::Error(format!("{}: {}", FETCH_ERROR_PREFIX, e.message()));
                self.publish(generation, state.clone());
                state
            }
        }
    }

    /// The snapshot, if it can be read and holds at least one course.
    /// Read errors are dropped here on purpose: the cycle falls back to fetching.
    fn read_trusted_snapshot(&self) -> Option<Vec<Course>> {
        match self.cache.read() {
            Ok(Some(courses)) if !courses.is_empty() => {
                debug!(count = courses.len(), "Using cached course snapshot");
                Some(courses)
            }
            Ok(_) => {
                debug!("Course snapshot missing or empty, fetching");
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable course snapshot");
                None
            }
        }
    }

    fn persist(&self, generation: u64, courses: &[Course]) {
        if !self.is_current(generation) {
            debug!(generation, "Superseded load, not persisting snapshot");
            return;
        }
        if let Err(e) = self.cache.write(courses) {
            warn!(error = %e, "Failed to persist course snapshot");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publish `state` if `generation` is still the newest cycle.
    fn publish(&self, generation: u64, state: LoadState) {
        let published = self.state_tx.send_if_modified(|current| {
            // Checked under the channel lock so a newer cycle's states always land last.
            if !self.is_current(generation) {
                return false;
            }
            *current = state;
            true
        });

        if !published {
            debug!(generation, "Superseded load, dropping state update");
        } else if self.state_tx.is_closed() {
            debug!(generation, "No observers left for state update");
        }
    }
}
