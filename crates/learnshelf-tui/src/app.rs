//! Application state for the course library screen.
//!
//! `App` owns the load sequencer, mirrors its published `LoadState`, and
//! keeps the purely visual state: grid selection, banner rotation, the
//! current screen and transient notices.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use learnshelf_core::{
    route_tap, ApiClient, BannerSlide, Config, Course, FileStore, KeyValueStore, LoadSequencer,
    LoadState, MemoryStore, TapAction,
};

/// How long a transient notice stays in the status bar.
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Which store backs the course snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Library,
    /// Detail view for the course with this id
    Detail(String),
}

pub struct App {
    pub config: Config,
    sequencer: Arc<LoadSequencer>,
    state_rx: watch::Receiver<LoadState>,

    pub load_state: LoadState,
    pub loaded_at: Option<DateTime<Utc>>,

    pub screen: Screen,
    pub selection: usize,
    pub module_selection: usize,

    pub banner_index: usize,
    banner_rotated_at: Instant,

    pub notice: Option<String>,
    notice_shown_at: Option<Instant>,

    pub should_quit: bool,
}

impl App {
    /// Build the app with the production API client and the chosen store.
    pub fn new(config: Config, store_kind: StoreKind) -> Result<Self> {
        let mut api = ApiClient::new(config.api_base_url.clone())
            .context("Failed to create API client")?;
        if let Some(ref token) = config.api_token {
            api = api.with_token(token.clone());
        }

        let store: Arc<dyn KeyValueStore> = match store_kind {
            StoreKind::File => {
                let dir = config.cache_dir()?;
                debug!(?dir, "Using file store");
                Arc::new(FileStore::new(dir).context("Failed to create cache directory")?)
            }
            StoreKind::Memory => Arc::new(MemoryStore::new()),
        };

        let sequencer = LoadSequencer::new(config.loader_config(), Arc::new(api), store);
        Ok(Self::with_sequencer(config, Arc::new(sequencer)))
    }

    pub fn with_sequencer(config: Config, sequencer: Arc<LoadSequencer>) -> Self {
        let state_rx = sequencer.subscribe();
        let load_state = sequencer.state();
        Self {
            config,
            sequencer,
            state_rx,
            load_state,
            loaded_at: None,
            screen: Screen::Library,
            selection: 0,
            module_selection: 0,
            banner_index: 0,
            banner_rotated_at: Instant::now(),
            notice: None,
            notice_shown_at: None,
            should_quit: false,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start a load cycle in the background. Used on start-up and for retry.
    pub fn start_load(&self) {
        info!("Starting course load");
        let sequencer = Arc::clone(&self.sequencer);
        tokio::spawn(async move {
            sequencer.load().await;
        });
    }

    /// Re-run the load sequence (the retry control).
    pub fn retry(&mut self) {
        if self.load_state.is_loading() {
            return;
        }
        self.screen = Screen::Library;
        self.start_load();
    }

    /// Pick up any state the sequencer published since the last frame.
    pub fn check_load_state(&mut self) {
        if !self.state_rx.has_changed().unwrap_or(false) {
            return;
        }
        let state = self.state_rx.borrow_and_update().clone();
        self.apply_state(state);
    }

    fn apply_state(&mut self, state: LoadState) {
        if matches!(state, LoadState::Loaded(_)) {
            self.loaded_at = Some(Utc::now());
        }

        let count = state.courses().len();
        self.selection = self.selection.min(count.saturating_sub(1));

        // A detail screen for a course that is no longer listed makes no sense.
        if let Screen::Detail(ref id) = self.screen {
            if !state.courses().iter().any(|c| &c.id == id) {
                self.screen = Screen::Library;
            }
        }

        self.load_state = state;
    }

    // =========================================================================
    // Library grid
    // =========================================================================

    pub fn courses(&self) -> &[Course] {
        self.load_state.courses()
    }

    pub fn columns(&self) -> usize {
        usize::from(self.config.grid_columns.max(1))
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.courses().get(self.selection)
    }

    /// Move the grid selection by whole cells; clamps at the edges.
    pub fn move_selection(&mut self, dx: isize, dy: isize) {
        let count = self.courses().len();
        if count == 0 {
            return;
        }
        let delta = dx + dy * self.columns() as isize;
        let target = self.selection as isize + delta;
        if (0..count as isize).contains(&target) {
            self.selection = target as usize;
        }
    }

    /// Tap on the selected card.
    pub fn tap_selected(&mut self) {
        let Some(course) = self.selected_course() else {
            return;
        };
        match route_tap(course) {
            TapAction::OpenDetail(id) => {
                debug!(course_id = %id, "Opening course detail");
                self.screen = Screen::Detail(id);
                self.module_selection = 0;
            }
            TapAction::Notice(message) => self.show_notice(message),
        }
    }

    // =========================================================================
    // Detail screen
    // =========================================================================

    pub fn detail_course(&self) -> Option<&Course> {
        match self.screen {
            Screen::Detail(ref id) => self.courses().iter().find(|c| &c.id == id),
            Screen::Library => None,
        }
    }

    pub fn move_module_selection(&mut self, dy: isize) {
        let count = self.detail_course().map(|c| c.modules.len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        let target = self.module_selection as isize + dy;
        self.module_selection = target.clamp(0, count as isize - 1) as usize;
    }

    pub fn back(&mut self) {
        self.screen = Screen::Library;
    }

    // =========================================================================
    // Banner and notices
    // =========================================================================

    pub fn current_banner(&self) -> Option<&BannerSlide> {
        self.config.banners.get(self.banner_index)
    }

    pub fn show_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.notice_shown_at = Some(Instant::now());
    }

    /// Advance time-based state: banner rotation and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        let rotate_every = Duration::from_secs(self.config.banner_rotate_secs.max(1));
        if !self.config.banners.is_empty()
            && now.duration_since(self.banner_rotated_at) >= rotate_every
        {
            self.banner_index = (self.banner_index + 1) % self.config.banners.len();
            self.banner_rotated_at = now;
        }

        if let Some(shown_at) = self.notice_shown_at {
            if now.duration_since(shown_at) >= NOTICE_DURATION {
                self.notice = None;
                self.notice_shown_at = None;
            }
        }
    }
}
