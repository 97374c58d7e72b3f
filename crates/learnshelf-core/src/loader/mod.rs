//! Cache-then-fetch load sequencing for the course screen.
//!
//! `LoadSequencer::load` moves the observable `LoadState` from `Loading` to
//! either `Loaded` or `Error`:
//!
//! 1. With trust-cache enabled, a non-empty snapshot is used as-is and the
//!    network is not consulted.
//! 2. Otherwise the course list is fetched, published, then persisted as the
//!    new snapshot (best effort).
//!
//! Snapshot read failures and persist failures are logged and swallowed.
//! Only fetch failures and unexpected panics reach the presentation surface.

pub mod sequencer;
pub mod state;

pub use sequencer::{LoadSequencer, LoaderConfig, UNEXPECTED_ERROR_MESSAGE};
pub use state::LoadState;
