//! Local snapshot of the last fetched course list.
//!
//! There is exactly one snapshot, stored as a JSON array under
//! `SNAPSHOT_KEY`. It is overwritten wholesale after every successful fetch
//! and trusted unconditionally when read; there is no expiry.

pub mod snapshot;

pub use snapshot::{CacheError, SnapshotCache, SNAPSHOT_KEY};
