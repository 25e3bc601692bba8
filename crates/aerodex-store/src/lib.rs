//! Dataset loading for aerodex consumers.
//!
//! Ties the ingestion pipeline to the outside world: an ordered list of
//! candidate dataset sources is scanned with cache-busting fetches
//! ([`locator`]), a reentrancy-guarded state machine holds the loaded record
//! set ([`RecordStore`]), and a JSON snapshot side-channel persists manually
//! uploaded datasets ([`SnapshotStore`]).
//!
//! Presentation layers only ever see `{records, status, error, last sheet}`
//! plus `load()`/`reload()`; ingestion failures surface as the store's error
//! string, never as a panic or a propagated `Err`.

mod error;
pub mod locator;
mod snapshot;
mod store;

pub use error::StoreError;
pub use locator::{default_sources, locate, LoadedTable, Source, DATA_FILE_ENV};
pub use snapshot::{SnapshotStore, SNAPSHOT_KEY};
pub use store::{LoadStatus, RecordStore};
