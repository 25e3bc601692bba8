//! The record store: an owned state container with an explicit
//! `Idle → Loading → {Ready | Error}` transition function.

use std::sync::{Arc, RwLock};

use aerodex_ingest::SheetPolicy;
use aerodex_model::Record;

use crate::locator::{locate, Source};

/// Load lifecycle of the store.
///
/// Consumers must only read `records` once the status is `Ready`; a failed
/// load clears the set. `Loading` is strictly observed before `Ready` or
/// `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Default)]
struct State {
    records: Arc<Vec<Record>>,
    status: LoadStatus,
    error: Option<String>,
    last_sheet_name: Option<String>,
}

/// Process-wide holder of the normalized record set plus load status.
///
/// There is exactly one writer at a time by construction: `load()` is a no-op
/// while a load is in flight, so no locking is needed beyond the single
/// status-gated state cell. Every successful load replaces the record set as
/// an atomic unit; there is no per-record update.
pub struct RecordStore {
    client: reqwest::Client,
    sources: Vec<Source>,
    policy: SheetPolicy,
    state: RwLock<State>,
}

impl RecordStore {
    /// A store reading from the given candidate sources with the fast
    /// sheet-selection policy.
    pub fn new(sources: Vec<Source>) -> Self {
        Self::with_policy(sources, SheetPolicy::FirstNonTrivial)
    }

    pub fn with_policy(sources: Vec<Source>, policy: SheetPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            sources,
            policy,
            state: RwLock::new(State::default()),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.state.read().expect("state lock poisoned").status
    }

    /// The current record set. Cheap to clone out; valid only once
    /// [`status`](Self::status) is [`LoadStatus::Ready`].
    pub fn records(&self) -> Arc<Vec<Record>> {
        Arc::clone(&self.state.read().expect("state lock poisoned").records)
    }

    /// Human-readable message from the last failed load, if any.
    pub fn error(&self) -> Option<String> {
        self.state.read().expect("state lock poisoned").error.clone()
    }

    /// Name of the sheet the current record set came from.
    pub fn last_sheet_name(&self) -> Option<String> {
        self.state
            .read()
            .expect("state lock poisoned")
            .last_sheet_name
            .clone()
    }

    /// The `Idle|Ready|Error → Loading` transition. Returns false (and
    /// changes nothing) when a load is already in flight.
    fn begin_load(&self) -> bool {
        let mut state = self.state.write().expect("state lock poisoned");
        if state.status == LoadStatus::Loading {
            return false;
        }
        state.status = LoadStatus::Loading;
        state.error = None;
        true
    }

    /// Locate, decode, and normalize the dataset, then replace the record
    /// set. A second call while a load is in flight is a no-op. All failures
    /// are absorbed into the `Error` status; nothing propagates to callers.
    pub async fn load(&self) {
        if !self.begin_load() {
            return;
        }
        match locate(&self.client, &self.sources, self.policy).await {
            Ok(table) => {
                log::info!(
                    "loaded {} records from sheet `{}` ({})",
                    table.records.len(),
                    table.sheet_name,
                    table.source
                );
                let mut state = self.state.write().expect("state lock poisoned");
                state.records = Arc::new(table.records);
                state.status = LoadStatus::Ready;
                state.error = None;
                state.last_sheet_name = Some(table.sheet_name);
            }
            Err(err) => {
                log::warn!("load failed: {err}");
                let mut state = self.state.write().expect("state lock poisoned");
                state.records = Arc::new(Vec::new());
                state.status = LoadStatus::Error;
                state.error = Some(err.to_string());
            }
        }
    }

    /// Equivalent to calling [`load`](Self::load) again (and suppressed by
    /// the same in-flight guard).
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Install an externally produced record set (e.g. restored from a
    /// snapshot or parsed from uploaded bytes), replacing the current one.
    pub fn install_records(&self, records: Vec<Record>) {
        let mut state = self.state.write().expect("state lock poisoned");
        state.records = Arc::new(records);
        state.status = LoadStatus::Ready;
        state.error = None;
        state.last_sheet_name = None;
    }
}
