//! FILENAME: app/src/session.rs
// PURPOSE: Per-session filter state with last-write-wins recomputation.
// CONTEXT: The dataset is shared read-only between sessions; each session
//          owns its FilterState. A recomputation is stamped with the event
//          generation that produced it and is dropped if a newer event has
//          been accepted in the meantime.

use std::sync::Arc;

use crossfilter_engine::{
    options_for, recompute, DashboardSettings, DashboardSnapshot, FilterEvent, FilterState,
};
use dataset::Dataset;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::{log_debug, log_info};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Process-wide state: the dataset loaded at startup and the configuration.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: AppConfig) -> Self {
        AppState { dataset: Arc::new(dataset), config: Arc::new(config) }
    }

    pub fn open_session(&self) -> Session {
        Session::new(Arc::clone(&self.dataset), Arc::clone(&self.config))
    }
}

// ============================================================================
// RECOMPUTATION TICKETS
// ============================================================================

/// Work accepted by a session but not yet run.
#[derive(Debug, Clone)]
pub struct PendingRecompute {
    pub session_id: Uuid,
    pub generation: u64,
    pub state: FilterState,
}

impl PendingRecompute {
    pub fn run(self, dataset: &Dataset, settings: &DashboardSettings) -> CompletedRecompute {
        CompletedRecompute {
            session_id: self.session_id,
            generation: self.generation,
            snapshot: recompute(dataset, &self.state, settings),
        }
    }
}

/// Result of a recomputation, waiting to be committed.
#[derive(Debug, Clone)]
pub struct CompletedRecompute {
    pub session_id: Uuid,
    pub generation: u64,
    pub snapshot: DashboardSnapshot,
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session {
    id: Uuid,
    dataset: Arc<Dataset>,
    config: Arc<AppConfig>,
    state: FilterState,
    generation: u64,
    current: Option<DashboardSnapshot>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, config: Arc<AppConfig>) -> Self {
        let state =
            FilterState::initial(&dataset, config.default_grouping_column, config.fallback());
        let id = Uuid::new_v4();
        log_info!(
            "SESSION",
            "opened {} with {} = {:?}",
            id,
            state.grouping_column,
            state.selection.values()
        );
        Session { id, dataset, config, state, generation: 0, current: None }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last committed snapshot.
    pub fn current(&self) -> Option<&DashboardSnapshot> {
        self.current.as_ref()
    }

    /// Dropdown options for the current grouping column.
    pub fn options(&self) -> Vec<String> {
        options_for(&self.dataset, self.state.grouping_column)
    }

    /// Accepts an event: moves to the next state and supersedes any
    /// recomputation still in flight.
    pub fn begin(&mut self, event: &FilterEvent) -> PendingRecompute {
        self.state = self.state.apply_event(&self.dataset, event, self.config.fallback());
        self.generation += 1;
        log_debug!("SESSION", "{} gen={} event={:?}", self.id, self.generation, event);
        self.pending()
    }

    /// Ticket for the current state without an event (initial render).
    pub fn pending(&self) -> PendingRecompute {
        PendingRecompute {
            session_id: self.id,
            generation: self.generation,
            state: self.state.clone(),
        }
    }

    /// Applies a finished recomputation if it is still the latest one.
    pub fn commit(&mut self, completed: CompletedRecompute) -> Option<&DashboardSnapshot> {
        if completed.session_id != self.id || completed.generation != self.generation {
            log_debug!(
                "SESSION",
                "{} discarded stale result gen={} (latest {})",
                self.id,
                completed.generation,
                self.generation
            );
            return None;
        }
        self.current = Some(completed.snapshot);
        self.current.as_ref()
    }

    /// Runs the pending recomputation against this session's dataset.
    pub fn run(&self, pending: PendingRecompute) -> CompletedRecompute {
        pending.run(&self.dataset, &self.config.dashboard)
    }

    /// begin -> run -> commit in one call.
    pub fn handle(&mut self, event: &FilterEvent) -> DashboardSnapshot {
        let pending = self.begin(event);
        let completed = self.run(pending);
        let snapshot = completed.snapshot.clone();
        self.commit(completed);
        snapshot
    }

    /// Recomputes the current state and commits it.
    pub fn refresh(&mut self) -> DashboardSnapshot {
        let pending = self.pending();
        let completed = self.run(pending);
        let snapshot = completed.snapshot.clone();
        self.commit(completed);
        snapshot
    }
}
