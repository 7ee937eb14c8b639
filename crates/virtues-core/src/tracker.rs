//! Session orchestration: state transitions plus persistence.
//!
//! The tracker owns the single [`AppState`] instance, applies transitions
//! synchronously, and talks to the [`KvStore`] collaborator. Store
//! failures never reach the user: a bad read falls open to an empty log,
//! a bad write leaves the in-memory state authoritative.
//!
//! Writes go through a single-slot pending buffer: each mutation replaces
//! the slot (latest wins) and [`Tracker::flush`] drains it, so overlapping
//! saves cannot clobber a newer log with a stale one. `&mut self` on both
//! paths encodes the one-logical-writer rule.

use tracing::{debug, warn};

use crate::calendar::today_key;
use crate::entry::{Entry, EntryLog};
use crate::error::Result;
use crate::state::{Action, AppState};
use crate::storage::{Config, KvStore, ENTRIES_KEY};
use crate::virtue::{virtue_for_date, Virtue};
use crate::weeks::{history, WeekSummary};

/// Result of asking to record today's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The outcome was recorded (or re-recorded).
    Recorded,
    /// Today already has an outcome and re-recording is disabled.
    AlreadyRecorded,
}

/// The application session: state machine + persistence collaborator.
pub struct Tracker<S: KvStore> {
    state: AppState,
    store: S,
    config: Config,
    /// Latest unsaved serialization of the log, if any.
    pending_write: Option<String>,
}

impl<S: KvStore> Tracker<S> {
    /// Start a session from the persisted log.
    ///
    /// The one-shot startup read. Missing, unreadable, or malformed data
    /// falls open to an empty log -- never fatal.
    pub async fn load(store: S, config: Config) -> Self {
        let entries = match store.get(ENTRIES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<EntryLog>(&raw) {
                Ok(log) => log,
                Err(e) => {
                    warn!(error = %e, "persisted entry log is malformed, starting empty");
                    EntryLog::new()
                }
            },
            Ok(None) => EntryLog::new(),
            Err(e) => {
                warn!(error = %e, "failed to read persisted entry log, starting empty");
                EntryLog::new()
            }
        };

        let mut tracker = Self {
            state: AppState::default(),
            store,
            config,
            pending_write: None,
        };
        tracker.dispatch(Action::Load(entries));
        // The startup load is not a user mutation; nothing to write back.
        tracker.pending_write = None;
        tracker
    }

    /// Apply a transition using the wall-clock date.
    pub fn dispatch(&mut self, action: Action) {
        self.dispatch_at(action, &today_key());
    }

    /// Apply a transition for an explicit `today` (used by tests).
    pub fn dispatch_at(&mut self, action: Action, today: &str) {
        self.state = self.state.apply(&action, today);
        // Stash the deduplicated log; the newest payload always wins.
        let deduped: EntryLog = self.state.entries.dedup_sorted().into_iter().collect();
        match serde_json::to_string(&deduped) {
            Ok(payload) => self.pending_write = Some(payload),
            Err(e) => warn!(error = %e, "failed to serialize entry log"),
        }
    }

    /// Record today's outcome, honoring the re-record guard.
    pub fn record(&mut self, is_success: bool) -> RecordOutcome {
        self.record_at(is_success, &today_key())
    }

    fn record_at(&mut self, is_success: bool, today: &str) -> RecordOutcome {
        if !self.config.allow_rerecord && self.state.entries.entry_for(today).is_some() {
            return RecordOutcome::AlreadyRecorded;
        }
        let action = if is_success { Action::Pass } else { Action::Fail };
        self.dispatch_at(action, today);
        RecordOutcome::Recorded
    }

    /// Write any pending log to the store, draining the slot.
    ///
    /// Loops until no newer payload is pending, so a save started before
    /// a mutation can never overwrite the mutation's payload. A failed
    /// write is logged and left pending for the next flush.
    pub async fn flush(&mut self) -> Result<()> {
        while let Some(payload) = self.pending_write.take() {
            if let Err(e) = self.store.set(ENTRIES_KEY, &payload).await {
                warn!(error = %e, "failed to persist entry log, keeping in-memory state");
                self.pending_write = Some(payload);
                return Err(e.into());
            }
            debug!("entry log persisted");
        }
        Ok(())
    }

    /// Whether a mutation is waiting to be persisted.
    pub fn has_pending_write(&self) -> bool {
        self.pending_write.is_some()
    }

    // ── Read-only presentation feed ──────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The virtue assigned to the current week.
    pub fn today_virtue(&self) -> &'static Virtue {
        virtue_for_date(&today_key())
    }

    /// Today's recorded entry, if any.
    pub fn today_entry(&self) -> Option<&Entry> {
        self.state.entries.entry_for(&today_key())
    }

    pub fn score(&self) -> usize {
        self.state.entries.score()
    }

    pub fn failure_count(&self) -> usize {
        self.state.entries.failure_count()
    }

    pub fn current_streak(&self) -> usize {
        self.state.entries.current_streak()
    }

    /// Bucketed history, most recent week first.
    pub fn history(&self) -> Vec<WeekSummary> {
        history(&self.state.entries)
    }
}
