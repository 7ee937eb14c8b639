//! Reducer-style application state.
//!
//! The whole session state is the entry log; transitions are a pure total
//! function `(state, action, today) -> state`. Persistence and clocks
//! live in the orchestration layer ([`crate::tracker`]) -- `today` is an
//! explicit parameter so every transition is deterministic under test.

use serde::{Deserialize, Serialize};

use crate::entry::{truncate_notes, Entry, EntryLog};

/// User-driven transitions over the entry log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the log with the persisted one. Dispatched once at
    /// startup when the store read resolves.
    Load(EntryLog),
    /// Record today as a pass.
    Pass,
    /// Record today as a fail.
    Fail,
    /// Edit today's reflection note, creating a default-pass entry if
    /// today has none.
    SetNote(String),
}

/// Process-wide application state. One instance per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub entries: EntryLog,
}

impl AppState {
    /// Apply one transition, producing the next state.
    ///
    /// `today` is the current local date key ([`crate::calendar::today_key`]
    /// in production). Entries for past dates are never touched; only
    /// today's entry is replaced.
    pub fn apply(&self, action: &Action, today: &str) -> AppState {
        match action {
            Action::Load(entries) => AppState {
                entries: entries.clone(),
            },
            Action::Pass => self.record_outcome(today, true),
            Action::Fail => self.record_outcome(today, false),
            Action::SetNote(text) => self.set_note(today, text),
        }
    }

    /// Replace today's entry with a fresh outcome, carrying over any
    /// note already written today.
    fn record_outcome(&self, today: &str, is_success: bool) -> AppState {
        let carried_notes = self
            .entries
            .entry_for(today)
            .and_then(|e| e.notes.clone());
        let mut entries: EntryLog = self
            .entries
            .iter()
            .filter(|e| e.date != today)
            .cloned()
            .collect();
        entries.push(Entry {
            date: today.to_string(),
            is_success,
            notes: carried_notes,
        });
        AppState { entries }
    }

    /// Edit today's note in place, or open today as a default pass.
    ///
    /// Looks the entry up by date key rather than trusting append order,
    /// so an out-of-order log cannot misdirect the edit.
    fn set_note(&self, today: &str, text: &str) -> AppState {
        let notes = truncate_notes(text.to_string());
        let mut entries = self.entries.clone();
        match entries.0.iter_mut().rev().find(|e| e.date == today) {
            Some(entry) => entry.notes = Some(notes),
            None => entries.push(Entry::new(today, true).with_notes(notes)),
        }
        AppState { entries }
    }
}
