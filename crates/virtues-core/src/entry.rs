//! Daily entry log: one pass/fail outcome per calendar date.
//!
//! The log is append-biased and is not required to be sorted or
//! deduplicated in storage. Every read path (scoring, streak, bucketing)
//! deduplicates first, keeping the last entry by list position for a
//! given date.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::calendar::decode_date;

/// Maximum reflection note length in characters.
pub const MAX_NOTE_CHARS: usize = 1000;

/// Gap tolerance between consecutive streak days.
///
/// 24h + 5h of slack so daylight-saving shifts and timezone jitter never
/// break an honest daily streak.
pub const STREAK_GAP_TOLERANCE_HOURS: i64 = 29;

/// One recorded day: did the week's virtue hold, plus an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// `YYYYMMDD` local calendar date key.
    pub date: String,
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    pub fn new(date: impl Into<String>, is_success: bool) -> Self {
        Self {
            date: date.into(),
            is_success,
            notes: None,
        }
    }

    /// Attach a note, truncated to [`MAX_NOTE_CHARS`] characters.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(truncate_notes(notes.into()));
        self
    }
}

/// Truncate a note at a character boundary, not a byte boundary.
pub fn truncate_notes(notes: String) -> String {
    if notes.chars().count() > MAX_NOTE_CHARS {
        notes.chars().take(MAX_NOTE_CHARS).collect()
    } else {
        notes
    }
}

/// The persisted sequence of daily entries.
///
/// Serializes as a bare JSON array of entries -- the single blob the
/// key-value store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryLog(pub Vec<Entry>);

impl EntryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last-appended entry for a date, if any.
    pub fn entry_for(&self, date_key: &str) -> Option<&Entry> {
        self.0.iter().rev().find(|e| e.date == date_key)
    }

    /// Date-keyed view of the log.
    ///
    /// Iterates in list order and overwrites on duplicate dates, so the
    /// last entry by position wins regardless of where other dates sit.
    pub fn deduplicate(&self) -> BTreeMap<&str, &Entry> {
        let mut by_date = BTreeMap::new();
        for entry in &self.0 {
            by_date.insert(entry.date.as_str(), entry);
        }
        by_date
    }

    /// Deduplicated entries in ascending date order.
    ///
    /// This is the input contract for [`crate::weeks::unsqueeze`].
    pub fn dedup_sorted(&self) -> Vec<Entry> {
        self.deduplicate().into_values().cloned().collect()
    }

    /// Count of distinct days recorded as a pass.
    pub fn score(&self) -> usize {
        self.deduplicate().values().filter(|e| e.is_success).count()
    }

    /// Count of distinct days recorded as a fail.
    pub fn failure_count(&self) -> usize {
        self.deduplicate().values().filter(|e| !e.is_success).count()
    }

    /// Trailing consecutive days with any recorded outcome.
    ///
    /// Policy: an entry keeps the streak alive whether it is a pass or a
    /// fail -- the streak rewards showing up, not succeeding. Two entries
    /// are consecutive when their dates are at most
    /// [`STREAK_GAP_TOLERANCE_HOURS`] apart. Walks from the most recent
    /// entry backward and stops at the first larger gap.
    pub fn current_streak(&self) -> usize {
        let mut streak = 0;
        let mut more_recent: Option<chrono::NaiveDate> = None;
        for entry in self.deduplicate().values().rev() {
            let date = decode_date(&entry.date);
            if let Some(prev) = more_recent {
                if prev - date > Duration::hours(STREAK_GAP_TOLERANCE_HOURS) {
                    break;
                }
            }
            streak += 1;
            more_recent = Some(date);
        }
        streak
    }
}

impl FromIterator<Entry> for EntryLog {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
