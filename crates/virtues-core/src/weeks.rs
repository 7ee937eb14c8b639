//! Week bucketing for the history grid.
//!
//! `unsqueeze` partitions a sorted, deduplicated entry sequence into
//! rotation-week buckets, synthesizing empty buckets for skipped weeks so
//! the rendered grid keeps its cadence. `history` annotates the buckets
//! with their virtue and quarter labels for the presentation layer.

use serde::Serialize;

use crate::calendar::{absolute_week_index, decode_date, weekday_index, weeks_between, WEEKS_PER_YEAR};
use crate::entry::{Entry, EntryLog};
use crate::virtue::{rotation_index, Virtue, VIRTUES};

/// Partition chronologically ordered entries into week buckets.
///
/// Input must be deduplicated and ascending by date
/// ([`EntryLog::dedup_sorted`]). Bucket 0 is the earliest week; a bucket
/// holds 0 to 7 entries in chronological order. Pure -- the input is not
/// mutated.
///
/// A new entry belongs to the current bucket when no whole week has
/// elapsed since the bucket's last entry *and* its weekday index is
/// higher (the week has not wrapped past Sunday). Otherwise it opens a
/// new bucket, preceded by one empty bucket per fully skipped week; when
/// the weekday index did not increase, the entry's own bucket already
/// accounts for the final week transition, so that empty bucket is
/// skipped.
pub fn unsqueeze(entries: &[Entry]) -> Vec<Vec<Entry>> {
    let mut buckets: Vec<Vec<Entry>> = Vec::new();
    for entry in entries {
        let previous = buckets.last().and_then(|bucket| bucket.last());
        match previous {
            None => buckets.push(vec![entry.clone()]),
            Some(prev) => {
                let weeks = weeks_between(&prev.date, &entry.date);
                let higher_weekday = weekday_index(&entry.date) > weekday_index(&prev.date);
                if weeks == 0 && higher_weekday {
                    buckets
                        .last_mut()
                        .expect("previous entry implies a bucket")
                        .push(entry.clone());
                } else {
                    for i in 0..weeks {
                        if i + 1 == weeks && !higher_weekday {
                            continue;
                        }
                        buckets.push(Vec::new());
                    }
                    buckets.push(vec![entry.clone()]);
                }
            }
        }
    }
    buckets
}

/// One rendered history row: a week's entries plus its annotations.
#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    /// Name of the virtue assigned to this week.
    pub virtue: &'static str,
    pub emoji: &'static str,
    /// Entries recorded during this week, chronological.
    pub entries: Vec<Entry>,
    /// `"Qn YYYY"` marker, present only where the rotation restarts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter_label: Option<String>,
}

/// The presentation feed: buckets in reverse chronological order.
///
/// The most recent bucket takes its virtue from its own last entry; each
/// older bucket steps the rotation back by one. Buckets at rotation index
/// 0 get a year/quarter label derived from the Sunday-anchored absolute
/// week index. Empty input yields an empty feed.
pub fn history(log: &EntryLog) -> Vec<WeekSummary> {
    let buckets = unsqueeze(&log.dedup_sorted());
    let anchor = match buckets.last().and_then(|bucket| bucket.last()) {
        Some(entry) => entry,
        None => return Vec::new(),
    };
    let anchor_rotation = rotation_index(&anchor.date) as i64;
    let anchor_abs = absolute_week_index(decode_date(&anchor.date));

    buckets
        .into_iter()
        .rev()
        .enumerate()
        .map(|(offset, entries)| {
            let rotation = (anchor_rotation - offset as i64).rem_euclid(VIRTUES.len() as i64);
            let virtue: &Virtue = &VIRTUES[rotation as usize];
            let quarter_label = if rotation == 0 {
                Some(quarter_label(anchor_abs - offset as i64))
            } else {
                None
            };
            WeekSummary {
                virtue: virtue.name,
                emoji: virtue.emoji,
                entries,
                quarter_label,
            }
        })
        .collect()
}

/// `"Qn YYYY"` for an absolute week index. 53-Sunday years clamp to Q4.
fn quarter_label(abs_index: i64) -> String {
    let year = abs_index.div_euclid(WEEKS_PER_YEAR as i64);
    let quarter = ((abs_index.rem_euclid(WEEKS_PER_YEAR as i64)) / 13 + 1).min(4);
    format!("Q{quarter} {year}")
}
