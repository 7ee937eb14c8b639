//! # Virtues Core Library
//!
//! Core business logic for the Virtues habit tracker, modeled on Benjamin
//! Franklin's thirteen-virtues method: each calendar week is assigned one
//! virtue from a fixed rotation, and each day is recorded as a pass or
//! fail for that week's virtue, optionally with a reflection note.
//!
//! ## Architecture
//!
//! - **Calendar**: pure `YYYYMMDD` date keys and week arithmetic
//! - **Virtue rotation**: static 13-entry table cycled by ISO week
//! - **Entry log**: deduplicated daily outcomes with score/streak queries
//! - **Week bucketing**: `unsqueeze` partitions the log into rendering
//!   buckets, synthesizing empty weeks for gaps
//! - **State machine**: pure reducer over user actions
//! - **Tracker**: session orchestration over an asynchronous string-keyed
//!   store; the GUI layer is a thin shell over this crate
//!
//! ## Key Components
//!
//! - [`Tracker`]: session state plus persistence
//! - [`EntryLog`]: the deduplicated daily outcome log
//! - [`virtue_for_date`]: the weekly rotation
//! - [`unsqueeze`]: week bucketing for the history grid

pub mod calendar;
pub mod entry;
pub mod error;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod virtue;
pub mod weeks;

pub use entry::{Entry, EntryLog, MAX_NOTE_CHARS};
pub use error::{ConfigError, CoreError, Result, StoreError};
pub use state::{Action, AppState};
pub use storage::{Config, FileStore, KvStore, MemoryStore};
pub use tracker::{RecordOutcome, Tracker};
pub use virtue::{virtue_for_date, Virtue, VIRTUES};
pub use weeks::{history, unsqueeze, WeekSummary};
