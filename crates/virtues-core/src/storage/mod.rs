mod config;
pub mod store;

pub use config::Config;
pub use store::{FileStore, KvStore, MemoryStore, ENTRIES_KEY};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/virtues[-dev]/` based on VIRTUES_ENV.
///
/// Set VIRTUES_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VIRTUES_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("virtues-dev")
    } else {
        base_dir.join("virtues")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
