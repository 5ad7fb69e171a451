use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 100MB default size limit.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 104_857_600;

/// Widget configuration accepted at the boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum payload size in bytes; `None` means unlimited.
    pub max_file_size: Option<u64>,
    /// Accepted content-type patterns, verbatim (`"application/pdf"`) or
    /// wildcard (`"image/*"`). Empty means unrestricted.
    pub allowed_file_types: Vec<String>,
    /// Period of each entry's progress tick.
    pub tick_period: Duration,
    /// Period of the aggregate all-done watcher.
    pub watch_period: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            allowed_file_types: Vec::new(),
            tick_period: Duration::from_millis(300),
            watch_period: Duration::from_millis(1000),
        }
    }
}

impl UploadConfig {
    /// No size limit and no type restriction.
    pub fn unrestricted() -> Self {
        Self {
            max_file_size: None,
            allowed_file_types: Vec::new(),
            ..Self::default()
        }
    }
}
