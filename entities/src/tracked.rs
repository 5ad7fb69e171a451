use crate::File;

/// Lifecycle state of a tracked file.
///
/// `Completed` and `Error` are terminal: nothing transitions out of them
/// except removal from the upload area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Pending,
    Uploading,
    Completed,
    Error,
}

impl FileStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, FileStatus::Completed | FileStatus::Error)
    }
}

/// One file inside the upload area, together with its simulation state.
///
/// Invariants maintained by the core:
/// - `id` is unique within the area and never changes.
/// - `progress` stays in `[0, 100]`; it is 0 while `Pending`, exactly 100
///   when `Completed`, and frozen at its last value on `Error`.
/// - `error` is set only when `status` is [`FileStatus::Error`].
#[derive(Clone)]
pub struct TrackedFile {
    pub id: String,
    pub file: File,
    pub progress: f64,
    pub status: FileStatus,
    pub error: Option<String>,
}

impl TrackedFile {
    pub fn new(id: String, file: File) -> Self {
        Self {
            id,
            file,
            progress: 0.0,
            status: FileStatus::Pending,
            error: None,
        }
    }
}

impl std::fmt::Debug for TrackedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedFile")
            .field("id", &self.id)
            .field("name", &self.file.name)
            .field("progress", &self.progress)
            .field("status", &self.status)
            .field("error", &self.error)
            .finish()
    }
}

/// Human-readable file size for list rendering, one decimal place.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
