//! Data model for the file-selection and upload-simulation core.
//!
//! This crate provides:
//! - `Data`: a trait for thread-safe, read-only byte sources.
//! - `InMemoryData`: an in-memory `Data` implementation with a protected
//!   cursor.
//! - `File`: a candidate payload wrapping an `Arc<dyn Data>` with a name and
//!   content type.
//! - `TrackedFile` / `FileStatus`: the lifecycle record of one file inside
//!   the upload area, from `Pending` through `Uploading` to a terminal
//!   `Completed` or `Error` state.
//!
//! The crate is dependency-free on purpose: it is the shared vocabulary
//! between the core logic and any presentation layer.

mod data;
mod file;
mod tracked;

/// Re-export of the byte source trait and its in-memory implementation.
pub use data::{Data, InMemoryData};
/// Re-export of the candidate payload abstraction backed by `Data`.
pub use file::File;
/// Re-export of the lifecycle record and its helpers.
pub use tracked::{format_file_size, FileStatus, TrackedFile};
