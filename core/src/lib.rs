//! Core of a client-side file-selection widget: size/type validation, an
//! ordered registry of tracked files with de-duplication by name, and a
//! timer-driven simulator that drives every entry to a terminal state
//! without a real transport.
//!
//! The presentation layer (drop target, file list, buttons) is an external
//! collaborator: it feeds [`UploadArea`] with candidate files and user
//! intents, renders the [`UploadArea::files`] snapshot, and receives
//! user-facing notifications through [`UploadSubscriber`].

mod area;
mod config;
mod error;
mod events;
mod random;
mod simulate;
mod validate;

pub use area::UploadArea;
pub use config::{UploadConfig, DEFAULT_MAX_FILE_SIZE};
pub use error::{Rejection, SimulatedTransferError};
pub use events::{
    FileCompletedEvent, FileFailedEvent, FilesAddedEvent, FilesRejectedEvent,
    UploadSubscriber,
};
pub use random::{
    RandomSource, ThreadRandom, FAILURE_PROBABILITY, MAX_PROGRESS_INCREMENT,
    MIN_PROGRESS_INCREMENT,
};
pub use validate::validate;
