use thiserror::Error;

/// Why a candidate file was not added to the upload area.
///
/// Rejections are local and recoverable: they are collected per batch and
/// reported through a single notification, never propagated as a failure
/// of the add call itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("File {} exceeds maximum size of {}MB", .name, .limit / 1048576)]
    SizeExceeded { name: String, limit: u64 },
    #[error("File {name} type not allowed")]
    TypeNotAllowed { name: String, content_type: String },
    #[error("File {name} already added")]
    DuplicateName { name: String },
}

/// Terminal per-entry failure produced by the simulator's failure roll.
///
/// Its message is what gets frozen into the tracked entry's `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Simulated upload error")]
pub struct SimulatedTransferError;
