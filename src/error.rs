//! Error types for VLSM allocation.
//!
//! Every failure is terminal: the first error detected aborts the run and no
//! partial allocation is ever reported.

use std::path::PathBuf;

/// Errors that can occur while parsing input or allocating subnets
#[derive(Debug, thiserror::Error)]
pub enum VlsmError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid base CIDR format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("Invalid prefix length {prefix}: must be between 0 and 32")]
    InvalidPrefix { prefix: u64 },

    #[error("Cannot read requests file {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request line {line_number}: '{line}' (expected '<name> <count>')")]
    MalformedRequestLine { line_number: usize, line: String },

    #[error("Invalid request document {}: {reason}", path.display())]
    MalformedRequestDocument { path: PathBuf, reason: String },

    #[error("Invalid count {count} for request '{name}'")]
    InvalidCount { name: String, count: i64 },

    #[error("Insufficient address space: {required} addresses required, {available} available")]
    InsufficientSpace { required: u64, available: u64 },

    #[error("Invalid order '{0}'. Use 'asc' or 'desc'.")]
    InvalidOrder(String),

    #[error("Block {start:#010x} of size {size} for '{name}' is not aligned to the base network")]
    Misaligned { name: String, start: u64, size: u64 },
}
