//! Trip store error types.

/// Errors from reading or writing the trip snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O error: {message}")]
    Io { message: String },

    /// The snapshot file could not be (de)serialized
    #[error("snapshot JSON error: {message}")]
    Json { message: String },
}
