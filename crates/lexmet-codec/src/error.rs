//! Error types for the lexmet-codec crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when encoding, decoding, or persisting data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The requested format name does not correspond to a known format.
    ///
    /// This is a configuration error: the caller asked for a format the
    /// system does not support, so no state has been touched.
    #[error("unknown storage format: {0}")]
    UnknownFormat(String),

    /// A value could not be encoded in the chosen format.
    #[error("failed to encode value as {format}: {message}")]
    Encode {
        /// Name of the format that failed.
        format: &'static str,
        /// Error message from the underlying encoder.
        message: String,
    },

    /// A file exists but its contents could not be decoded.
    ///
    /// Callers that treat corrupt persisted state as "absent" should
    /// convert this into a default value plus a warning rather than
    /// propagating it.
    #[error("failed to decode {path} as {format}: {message}")]
    Decode {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Name of the format that failed.
        format: &'static str,
        /// Error message from the underlying decoder.
        message: String,
    },

    /// I/O error while reading or writing a storage file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
