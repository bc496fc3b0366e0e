//! Error types for the lexmet-pipeline crate.

use std::{io, path::PathBuf};

use lexmet_codec::CodecError;
use lexmet_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when running the metrics pipeline.
///
/// Per-document read and decode failures are not represented here: they are
/// reported through the progress reporter and recorded in the run stats,
/// never escalated to a pipeline-level failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No source documents were found for the term frequency phase.
    ///
    /// Aborts the run; state written by earlier runs is left intact.
    #[error("no source documents found in {packed_dir} or {raw_dir}")]
    MissingSources {
        /// The packed source directory that was checked first.
        packed_dir: PathBuf,
        /// The raw text source directory that was checked second.
        raw_dir: PathBuf,
    },

    /// The term frequency phase left no output files to aggregate.
    ///
    /// Every later phase depends on at least one TF map, so the run stops.
    #[error("no term frequency files present in {dir}")]
    NoTermFrequencies {
        /// The TF output directory that turned out empty.
        dir: PathBuf,
    },

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A storage operation failed fatally.
    ///
    /// Unknown-format selection and failures while writing outputs land
    /// here; decode failures on individual documents do not.
    #[error("storage error: {0}")]
    Codec(#[from] CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
