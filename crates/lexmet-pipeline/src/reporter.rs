//! Progress reporting for pipeline runs.
//!
//! The pipeline never prints; everything a user would want to see flows
//! through a [`ProgressReporter`] supplied by the caller. Per-document
//! errors and corrupt-state warnings are reported with the phase and
//! document that produced them.

use std::fmt;

use crate::pipeline::RunStats;

/// A pipeline phase, used as context in progress and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Packing raw text sources into encoded source documents.
    PackSources,
    /// Per-document term frequency computation.
    TermFrequency,
    /// Corpus-wide collection frequency aggregation.
    CollectionFrequency,
    /// Corpus-wide document frequency aggregation.
    DocumentFrequency,
    /// Inverse document frequency table computation.
    InverseDocumentFrequency,
    /// Per-document TF-IDF weight computation.
    TfIdf,
    /// Balanced score computation.
    BalancedScore,
    /// Consolidated metric export.
    Export,
    /// Keyword category assignment.
    Categorize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PackSources => "pack sources",
            Self::TermFrequency => "term frequency",
            Self::CollectionFrequency => "collection frequency",
            Self::DocumentFrequency => "document frequency",
            Self::InverseDocumentFrequency => "inverse document frequency",
            Self::TfIdf => "tf-idf",
            Self::BalancedScore => "balanced score",
            Self::Export => "export",
            Self::Categorize => "categorize",
        };
        f.write_str(name)
    }
}

/// Callback interface for observing a pipeline run.
pub trait ProgressReporter {
    /// Called when a phase begins, with the number of items it will visit.
    fn on_phase_start(&mut self, phase: Phase, total: usize);

    /// Called when a document was processed successfully in a phase.
    fn on_file_done(&mut self, phase: Phase, doc_id: &str, current: usize, total: usize);

    /// Called when a document was skipped because its output already exists.
    fn on_file_skipped(&mut self, phase: Phase, doc_id: &str);

    /// Called when a document could not be read or decoded and was dropped
    /// from the rest of the run.
    fn on_file_error(&mut self, phase: Phase, doc_id: &str, error: &str);

    /// Called for non-fatal conditions, such as corrupt persisted state
    /// being replaced with an empty default.
    fn on_warning(&mut self, phase: Phase, message: &str);

    /// Called when the run finishes.
    fn on_complete(&mut self, stats: &RunStats);
}

/// A no-op reporter for silent runs.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_phase_start(&mut self, _phase: Phase, _total: usize) {}
    fn on_file_done(&mut self, _phase: Phase, _doc_id: &str, _current: usize, _total: usize) {}
    fn on_file_skipped(&mut self, _phase: Phase, _doc_id: &str) {}
    fn on_file_error(&mut self, _phase: Phase, _doc_id: &str, _error: &str) {}
    fn on_warning(&mut self, _phase: Phase, _message: &str) {}
    fn on_complete(&mut self, _stats: &RunStats) {}
}
