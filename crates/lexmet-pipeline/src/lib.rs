//! Corpus-wide lexical metrics pipeline and keyword categorizer.
//!
//! This crate computes term frequency, collection frequency, document
//! frequency, inverse document frequency, TF-IDF, and a balanced importance
//! score over a batch of text documents, persisting each stage to disk in
//! one of two interchangeable storage formats. It handles:
//! - Tokenization (lowercase word-boundary splitting, nothing more)
//! - Source discovery (packed documents preferred over raw text)
//! - The seven-phase metrics pipeline, resumable per document
//! - Keyword-based category assignment from TF-IDF vectors
//! - Read access to persisted output for downstream consumers
//!
//! # Example
//!
//! ```no_run
//! use lexmet_config::Config;
//! use lexmet_pipeline::{Analyzer, SilentReporter};
//!
//! let analyzer = Analyzer::new(Config::default());
//! let stats = analyzer.run_metrics("json", &mut SilentReporter).unwrap();
//! println!("{} documents in corpus", stats.total_documents);
//!
//! let clusters = analyzer.categorize("json", &mut SilentReporter).unwrap();
//! for (category, docs) in &clusters {
//!     println!("{category}: {}", docs.len());
//! }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod categorize;
mod error;
mod layout;
mod metrics;
mod pipeline;
mod report;
mod reporter;
mod source;
mod token;

pub use analyzer::Analyzer;
pub use categorize::{Categorizer, Clusters};
pub use error::PipelineError;
pub use layout::{Layout, Metric, Stage};
pub use lexmet_codec::{CodecError, Format};
pub use lexmet_config::{Category, Config};
pub use metrics::{
    TermCounts, TermWeights, balanced_scores, collection_frequency, document_frequency,
    inverse_document_frequency, round4, tfidf,
};
pub use pipeline::{MetricsPipeline, RunStats};
pub use report::{list_documents, load_consolidated, load_document, top_n};
pub use reporter::{Phase, ProgressReporter, SilentReporter};
pub use source::{PackedText, RAW_EXTENSION, SourceDocument, discover_sources};
pub use token::{count_tokens, sanitize_file_stem, tokenize};
