//! Driver facade for the pipeline.
//!
//! [`Analyzer`] wires configuration into a storage layout and exposes the
//! per-stage entry points a shell or UI layer would call: packing sources,
//! running the metrics pipeline, and categorizing documents. Each call is
//! parameterized by a format name; an unrecognized name fails before any
//! state is touched.

use std::{fs, path::Path};

use lexmet_codec::Format;
use lexmet_config::Config;

use crate::{
    categorize::{Categorizer, Clusters},
    error::PipelineError,
    layout::{Layout, Stage},
    pipeline::{MetricsPipeline, RunStats},
    reporter::{Phase, ProgressReporter},
    source::{PackedText, RAW_EXTENSION, file_stem, list_files_with_extension},
    token::sanitize_file_stem,
};

/// Top-level entry surface over one configured data root.
pub struct Analyzer {
    /// Resolved configuration.
    config: Config,
    /// Storage layout rooted at the configured data directory.
    layout: Layout,
}

impl Analyzer {
    /// Creates an analyzer from a resolved configuration.
    pub fn new(config: Config) -> Self {
        let layout = Layout::new(&config.data_dir);
        Self { config, layout }
    }

    /// Loads configuration from `config_path` and creates an analyzer.
    ///
    /// A missing config file yields the built-in defaults.
    pub fn load(config_path: &Path) -> Result<Self, PipelineError> {
        Ok(Self::new(Config::load(config_path)?))
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the storage layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Runs the full seven-phase metrics pipeline for a format.
    pub fn run_metrics<R: ProgressReporter>(
        &self,
        format_name: &str,
        reporter: &mut R,
    ) -> Result<RunStats, PipelineError> {
        let format = Format::from_name(format_name)?;
        MetricsPipeline::new(&self.layout, format).run(reporter)
    }

    /// Buckets documents into the configured categories from the current
    /// TF-IDF snapshot.
    pub fn categorize<R: ProgressReporter>(
        &self,
        format_name: &str,
        reporter: &mut R,
    ) -> Result<Clusters, PipelineError> {
        let format = Format::from_name(format_name)?;
        Categorizer::new(self.config.categories.clone()).categorize(&self.layout, format, reporter)
    }

    /// Packs every raw text source into an encoded source document.
    ///
    /// Existing packed outputs are skipped (idempotence by file presence).
    /// Returns the number of documents packed this call; no raw sources at
    /// all is a missing-input error.
    pub fn pack_sources<R: ProgressReporter>(
        &self,
        format_name: &str,
        reporter: &mut R,
    ) -> Result<usize, PipelineError> {
        let format = Format::from_name(format_name)?;
        let raw_dir = self.layout.dir(Stage::SourceRaw, format)?;
        let packed_dir = self.layout.dir(Stage::SourcePacked, format)?;

        let files = list_files_with_extension(&raw_dir, RAW_EXTENSION)?;
        if files.is_empty() {
            return Err(PipelineError::MissingSources {
                packed_dir,
                raw_dir,
            });
        }

        reporter.on_phase_start(Phase::PackSources, files.len());
        let total = files.len();
        let mut packed = 0;
        for (current, path) in files.iter().enumerate() {
            let doc_id = sanitize_file_stem(&file_stem(path));
            let target = self
                .layout
                .document_path(Stage::SourcePacked, format, &doc_id)?;
            if target.exists() {
                reporter.on_file_skipped(Phase::PackSources, &doc_id);
                continue;
            }

            match fs::read_to_string(path) {
                Ok(text) => {
                    format.save(&target, &PackedText { text })?;
                    packed += 1;
                    reporter.on_file_done(Phase::PackSources, &doc_id, current + 1, total);
                }
                Err(e) => {
                    reporter.on_file_error(Phase::PackSources, &doc_id, &e.to_string());
                }
            }
        }
        Ok(packed)
    }
}
