//! The seven-phase metrics pipeline.
//!
//! The [`MetricsPipeline`] orchestrates the full corpus computation for one
//! storage format:
//! 1. Per-document term frequencies (resumable: existing outputs are kept)
//! 2. Collection frequency aggregation
//! 3. Document frequency aggregation
//! 4. Inverse document frequency table
//! 5. Per-document TF-IDF weights (always recomputed)
//! 6. Balanced scores
//! 7. Consolidated exports
//!
//! Phases run in strict order; phases 2-7 always run together once phase 1
//! has produced at least one term frequency file.

use lexmet_codec::Format;

use crate::{
    error::PipelineError,
    layout::{Layout, Metric, Stage},
    metrics::{
        TermCounts, balanced_scores, collection_frequency, document_frequency,
        inverse_document_frequency, tfidf,
    },
    reporter::{Phase, ProgressReporter},
    source::{discover_sources, file_stem, list_files_with_extension},
    token::count_tokens,
};

/// Statistics from a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Documents whose term frequencies were computed this run.
    pub documents_processed: usize,
    /// Documents skipped because their TF output already existed.
    pub documents_skipped: usize,
    /// Documents counted in the corpus aggregates (all TF files present).
    pub total_documents: usize,
    /// Distinct tokens in the IDF table.
    pub vocabulary_size: usize,
    /// Corrupt persisted files that were read as empty.
    pub corrupt_files: usize,
    /// Per-document errors (document id, error message).
    pub document_errors: Vec<(String, String)>,
}

impl RunStats {
    /// Returns true if no document was dropped and no state was corrupt.
    pub fn is_success(&self) -> bool {
        self.document_errors.is_empty() && self.corrupt_files == 0
    }
}

/// Orchestrates the seven metric phases for one format.
pub struct MetricsPipeline<'a> {
    /// Storage layout for all stage directories.
    layout: &'a Layout,
    /// The storage format this run is scoped to.
    format: Format,
}

impl<'a> MetricsPipeline<'a> {
    /// Creates a pipeline scoped to one layout and format.
    pub fn new(layout: &'a Layout, format: Format) -> Self {
        Self { layout, format }
    }

    /// Runs all seven phases in order.
    ///
    /// Fails fast if no source documents exist or if phase 1 leaves no
    /// term frequency files; per-document errors are reported and skipped
    /// without aborting the run. State written by earlier runs is never
    /// rolled back.
    pub fn run<R: ProgressReporter>(&self, reporter: &mut R) -> Result<RunStats, PipelineError> {
        let mut stats = RunStats::default();

        self.compute_term_frequencies(reporter, &mut stats)?;

        let tf_maps = self.load_term_frequencies(reporter, &mut stats)?;
        let total_docs = tf_maps.len() as u64;
        stats.total_documents = tf_maps.len();

        reporter.on_phase_start(Phase::CollectionFrequency, tf_maps.len());
        let cf = collection_frequency(tf_maps.iter().map(|(_, counts)| counts));

        reporter.on_phase_start(Phase::DocumentFrequency, tf_maps.len());
        let df = document_frequency(tf_maps.iter().map(|(_, counts)| counts));

        reporter.on_phase_start(Phase::InverseDocumentFrequency, df.len());
        let idf = inverse_document_frequency(&df, total_docs);
        stats.vocabulary_size = idf.len();

        // TF-IDF depends on the freshly recomputed IDF table, so every
        // document is rewritten even when its file already exists.
        reporter.on_phase_start(Phase::TfIdf, tf_maps.len());
        for (current, (doc_id, counts)) in tf_maps.iter().enumerate() {
            let weights = tfidf(counts, &idf);
            let path = self
                .layout
                .document_path(Stage::TfIdf, self.format, doc_id)?;
            self.format.save(&path, &weights)?;
            reporter.on_file_done(Phase::TfIdf, doc_id, current + 1, tf_maps.len());
        }

        reporter.on_phase_start(Phase::BalancedScore, cf.len());
        let balanced = balanced_scores(&cf, &df);

        reporter.on_phase_start(Phase::Export, Metric::ALL.len());
        self.format
            .save(&self.layout.result_path(self.format, Metric::CollectionFrequency)?, &cf)?;
        self.format
            .save(&self.layout.result_path(self.format, Metric::DocumentFrequency)?, &df)?;
        self.format
            .save(&self.layout.result_path(self.format, Metric::InverseDocumentFrequency)?, &idf)?;
        self.format
            .save(&self.layout.result_path(self.format, Metric::BalancedScore)?, &balanced)?;

        reporter.on_complete(&stats);
        Ok(stats)
    }

    /// Phase 1: computes term frequencies for every source document whose
    /// output file does not already exist.
    fn compute_term_frequencies<R: ProgressReporter>(
        &self,
        reporter: &mut R,
        stats: &mut RunStats,
    ) -> Result<(), PipelineError> {
        let sources = discover_sources(self.layout, self.format)?;
        reporter.on_phase_start(Phase::TermFrequency, sources.len());

        let total = sources.len();
        for (current, source) in sources.iter().enumerate() {
            let target = self
                .layout
                .document_path(Stage::TermFrequency, self.format, &source.doc_id)?;

            // Idempotence is keyed by document id, not content: an existing
            // output file is treated as authoritative.
            if target.exists() {
                stats.documents_skipped += 1;
                reporter.on_file_skipped(Phase::TermFrequency, &source.doc_id);
                continue;
            }

            let text = match source.read_text(self.format) {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => {
                    stats
                        .document_errors
                        .push((source.doc_id.clone(), "document has no text".to_string()));
                    reporter.on_file_error(
                        Phase::TermFrequency,
                        &source.doc_id,
                        "document has no text",
                    );
                    continue;
                }
                Err(e) => {
                    let message = e.to_string();
                    stats
                        .document_errors
                        .push((source.doc_id.clone(), message.clone()));
                    reporter.on_file_error(Phase::TermFrequency, &source.doc_id, &message);
                    continue;
                }
            };

            let counts = count_tokens(&text);
            self.format.save(&target, &counts)?;
            stats.documents_processed += 1;
            reporter.on_file_done(Phase::TermFrequency, &source.doc_id, current + 1, total);
        }

        Ok(())
    }

    /// Loads every persisted term frequency map, sorted by document id.
    ///
    /// Corrupt files are read as empty maps and surfaced as warnings; they
    /// still count toward the corpus total, matching their on-disk
    /// presence. An empty directory is fatal: nothing downstream can run.
    fn load_term_frequencies<R: ProgressReporter>(
        &self,
        reporter: &mut R,
        stats: &mut RunStats,
    ) -> Result<Vec<(String, TermCounts)>, PipelineError> {
        let tf_dir = self.layout.dir(Stage::TermFrequency, self.format)?;
        let files = list_files_with_extension(&tf_dir, self.format.extension())?;

        if files.is_empty() {
            return Err(PipelineError::NoTermFrequencies { dir: tf_dir });
        }

        let mut tf_maps = Vec::with_capacity(files.len());
        for path in files {
            let (counts, warning): (TermCounts, _) = self.format.load_or_default(&path);
            if let Some(warning) = warning {
                stats.corrupt_files += 1;
                reporter.on_warning(Phase::CollectionFrequency, &warning.to_string());
            }
            tf_maps.push((file_stem(&path), counts));
        }
        Ok(tf_maps)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use crate::metrics::{TermWeights, round4};
    use crate::reporter::SilentReporter;
    use crate::source::PackedText;

    use super::*;

    /// Test reporter that records all events.
    #[derive(Default)]
    struct TestReporter {
        events: Vec<String>,
    }

    impl ProgressReporter for TestReporter {
        fn on_phase_start(&mut self, phase: Phase, total: usize) {
            self.events.push(format!("phase: {phase} ({total})"));
        }

        fn on_file_done(&mut self, phase: Phase, doc_id: &str, current: usize, total: usize) {
            self.events
                .push(format!("done: {phase} {doc_id} ({current}/{total})"));
        }

        fn on_file_skipped(&mut self, phase: Phase, doc_id: &str) {
            self.events.push(format!("skipped: {phase} {doc_id}"));
        }

        fn on_file_error(&mut self, phase: Phase, doc_id: &str, error: &str) {
            self.events.push(format!("error: {phase} {doc_id} - {error}"));
        }

        fn on_warning(&mut self, phase: Phase, message: &str) {
            self.events.push(format!("warning: {phase} - {message}"));
        }

        fn on_complete(&mut self, stats: &RunStats) {
            self.events.push(format!(
                "complete: {} processed, {} skipped",
                stats.documents_processed, stats.documents_skipped
            ));
        }
    }

    fn write_raw_sources(layout: &Layout, format: Format, docs: &[(&str, &str)]) {
        let raw_dir = layout.dir(Stage::SourceRaw, format).unwrap();
        for (name, text) in docs {
            fs::write(raw_dir.join(format!("{name}.txt")), text).unwrap();
        }
    }

    #[test]
    fn run_produces_all_outputs() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;
        write_raw_sources(
            &layout,
            format,
            &[("alpha", "energy energy mass"), ("beta", "energy force")],
        );

        let stats = MetricsPipeline::new(&layout, format)
            .run(&mut SilentReporter)
            .unwrap();

        assert_eq!(stats.documents_processed, 2);
        assert_eq!(stats.total_documents, 2);
        assert!(stats.is_success());

        for metric in Metric::ALL {
            assert!(layout.result_path(format, metric).unwrap().exists());
        }
        assert!(layout
            .document_path(Stage::TfIdf, format, "alpha")
            .unwrap()
            .exists());
    }

    #[test]
    fn run_without_sources_fails() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let err = MetricsPipeline::new(&layout, Format::Json)
            .run(&mut SilentReporter)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingSources { .. }));
    }

    #[test]
    fn second_run_skips_existing_tf_files_byte_identically() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;
        write_raw_sources(&layout, format, &[("alpha", "one two two")]);

        let pipeline = MetricsPipeline::new(&layout, format);
        pipeline.run(&mut SilentReporter).unwrap();

        let tf_path = layout
            .document_path(Stage::TermFrequency, format, "alpha")
            .unwrap();
        let before = fs::read(&tf_path).unwrap();

        let stats = pipeline.run(&mut SilentReporter).unwrap();
        assert_eq!(stats.documents_processed, 0);
        assert_eq!(stats.documents_skipped, 1);
        assert_eq!(fs::read(&tf_path).unwrap(), before);
    }

    #[test]
    fn unreadable_source_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;

        // One good packed document and one corrupt one.
        let packed_dir = layout.dir(Stage::SourcePacked, format).unwrap();
        format
            .save(
                &packed_dir.join("good.json"),
                &PackedText {
                    text: "gravity waves".to_string(),
                },
            )
            .unwrap();
        fs::write(packed_dir.join("bad.json"), b"{truncated").unwrap();

        let mut reporter = TestReporter::default();
        let stats = MetricsPipeline::new(&layout, format)
            .run(&mut reporter)
            .unwrap();

        assert_eq!(stats.documents_processed, 1);
        assert_eq!(stats.document_errors.len(), 1);
        assert_eq!(stats.document_errors[0].0, "bad");
        assert!(reporter.events.iter().any(|e| e.starts_with("error: ")));
    }

    #[test]
    fn corrupt_tf_file_is_read_as_empty_with_warning() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;
        write_raw_sources(&layout, format, &[("alpha", "energy")]);

        // A stray corrupt TF file from an earlier run.
        let tf_dir = layout.dir(Stage::TermFrequency, format).unwrap();
        fs::write(tf_dir.join("mangled.json"), b"\xff\xff").unwrap();

        let mut reporter = TestReporter::default();
        let stats = MetricsPipeline::new(&layout, format)
            .run(&mut reporter)
            .unwrap();

        assert_eq!(stats.corrupt_files, 1);
        // The corrupt file still counts as a document on disk.
        assert_eq!(stats.total_documents, 2);
        assert!(reporter.events.iter().any(|e| e.starts_with("warning: ")));
    }

    #[test]
    fn end_to_end_energy_scenario() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;
        write_raw_sources(
            &layout,
            format,
            &[
                ("one", "energy energy energy photon"),
                ("two", "energy energy mass"),
                ("three", "gravity field"),
            ],
        );

        MetricsPipeline::new(&layout, format)
            .run(&mut SilentReporter)
            .unwrap();

        let cf: TermCounts = format
            .load(&layout.result_path(format, Metric::CollectionFrequency).unwrap())
            .unwrap()
            .unwrap();
        let df: TermCounts = format
            .load(&layout.result_path(format, Metric::DocumentFrequency).unwrap())
            .unwrap()
            .unwrap();
        let idf: TermWeights = format
            .load(&layout.result_path(format, Metric::InverseDocumentFrequency).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(cf["energy"], 5);
        assert_eq!(df["energy"], 2);
        let expected_idf = round4((3.0_f64 / 2.0).ln());
        assert_eq!(idf["energy"], expected_idf);

        let tfidf_one: TermWeights = format
            .load(&layout.document_path(Stage::TfIdf, format, "one").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(tfidf_one["energy"], round4(3.0 * expected_idf));
    }

    #[test]
    fn formats_produce_equivalent_metrics() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let docs = [("alpha", "energy energy mass"), ("beta", "energy force")];

        let mut results = Vec::new();
        for format in Format::ALL {
            write_raw_sources(&layout, format, &docs);
            MetricsPipeline::new(&layout, format)
                .run(&mut SilentReporter)
                .unwrap();

            let cf: TermCounts = format
                .load(&layout.result_path(format, Metric::CollectionFrequency).unwrap())
                .unwrap()
                .unwrap();
            let idf: TermWeights = format
                .load(&layout.result_path(format, Metric::InverseDocumentFrequency).unwrap())
                .unwrap()
                .unwrap();
            results.push((cf, idf));
        }

        assert_eq!(results[0], results[1]);
    }
}
