//! Keyword-based document categorization.
//!
//! Scores each document's persisted TF-IDF vector against a fixed table of
//! keyword categories and buckets documents under their best-fit category.
//! The computation is read-only with respect to pipeline state and
//! deterministic for a fixed TF-IDF snapshot; assignments are recomputed on
//! demand, never persisted.

use std::collections::BTreeMap;

use lexmet_codec::Format;
use lexmet_config::{Category, default_categories};

use crate::{
    error::PipelineError,
    layout::{Layout, Stage},
    metrics::TermWeights,
    reporter::{Phase, ProgressReporter},
    source::{file_stem, list_files_with_extension},
};

/// Cluster mapping: category name to the ordered list of assigned
/// document ids.
pub type Clusters = BTreeMap<String, Vec<String>>;

/// Assigns documents to keyword-defined categories by TF-IDF score.
pub struct Categorizer {
    /// Category table in declaration order; earlier categories win ties.
    categories: Vec<Category>,
}

impl Categorizer {
    /// Creates a categorizer over the given category table.
    ///
    /// Declaration order matters: when several categories reach the same
    /// maximal score for a document, the first declared one wins.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Creates a categorizer over the built-in category table.
    pub fn with_defaults() -> Self {
        Self::new(default_categories())
    }

    /// Buckets every document with a persisted TF-IDF map into categories.
    ///
    /// A document is assigned only when its best category score is
    /// strictly positive; documents scoring 0 against every category are
    /// left out of all clusters. Corrupt TF-IDF files are read as empty
    /// (and therefore unclassified) with a warning.
    pub fn categorize<R: ProgressReporter>(
        &self,
        layout: &Layout,
        format: Format,
        reporter: &mut R,
    ) -> Result<Clusters, PipelineError> {
        let dir = layout.dir(Stage::TfIdf, format)?;
        let files = list_files_with_extension(&dir, format.extension())?;
        reporter.on_phase_start(Phase::Categorize, files.len());

        let mut clusters = Clusters::new();
        for path in files {
            let (weights, warning): (TermWeights, _) = format.load_or_default(&path);
            if let Some(warning) = warning {
                reporter.on_warning(Phase::Categorize, &warning.to_string());
            }

            if let Some(best) = self.best_category(&weights) {
                clusters
                    .entry(best.to_string())
                    .or_default()
                    .push(file_stem(&path));
            }
        }
        Ok(clusters)
    }

    /// Sums a document's TF-IDF weights over one category's keywords.
    ///
    /// Keywords absent from the document contribute 0.
    pub fn score(category: &Category, weights: &TermWeights) -> f64 {
        category
            .keywords
            .iter()
            .map(|keyword| weights.get(keyword).copied().unwrap_or(0.0))
            .sum()
    }

    /// Returns the name of the strictly best-scoring category, if any
    /// category scores above 0.
    fn best_category(&self, weights: &TermWeights) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut best_score = 0.0;
        for category in &self.categories {
            let score = Self::score(category, weights);
            if score > best_score {
                best = Some(&category.name);
                best_score = score;
            }
        }
        best
    }
}
