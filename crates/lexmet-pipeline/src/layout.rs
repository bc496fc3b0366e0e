//! Storage layout resolution.
//!
//! Maps each (pipeline stage, format) pair to a stable directory under the
//! data root, creating it on first use. The layout performs no data
//! transformation; it only answers "where does this stage's data live".

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use lexmet_codec::Format;

/// A pipeline storage stage.
///
/// Each stage is duplicated once per supported format, so runs in different
/// formats never observe each other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Raw text source documents (`.txt`), produced by the external
    /// extraction collaborator.
    SourceRaw,
    /// Pre-packed source documents (`{ "text": ... }` encoded in the
    /// run's format), preferred over raw text when present.
    SourcePacked,
    /// Per-document term frequency maps.
    TermFrequency,
    /// Per-document TF-IDF weight maps.
    TfIdf,
    /// Consolidated corpus-wide exports.
    Results,
}

impl Stage {
    /// Directory name fragment for this stage.
    fn dir_name(self) -> &'static str {
        match self {
            Self::SourceRaw => "source-raw",
            Self::SourcePacked => "source-packed",
            Self::TermFrequency => "tf-output",
            Self::TfIdf => "tfidf-output",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A consolidated corpus-wide metric exported by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total occurrences of each token across the corpus.
    CollectionFrequency,
    /// Number of documents each token appears in.
    DocumentFrequency,
    /// Log-scaled rarity of each token.
    InverseDocumentFrequency,
    /// Composite importance score per token.
    BalancedScore,
}

impl Metric {
    /// All consolidated metrics, in export order.
    pub const ALL: [Self; 4] = [
        Self::CollectionFrequency,
        Self::DocumentFrequency,
        Self::InverseDocumentFrequency,
        Self::BalancedScore,
    ];

    /// File stem of the consolidated export for this metric.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::CollectionFrequency => "CF_RESULTS",
            Self::DocumentFrequency => "DF_RESULTS",
            Self::InverseDocumentFrequency => "IDF_RESULTS",
            Self::BalancedScore => "BALANCED_SCORE",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Resolves stage directories under a single data root.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Root directory for all pipeline data.
    root: PathBuf,
}

impl Layout {
    /// Creates a layout rooted at `root`.
    ///
    /// Nothing is created until a directory is first requested.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory for a stage in a format, creating it if absent.
    pub fn dir(&self, stage: Stage, format: Format) -> io::Result<PathBuf> {
        let dir = self
            .root
            .join(format!("{}-{}", stage.dir_name(), format.name()));
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Returns the path of a per-document file for a stage.
    ///
    /// The file is named after the document id plus the format's extension.
    pub fn document_path(
        &self,
        stage: Stage,
        format: Format,
        doc_id: &str,
    ) -> io::Result<PathBuf> {
        Ok(self
            .dir(stage, format)?
            .join(format!("{doc_id}{}", format.extension())))
    }

    /// Returns the path of a consolidated export file.
    pub fn result_path(&self, format: Format, metric: Metric) -> io::Result<PathBuf> {
        Ok(self
            .dir(Stage::Results, format)?
            .join(format!("{}{}", metric.file_stem(), format.extension())))
    }
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn dir_is_stable_and_created() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let first = layout.dir(Stage::TermFrequency, Format::Json).unwrap();
        let second = layout.dir(Stage::TermFrequency, Format::Json).unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(first.ends_with("tf-output-json"));
    }

    #[test]
    fn dirs_are_distinct_per_stage_and_format() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let mut seen = std::collections::HashSet::new();
        for stage in [
            Stage::SourceRaw,
            Stage::SourcePacked,
            Stage::TermFrequency,
            Stage::TfIdf,
            Stage::Results,
        ] {
            for format in Format::ALL {
                assert!(seen.insert(layout.dir(stage, format).unwrap()));
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn document_path_uses_format_extension() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let path = layout
            .document_path(Stage::TfIdf, Format::Cbor, "mechanics")
            .unwrap();
        assert!(path.ends_with("tfidf-output-cbor/mechanics.cbor"));
    }

    #[test]
    fn result_path_uses_fixed_stems() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let path = layout
            .result_path(Format::Json, Metric::BalancedScore)
            .unwrap();
        assert!(path.ends_with("results-json/BALANCED_SCORE.json"));
    }
}
