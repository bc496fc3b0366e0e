//! Source document discovery and text loading.
//!
//! The term frequency phase reads from one of two source stages: packed
//! documents (encoded `{ "text": ... }` files) or plain `.txt` files. If
//! any packed documents exist they are used exclusively for the whole
//! phase; the two source kinds are never merged within one run.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use lexmet_codec::{CodecError, Format};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::{
    error::PipelineError,
    layout::{Layout, Stage},
    token::sanitize_file_stem,
};

/// File extension for raw text sources.
pub const RAW_EXTENSION: &str = ".txt";

/// A packed source document: extracted text wrapped for encoded storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackedText {
    /// The document's full plain text.
    pub text: String,
}

/// A source document eligible for the term frequency phase.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Document id: the sanitized source file stem, reused for every
    /// output file derived from this document.
    pub doc_id: String,
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Whether the file is a packed document rather than raw text.
    pub packed: bool,
}

impl SourceDocument {
    /// Loads the document's text.
    ///
    /// Packed documents are decoded with the run's format; raw documents
    /// are read as UTF-8 text. Failures here are per-document errors that
    /// the caller reports and skips.
    pub fn read_text(&self, format: Format) -> Result<String, CodecError> {
        if self.packed {
            let packed: Option<PackedText> = format.load(&self.path)?;
            Ok(packed.map(|p| p.text).unwrap_or_default())
        } else {
            Ok(fs::read_to_string(&self.path)?)
        }
    }
}

/// Discovers the source documents for a run.
///
/// Packed sources win outright when any exist; otherwise raw text sources
/// are used. Neither being present is a fatal missing-input error. The
/// returned list is sorted by document id so runs are deterministic.
pub fn discover_sources(
    layout: &Layout,
    format: Format,
) -> Result<Vec<SourceDocument>, PipelineError> {
    let packed_dir = layout.dir(Stage::SourcePacked, format)?;
    let raw_dir = layout.dir(Stage::SourceRaw, format)?;

    let packed = list_files_with_extension(&packed_dir, format.extension())?;
    let (files, packed) = if packed.is_empty() {
        (list_files_with_extension(&raw_dir, RAW_EXTENSION)?, false)
    } else {
        (packed, true)
    };

    if files.is_empty() {
        return Err(PipelineError::MissingSources {
            packed_dir,
            raw_dir,
        });
    }

    Ok(files
        .into_iter()
        .map(|path| SourceDocument {
            doc_id: sanitize_file_stem(&file_stem(&path)),
            path,
            packed,
        })
        .collect())
}

/// Lists regular files in `dir` with the given extension, sorted by name.
///
/// Only the directory itself is scanned; stage directories are flat.
pub(crate) fn list_files_with_extension(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(ext))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Returns a file's stem as a string.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn discover_prefers_packed_sources_exclusively() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        let format = Format::Json;

        let raw_dir = layout.dir(Stage::SourceRaw, format).unwrap();
        fs::write(raw_dir.join("raw_only.txt"), "raw text").unwrap();

        let packed_dir = layout.dir(Stage::SourcePacked, format).unwrap();
        let packed = PackedText {
            text: "packed text".to_string(),
        };
        format.save(&packed_dir.join("packed_only.json"), &packed).unwrap();

        let sources = discover_sources(&layout, format).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].doc_id, "packed_only");
        assert!(sources[0].packed);
    }

    #[test]
    fn discover_falls_back_to_raw_sources() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let raw_dir = layout.dir(Stage::SourceRaw, Format::Json).unwrap();
        fs::write(raw_dir.join("b.txt"), "second").unwrap();
        fs::write(raw_dir.join("a.txt"), "first").unwrap();
        fs::write(raw_dir.join("notes.md"), "ignored").unwrap();

        let sources = discover_sources(&layout, Format::Json).unwrap();
        let ids: Vec<_> = sources.iter().map(|s| s.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(sources.iter().all(|s| !s.packed));
    }

    #[test]
    fn discover_with_no_sources_is_fatal() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());

        let err = discover_sources(&layout, Format::Cbor).unwrap_err();
        assert!(matches!(err, PipelineError::MissingSources { .. }));
    }

    #[test]
    fn read_text_decodes_packed_documents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.cbor");
        let packed = PackedText {
            text: "Quantum mechanics".to_string(),
        };
        Format::Cbor.save(&path, &packed).unwrap();

        let doc = SourceDocument {
            doc_id: "doc".to_string(),
            path,
            packed: true,
        };
        assert_eq!(doc.read_text(Format::Cbor).unwrap(), "Quantum mechanics");
    }

    #[test]
    fn read_text_surfaces_corrupt_packed_documents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, b"{truncated").unwrap();

        let doc = SourceDocument {
            doc_id: "doc".to_string(),
            path,
            packed: true,
        };
        assert!(doc.read_text(Format::Json).is_err());
    }
}
