//! Read access to persisted pipeline output.
//!
//! The visualization layer consumes the pipeline's consolidated exports and
//! per-document files without the pipeline depending on it in return. These
//! helpers only read; missing or corrupt files degrade to empty mappings,
//! mirroring how the pipeline itself treats absent state.

use std::cmp::Ordering;

use crate::{
    error::PipelineError,
    layout::{Layout, Metric, Stage},
    metrics::TermWeights,
    source::{file_stem, list_files_with_extension},
};

use lexmet_codec::Format;

/// Lists the document ids persisted for a per-document stage, sorted.
pub fn list_documents(
    layout: &Layout,
    stage: Stage,
    format: Format,
) -> Result<Vec<String>, PipelineError> {
    let dir = layout.dir(stage, format)?;
    let files = list_files_with_extension(&dir, format.extension())?;
    Ok(files.iter().map(|path| file_stem(path)).collect())
}

/// Loads one consolidated corpus metric.
///
/// Integer-valued metrics (CF, DF) are widened to floats so callers can
/// treat all four exports uniformly. Missing or corrupt files read as
/// empty.
pub fn load_consolidated(
    layout: &Layout,
    format: Format,
    metric: Metric,
) -> Result<TermWeights, PipelineError> {
    let path = layout.result_path(format, metric)?;
    let (weights, _warning) = format.load_or_default(&path);
    Ok(weights)
}

/// Loads one per-document mapping (TF or TF-IDF) by document id.
///
/// Missing or corrupt files read as empty.
pub fn load_document(
    layout: &Layout,
    stage: Stage,
    format: Format,
    doc_id: &str,
) -> Result<TermWeights, PipelineError> {
    let path = layout.document_path(stage, format, doc_id)?;
    let (weights, _warning) = format.load_or_default(&path);
    Ok(weights)
}

/// Returns the `n` highest-valued entries of a mapping.
///
/// Sorted by descending value, ties broken by ascending key, so display
/// order is deterministic.
pub fn top_n(map: &TermWeights, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = map
        .iter()
        .map(|(token, value)| (token.clone(), *value))
        .collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(n);
    entries
}
