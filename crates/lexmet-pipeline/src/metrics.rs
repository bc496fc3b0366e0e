//! Pure corpus metric computations.
//!
//! Every function here is a deterministic, side-effect-free reduction over
//! term maps. All aggregates are commutative sums or counts over
//! independent documents, with rounding applied only to final values, so
//! processing order never changes a result.

use std::collections::BTreeMap;

/// Per-document token counts, or an integer-valued corpus aggregate.
///
/// `BTreeMap` keeps keys ordered, which makes encoded output byte-stable
/// across runs.
pub type TermCounts = BTreeMap<String, u64>;

/// Token-to-weight mapping with values rounded to 4 decimal places.
pub type TermWeights = BTreeMap<String, f64>;

/// Rounds a value to 4 decimal places.
///
/// All persisted floating-point metrics carry exactly this precision.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Sums per-token counts across all documents (collection frequency).
pub fn collection_frequency<'a, I>(tf_maps: I) -> TermCounts
where
    I: IntoIterator<Item = &'a TermCounts>,
{
    let mut cf = TermCounts::new();
    for tf in tf_maps {
        for (token, count) in tf {
            *cf.entry(token.clone()).or_insert(0) += count;
        }
    }
    cf
}

/// Counts, per token, the number of documents it appears in.
///
/// A document contributes exactly 1 per token regardless of how many times
/// the token occurs within it.
pub fn document_frequency<'a, I>(tf_maps: I) -> TermCounts
where
    I: IntoIterator<Item = &'a TermCounts>,
{
    let mut df = TermCounts::new();
    for tf in tf_maps {
        for (token, count) in tf {
            if *count > 0 {
                *df.entry(token.clone()).or_insert(0) += 1;
            }
        }
    }
    df
}

/// Computes inverse document frequency: `ln(total_docs / df)` per token.
///
/// Tokens with a document frequency of 0 are excluded (they cannot occur
/// given how DF is built, but the guard keeps the invariant local).
pub fn inverse_document_frequency(df: &TermCounts, total_docs: u64) -> TermWeights {
    df.iter()
        .filter(|(_, count)| **count > 0)
        .map(|(token, count)| {
            let idf = (total_docs as f64 / *count as f64).ln();
            (token.clone(), round4(idf))
        })
        .collect()
}

/// Computes a document's TF-IDF weights from its term counts.
///
/// Tokens absent from the IDF table contribute weight 0.
pub fn tfidf(tf: &TermCounts, idf: &TermWeights) -> TermWeights {
    tf.iter()
        .map(|(token, count)| {
            let weight = *count as f64 * idf.get(token).copied().unwrap_or(0.0);
            (token.clone(), round4(weight))
        })
        .collect()
}

/// Computes the balanced score `ln(cf + 1) * df^2` for every token in CF.
///
/// Combines log-scaled total frequency with squared document spread, so
/// tokens that are both common and widespread dominate.
pub fn balanced_scores(cf: &TermCounts, df: &TermCounts) -> TermWeights {
    cf.iter()
        .map(|(token, count)| {
            let spread = df.get(token).copied().unwrap_or(0) as f64;
            let score = ((*count + 1) as f64).ln() * spread * spread;
            (token.clone(), round4(score))
        })
        .collect()
}
