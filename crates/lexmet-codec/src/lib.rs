//! Pluggable storage codecs for lexmet.
//!
//! Every mapping the metrics pipeline persists (term frequencies, TF-IDF
//! weights, consolidated corpus metrics, packed source text) goes through
//! one of two interchangeable formats: human-readable JSON or compact
//! binary CBOR. The format is an opaque storage detail; both encodings
//! carry identical logical content, and the pipeline's behavior must not
//! depend on which one is active.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use lexmet_codec::Format;
//!
//! let format = Format::from_name("json").unwrap();
//! let mut counts: BTreeMap<String, u64> = BTreeMap::new();
//! counts.insert("energy".to_string(), 5);
//!
//! format.save("counts.json".as_ref(), &counts).unwrap();
//! let loaded: Option<BTreeMap<String, u64>> = format.load("counts.json".as_ref()).unwrap();
//! assert_eq!(loaded.unwrap(), counts);
//! ```

#![warn(missing_docs)]

mod error;
mod format;

pub use error::CodecError;
pub use format::Format;
