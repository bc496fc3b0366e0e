//! Storage format selection and typed save/load.
//!
//! The pipeline persists every intermediate and consolidated result through
//! one of exactly two interchangeable encodings: pretty-printed JSON for
//! human inspection, or CBOR for compact binary storage. The two formats
//! carry identical logical content; which one is active is an explicit
//! value threaded through each call, never hidden global state.

use std::{fmt, fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::CodecError;

/// A storage format for persisted mappings.
///
/// Both variants round-trip strings, integers, and 4-decimal-rounded floats
/// losslessly, and `save` followed by `load` of equal data is byte-stable
/// (map keys are ordered before encoding by the callers' `BTreeMap`s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Human-readable JSON, pretty-printed.
    Json,
    /// Compact binary CBOR.
    Cbor,
}

impl Format {
    /// All supported formats, in declaration order.
    pub const ALL: [Self; 2] = [Self::Json, Self::Cbor];

    /// Resolves a format from its configuration name.
    ///
    /// Returns [`CodecError::UnknownFormat`] for anything other than
    /// `"json"` or `"cbor"`; this is a configuration error and callers
    /// must fail before writing any state.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name {
            "json" => Ok(Self::Json),
            "cbor" => Ok(Self::Cbor),
            other => Err(CodecError::UnknownFormat(other.to_string())),
        }
    }

    /// The short lowercase name of this format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Cbor => "cbor",
        }
    }

    /// Filename extension for files stored in this format, with leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Cbor => ".cbor",
        }
    }

    /// Encodes a value to bytes in this format.
    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Json => serde_json::to_vec_pretty(value).map_err(|e| CodecError::Encode {
                format: self.name(),
                message: e.to_string(),
            }),
            Self::Cbor => serde_cbor::to_vec(value).map_err(|e| CodecError::Encode {
                format: self.name(),
                message: e.to_string(),
            }),
        }
    }

    /// Decodes a value from bytes in this format.
    ///
    /// The `path` is used only for error context.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8], path: &Path) -> Result<T, CodecError> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
                path: path.to_path_buf(),
                format: self.name(),
                message: e.to_string(),
            }),
            Self::Cbor => serde_cbor::from_slice(bytes).map_err(|e| CodecError::Decode {
                path: path.to_path_buf(),
                format: self.name(),
                message: e.to_string(),
            }),
        }
    }

    /// Saves a value to `path`, fully overwriting any existing file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save<T: Serialize>(self, path: &Path, value: &T) -> Result<(), CodecError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = self.encode(value)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a value from `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist, and a
    /// [`CodecError::Decode`] if it exists but cannot be parsed.
    pub fn load<T: DeserializeOwned>(self, path: &Path) -> Result<Option<T>, CodecError> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        self.decode(&bytes, path).map(Some)
    }

    /// Loads a value from `path`, substituting the default for missing or
    /// corrupt files.
    ///
    /// A corrupt file yields the default plus the decode error so the
    /// caller can surface it as a non-fatal warning.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        self,
        path: &Path,
    ) -> (T, Option<CodecError>) {
        match self.load(path) {
            Ok(Some(value)) => (value, None),
            Ok(None) => (T::default(), None),
            Err(e) => (T::default(), Some(e)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
