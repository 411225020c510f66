//! Data model: file descriptors and thumbnail results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied record identifying a file plus arbitrary extra fields.
///
/// The pipeline treats descriptors as read-only; batch results carry a clone
/// of the original descriptor alongside the outcome, so every caller field
/// survives the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File identifier: a local path or URL. Descriptors without one (or
    /// with an empty one) are silently excluded from batch runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Extra caller fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileDescriptor {
    /// Create a descriptor for the given identifier.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            extra: Map::new(),
        }
    }
}

/// Outcome of one thumbnail attempt.
///
/// Exactly one variant is produced per non-aborted attempt, and the
/// discriminant always agrees with the payload. Aborted attempts produce no
/// `Thumbnail` at all: the pipeline returns `None` instead, so callers check
/// for cancellation before inspecting the discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "thumbType", content = "thumbData")]
pub enum Thumbnail {
    /// Base64 PNG data URL.
    #[serde(rename = "string")]
    DataUrl(String),

    /// Raw PNG bytes.
    #[serde(rename = "buffer")]
    Buffer(Vec<u8>),

    /// Human-readable failure message.
    #[serde(rename = "error")]
    Error(String),
}

impl Thumbnail {
    /// True if this is a failure outcome.
    pub fn is_error(&self) -> bool {
        matches!(self, Thumbnail::Error(_))
    }
}

/// A batch result entry: the original descriptor enriched with the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// The caller's descriptor, returned unmodified.
    #[serde(flatten)]
    pub descriptor: FileDescriptor,

    /// The thumbnail outcome for this file.
    #[serde(flatten)]
    pub thumbnail: Thumbnail,
}
