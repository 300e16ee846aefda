//! Snapshot codec contract and JSON implementation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Format-specific failure reported by a codec implementation.
pub type CodecFailure = Box<dyn Error + Send + Sync + 'static>;

/// Snapshot encode/decode and file transport errors.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(CodecFailure),
    Decode(CodecFailure),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingFile(PathBuf),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode snapshot: {err}"),
            Self::Io { path, source } => {
                write!(f, "snapshot I/O failed at `{}`: {source}", path.display())
            }
            Self::MissingFile(path) => {
                write!(f, "snapshot file not found: `{}`", path.display())
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err.as_ref()),
            Self::Io { source, .. } => Some(source),
            Self::MissingFile(_) => None,
        }
    }
}

impl SnapshotError {
    /// Wraps any codec-specific encode failure.
    pub fn encode(err: impl Into<CodecFailure>) -> Self {
        Self::Encode(err.into())
    }

    /// Wraps any codec-specific decode failure.
    pub fn decode(err: impl Into<CodecFailure>) -> Self {
        Self::Decode(err.into())
    }
}

/// Converts a sequence of entities to raw bytes and back.
pub trait SnapshotCodec<T> {
    fn save(&self, entities: &[T]) -> SnapshotResult<Vec<u8>>;

    /// # Errors
    /// - `Decode` when `bytes` are malformed or an entity fails validation.
    fn load(&self, bytes: &[u8]) -> SnapshotResult<Vec<T>>;
}

/// JSON array codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSnapshotCodec {
    pretty: bool,
}

impl Default for JsonSnapshotCodec {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonSnapshotCodec {
    /// Indented output, one field per line.
    pub fn pretty() -> Self {
        Self::default()
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotCodec<T> for JsonSnapshotCodec {
    fn save(&self, entities: &[T]) -> SnapshotResult<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(entities)
        } else {
            serde_json::to_vec(entities)
        };
        encoded.map_err(SnapshotError::encode)
    }

    fn load(&self, bytes: &[u8]) -> SnapshotResult<Vec<T>> {
        serde_json::from_slice(bytes).map_err(SnapshotError::decode)
    }
}
