//! File transport for encoded snapshots.
//!
//! # Invariants
//! - Writes go to a sibling temp file first and are renamed into place, so a
//!   failed write never truncates an existing snapshot.

use crate::snapshot::codec::{SnapshotCodec, SnapshotError, SnapshotResult};
use log::{info, warn};
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = "tmp";

/// Encodes `entities` with `codec` and writes them to `path`.
///
/// Returns the number of bytes written.
pub fn write_snapshot_file<T, C>(path: &Path, codec: &C, entities: &[T]) -> SnapshotResult<usize>
where
    C: SnapshotCodec<T>,
{
    let bytes = codec.save(entities)?;
    let temp_path = temp_path_for(path);

    std::fs::write(&temp_path, &bytes).map_err(|source| SnapshotError::Io {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=snapshot_write module=snapshot status=ok count={} bytes={} path={}",
        entities.len(),
        bytes.len(),
        path.display()
    );
    Ok(bytes.len())
}

/// Reads `path` and decodes it with `codec`.
///
/// # Errors
/// - `MissingFile` when `path` does not exist.
/// - `Io` for any other read failure.
/// - `Decode` when the contents are malformed.
pub fn read_snapshot_file<T, C>(path: &Path, codec: &C) -> SnapshotResult<Vec<T>>
where
    C: SnapshotCodec<T>,
{
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "event=snapshot_read module=snapshot status=missing path={}",
                path.display()
            );
            return Err(SnapshotError::MissingFile(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let entities = codec.load(&bytes)?;
    info!(
        "event=snapshot_read module=snapshot status=ok count={} path={}",
        entities.len(),
        path.display()
    );
    Ok(entities)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
