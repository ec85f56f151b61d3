use std::io::Write;
use std::path::Path;

use atomicwrites::{AllowOverwrite, AtomicFile};
use log::debug;

use crate::error::{Error, Result};
use crate::record_types::ReducedMapping;

/// Publishes the output of a reduce task at `path` as one JSON object, entries in key order.
///
/// The data is written to a temporary file next to `path`, synced, and renamed over `path`;
/// readers see either the previous file or the complete new one. Returns the number of bytes
/// written.
pub fn write_reduce_output(path: &Path, reduced: &ReducedMapping) -> Result<usize> {
    let encoded = serde_json::to_vec(reduced).map_err(|e| Error::io(path, e.into()))?;

    let tmpdir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    AtomicFile::new_with_tmpdir(path, AllowOverwrite, tmpdir)
        .write(|f| f.write_all(&encoded).and_then(|_| f.flush()))
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::io(path, e),
        })?;

    debug!("wrote {} entries ({} bytes) to {}", reduced.len(), encoded.len(), path.display());
    Ok(encoded.len())
}
