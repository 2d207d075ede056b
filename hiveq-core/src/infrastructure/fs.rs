// hiveq-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Replace `path` with `content`.
///
/// An existing file (or the file a symlink points at) is replaced in one
/// step through a temporary sibling that carries the target's permissions,
/// so readers see either the previous file or the complete new one. A new
/// file is created with the process umask; on failure nothing is left
/// behind. The parent directory must exist.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => return write_new(path, content.as_ref()),
        Err(e) => return Err(InfrastructureError::Io(e)),
    };

    let permissions = fs::metadata(&target)
        .map_err(InfrastructureError::Io)?
        .permissions();
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::Builder::new()
        .prefix(".hiveq-")
        .permissions(permissions.clone())
        .tempfile_in(parent)
        .map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(&target)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    // Creation mode is filtered by the umask
    fs::set_permissions(&target, permissions).map_err(InfrastructureError::Io)?;

    Ok(())
}

fn write_new(path: &Path, content: &[u8]) -> Result<(), InfrastructureError> {
    fs::write(path, content).map_err(|e| {
        if path.is_file() {
            let _ = fs::remove_file(path);
        }
        InfrastructureError::Io(e)
    })
}
