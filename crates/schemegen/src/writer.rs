//! Idempotent output writing.
//!
//! Incremental build systems treat a file with a new modification time as
//! changed, so [`OutputWriter`] only touches a file when its content would
//! actually change. Content is compared as raw UTF-8 bytes and written without
//! a byte-order mark, so what is compared is exactly what is written.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed over the target, so other processes never observe a half-written
//! file. A replaced file keeps its permissions; a new file gets the same mode
//! a plain create would give it.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// What [`OutputWriter::write`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already held the same content and was left alone.
    Unchanged,
}

/// Writes generated files, skipping writes that would not change anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputWriter {
    force: bool,
}

impl OutputWriter {
    pub fn new() -> Self {
        Self { force: false }
    }

    /// Makes every write unconditional.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    /// Whether writing `content` to `path` would change anything.
    pub fn needs_write(&self, path: &Path, content: &str) -> io::Result<bool> {
        if self.force {
            return Ok(true);
        }

        match fs::read(path) {
            Ok(existing) => Ok(existing != content.as_bytes()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Writes `content` to `path` unless the file already holds it.
    pub fn write(&self, path: &Path, content: &str) -> io::Result<WriteOutcome> {
        if !self.needs_write(path, content)? {
            return Ok(WriteOutcome::Unchanged);
        }

        write_atomic(path, content)?;
        Ok(WriteOutcome::Written)
    }
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let mut file = temp_file_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions)?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Temp file that gets the mode a plain create would: 0666 minus the umask.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
