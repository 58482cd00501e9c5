//! Filesystem port for reading sources and persisting scan output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::PortError;

/// One entry yielded by [`FileSystem::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walked root.
    pub relative_path: PathBuf,
    /// `true` for directories.
    pub is_dir: bool,
    /// Size in bytes; zero for directories.
    pub size: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

/// Provides filesystem access for scanning and for the output directory.
///
/// Abstracting the filesystem lets scans and history run against an
/// in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, PortError>;

    /// Writes the given contents to a file, creating parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists everything under `root`, skipping any entry whose
    /// file name is in `ignore` together with its subtree. Entries come back
    /// sorted by relative path; `root` itself is not included.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be read.
    fn walk(&self, root: &Path, ignore: &[String]) -> Result<Vec<WalkEntry>, PortError>;
}
