//! In-memory adapters for tests and embedding.
//!
//! Directories are implied by the file paths stored; there is no way to
//! create an empty directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::PortError;
use crate::ports::{Clock, FileSystem, IdGenerator, WalkEntry};

#[derive(Debug, Clone)]
struct MemFile {
    // `None` marks a file that exists but cannot be read.
    contents: Option<Vec<u8>>,
    modified: DateTime<Utc>,
}

/// Filesystem held in a map from absolute path to contents.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, MemFile>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous contents.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.insert(path.into(), Some(contents.as_bytes().to_vec()));
        self
    }

    /// Adds a file that shows up in walks but fails every read.
    #[must_use]
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        self.insert(path.into(), None);
        self
    }

    /// Removes a file. Returns `true` if it was present.
    pub fn remove(&self, path: &Path) -> bool {
        self.lock().remove(path).is_some()
    }

    /// Returns the contents of a file as text, if present and readable.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        let files = self.lock();
        let bytes = files.get(path)?.contents.as_ref()?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn insert(&self, path: PathBuf, contents: Option<Vec<u8>>) {
        let modified = DateTime::<Utc>::UNIX_EPOCH;
        self.lock().insert(path, MemFile { contents, modified });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, MemFile>> {
        // A poisoned map is still structurally valid.
        self.files.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        match self.lock().get(path) {
            Some(MemFile { contents: Some(bytes), .. }) => Ok(bytes.clone()),
            Some(MemFile { contents: None, .. }) => {
                Err(format!("permission denied: {}", path.display()).into())
            }
            None => Err(format!("file not found: {}", path.display()).into()),
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        self.read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.insert(path.to_path_buf(), Some(contents.as_bytes().to_vec()));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().keys().any(|file| file.starts_with(path))
    }

    fn walk(&self, root: &Path, ignore: &[String]) -> Result<Vec<WalkEntry>, PortError> {
        let files = self.lock();
        let mut entries: BTreeMap<PathBuf, WalkEntry> = BTreeMap::new();
        let mut found_root = false;

        for (path, file) in files.iter() {
            let Ok(relative) = path.strip_prefix(root) else { continue };
            found_root = true;
            let ignored = relative
                .components()
                .any(|c| ignore.iter().any(|name| c.as_os_str() == name.as_str()));
            if ignored || relative.as_os_str().is_empty() {
                continue;
            }

            for dir in relative.ancestors().skip(1) {
                if dir.as_os_str().is_empty() {
                    break;
                }
                entries.entry(dir.to_path_buf()).or_insert_with(|| WalkEntry {
                    relative_path: dir.to_path_buf(),
                    is_dir: true,
                    size: 0,
                    modified: None,
                });
            }
            let size = file.contents.as_ref().map_or(0, |bytes| bytes.len() as u64);
            entries.insert(
                relative.to_path_buf(),
                WalkEntry {
                    relative_path: relative.to_path_buf(),
                    is_dir: false,
                    size,
                    modified: Some(file.modified),
                },
            );
        }

        if !found_root {
            return Err(format!("directory not found: {}", root.display()).into());
        }
        Ok(entries.into_values().collect())
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Generates `<prefix>-1`, `<prefix>-2`, and so on.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicUsize,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `<prefix>-1`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), next: AtomicUsize::new(1) }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{n}", self.prefix)
    }
}
