//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::Path;

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::error::PortError;
use crate::ports::filesystem::{FileSystem, WalkEntry};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        Ok(std::fs::read(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(&self, root: &Path, ignore: &[String]) -> Result<Vec<WalkEntry>, PortError> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| {
                !ignore.iter().any(|name| e.file_name().to_str() == Some(name.as_str()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself failing is fatal; anything deeper is skipped.
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            let Ok(relative_path) = entry.path().strip_prefix(root) else { continue };
            let metadata = entry.metadata().ok();
            let is_dir = entry.file_type().is_dir();
            entries.push(WalkEntry {
                relative_path: relative_path.to_path_buf(),
                is_dir,
                size: metadata.as_ref().filter(|_| !is_dir).map_or(0, std::fs::Metadata::len),
                modified: metadata
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Utc>::from),
            });
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(entries)
    }
}
