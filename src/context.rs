//! Service context bundling all port trait objects.

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::memory::{FixedClock, MemoryFileSystem, SequentialIdGenerator};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up either the live adapters or the in-memory ones.
pub struct ServiceContext {
    /// Clock for scan timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for walking the target and writing output.
    pub fs: Box<dyn FileSystem>,
    /// ID generator for scan ids.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        fs: Box<dyn FileSystem>,
        clock: Box<dyn Clock>,
        id_gen: Box<dyn IdGenerator>,
    ) -> Self {
        Self { clock, fs, id_gen }
    }

    /// Creates a live context backed by the real disk, system clock and UUIDs.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveClock), Box::new(LiveIdGenerator))
    }

    /// Creates a deterministic context over an in-memory filesystem.
    ///
    /// Time is frozen at `now` and scan ids count up from `scan-1`.
    #[must_use]
    pub fn in_memory(fs: MemoryFileSystem, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self::new(
            Box::new(fs),
            Box::new(FixedClock(now)),
            Box::new(SequentialIdGenerator::new("scan")),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn in_memory_context_is_deterministic() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new().with_file("/p/a.js", "x"), now);
        assert_eq!(ctx.clock.now(), now);
        assert_eq!(ctx.id_gen.generate_id(), "scan-1");
        assert!(ctx.fs.exists(Path::new("/p/a.js")));
    }
}
