//! Port implementations: live adapters for real runs and in-memory
//! adapters for deterministic tests.

pub mod live;
pub mod memory;
