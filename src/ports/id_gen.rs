//! ID generator port for scan identifiers.

/// Generates unique identifiers.
///
/// Every stored scan gets one; tests substitute a predictable sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
