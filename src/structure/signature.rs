//! Position-independent entity signatures and the set diff over them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{ClassEntity, CodeEntity, FileExtraction, FunctionEntity};

/// Comparison key for one entity: kind, name and span length, plus the
/// member signatures for classes. Absolute line numbers are not part of it,
/// so an entity that only moved keeps its signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySignature(String);

impl EntitySignature {
    /// Signature of a function or method: `kind:name:span`.
    #[must_use]
    pub fn of_function(function: &FunctionEntity) -> Self {
        Self(function_key(function))
    }

    /// Signature of a class-family entity: `kind:name:span:{member,...}`.
    #[must_use]
    pub fn of_class(class: &ClassEntity) -> Self {
        let members: Vec<String> = class.methods.iter().map(function_key).collect();
        Self(format!(
            "{}:{}:{}:{{{}}}",
            class.kind,
            class.name,
            class.span_len(),
            members.join(",")
        ))
    }

    /// Signature of any entity.
    #[must_use]
    pub fn of(entity: &CodeEntity) -> Self {
        match entity {
            CodeEntity::Function(f) => Self::of_function(f),
            CodeEntity::Class(c) => Self::of_class(c),
        }
    }

    /// The signature text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntitySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn function_key(function: &FunctionEntity) -> String {
    format!("{}:{}:{}", function.kind, function.name, function.span_len())
}

/// Distinct signatures of every top-level entity in an extraction.
#[must_use]
pub fn signatures(extraction: &FileExtraction) -> BTreeSet<EntitySignature> {
    extraction.entities.iter().map(EntitySignature::of).collect()
}

/// Entity-level difference between two extractions of the same file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Signatures only in the current extraction.
    pub added: BTreeSet<EntitySignature>,
    /// Signatures only in the previous extraction.
    pub removed: BTreeSet<EntitySignature>,
    /// Signatures in both.
    pub unchanged: BTreeSet<EntitySignature>,
}

impl ChangeSet {
    /// Returns `true` when any entity was added or removed.
    #[must_use]
    pub fn has_structural_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Set difference of the signatures of `current` and `previous`.
#[must_use]
pub fn diff_extractions(current: &FileExtraction, previous: &FileExtraction) -> ChangeSet {
    let now = signatures(current);
    let before = signatures(previous);

    ChangeSet {
        added: now.difference(&before).cloned().collect(),
        removed: before.difference(&now).cloned().collect(),
        unchanged: now.intersection(&before).cloned().collect(),
    }
}
