//! Inventory error types

use thiserror::Error;

/// Fatal configuration errors raised while building the container
/// registry. These indicate authoring mistakes and are never produced
/// after setup has completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{which} node is missing or dead")]
    MissingRoot { which: &'static str },

    #[error("node '{node}' under the container root does not carry the container marker")]
    NotAContainer { node: String },

    #[error("duplicate container name '{name}'")]
    DuplicateContainer { name: String },

    #[error("node '{node}' under container '{container}' does not carry the slot marker")]
    NotASlot { container: String, node: String },

    #[error("duplicate slot name '{name}' in container '{container}'")]
    DuplicateSlot { container: String, name: String },
}

/// Registry lookups that should not fail when content is authored
/// correctly. Distinct from the ordinary negative results of placement
/// (occupied slot, unknown slot name), which are not errors at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("container '{name}' is not registered")]
    ContainerNotFound { name: String },
}
