//! Errors surfaced by graph operations.

/// The graph absorbs missing edges, unknown types and absent weights silently; only the
/// conditions below reach the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A node id was re-added (or merged in) under a type other than the one it holds.
    /// Use an explicit retype to change a node's type.
    #[error("node {node} has type {existing:?}, refusing implicit retype to {requested:?}")]
    TypeConflict {
        node: String,
        existing: String,
        requested: String,
    },

    #[error("node not found: {0}")]
    NodeNotFound(String),
}

impl GraphError {
    pub fn type_conflict(node: impl std::fmt::Debug, existing: &str, requested: &str) -> Self {
        GraphError::TypeConflict {
            node: format!("{:?}", node),
            existing: existing.to_string(),
            requested: requested.to_string(),
        }
    }
}
