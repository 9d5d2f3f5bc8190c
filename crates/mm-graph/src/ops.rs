//! Whole-graph operations: reversal and merge.

use crate::MultimodeGraph;
use mm_types::{GraphError, NodeId};

/// How edges of the other graph are folded in by [`MultimodeGraph::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    /// (u, v, kind) is merged as (u, v, kind).
    Preserve,
    /// (u, v, kind) is merged as (v, u, kind).
    Reverse,
}

impl<N: NodeId> MultimodeGraph<N> {
    /// New graph with every edge flipped; nodes, kinds and attributes unchanged.
    pub fn reverse(&self) -> Self {
        let mut out = Self::new();
        for (id, node) in &self.nodes {
            out.absorb_node(id, node);
        }
        for edge in self.edges() {
            out.put_edge(
                edge.target.clone(),
                edge.source.clone(),
                edge.kind,
                edge.attrs.clone(),
            );
        }
        out
    }

    /// Union `other` into `self`.
    ///
    /// Node attributes are merged and edge attributes updated key by key, `other` winning.
    /// Fails without changing anything if a shared node id has a different type on each side.
    pub fn merge(&mut self, other: &Self, direction: MergeDirection) -> Result<(), GraphError> {
        for (id, node) in &other.nodes {
            if let Some(existing) = self.nodes.get(id) {
                if existing.node_type != node.node_type {
                    return Err(GraphError::type_conflict(
                        id,
                        &existing.node_type,
                        &node.node_type,
                    ));
                }
            }
        }

        for (id, node) in &other.nodes {
            self.absorb_node(id, node);
        }
        for edge in other.edges() {
            let (u, v) = match direction {
                MergeDirection::Preserve => (edge.source, edge.target),
                MergeDirection::Reverse => (edge.target, edge.source),
            };
            self.put_edge(u.clone(), v.clone(), edge.kind, edge.attrs.clone());
        }

        tracing::debug!(
            direction = ?direction,
            nodes = other.node_count(),
            edges = other.edge_count(),
            "graph merged"
        );
        Ok(())
    }

    /// Fold in a directed relation (for example an inferred one) as is.
    pub fn merge_preserving_direction(&mut self, other: &Self) -> Result<(), GraphError> {
        self.merge(other, MergeDirection::Preserve)
    }

    /// Fold in a relation with every edge flipped.
    pub fn merge_reversed(&mut self, other: &Self) -> Result<(), GraphError> {
        self.merge(other, MergeDirection::Reverse)
    }
}
