//! Node and edge records, kind signatures, stats and snapshot DTOs.

use crate::Attrs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Bound for node identifiers: opaque, cloneable, totally ordered.
/// Ordering keeps adjacency iteration (and so every derived graph) deterministic.
pub trait NodeId: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> NodeId for T {}

/// Stored node: its type label and attribute map. The id is the store key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub node_type: String,
    #[serde(default)]
    pub attrs: Attrs,
}

impl Node {
    pub fn new(node_type: &str, attrs: Attrs) -> Self {
        Self {
            node_type: node_type.to_string(),
            attrs,
        }
    }
}

/// (source type, target type, edge kind) triple observed in a graph.
/// Informational only: nothing is rejected for lacking a signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KindSignature {
    pub source_type: String,
    pub target_type: String,
    pub kind: String,
}

impl KindSignature {
    pub fn new(source_type: &str, target_type: &str, kind: &str) -> Self {
        Self {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Owned node with its id, as exported in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<N> {
    pub id: N,
    pub node_type: String,
    #[serde(default)]
    pub attrs: Attrs,
}

/// Owned edge keyed by (source, target, kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<N> {
    pub source: N,
    pub target: N,
    pub kind: String,
    #[serde(default)]
    pub attrs: Attrs,
}

/// Counts over a graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub nodes_by_type: BTreeMap<String, usize>,
    pub edges_by_kind: BTreeMap<String, usize>,
}

/// Point-in-time export of a graph for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot<N> {
    pub nodes: Vec<NodeRecord<N>>,
    pub edges: Vec<EdgeRecord<N>>,
    pub kinds: Vec<KindSignature>,
    pub timestamp: String,
}
