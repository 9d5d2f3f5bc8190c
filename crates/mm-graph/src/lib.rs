//! Typed multi-relational graph with subgraph extraction and relational inference.

mod edges;
mod graph;
mod infer;
mod ops;
mod shared;
mod subgraph;

pub use graph::{EdgeRef, MultimodeGraph};
pub use mm_types::{
    weighted, AttrValue, Attrs, EdgeRecord, GraphError, GraphSnapshot, GraphStats, KindSignature,
    Node, NodeId, NodeRecord, WEIGHT,
};
pub use ops::MergeDirection;
pub use shared::SharedGraph;
