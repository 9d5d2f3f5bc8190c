//! Multimode graph: typed node store, type index and kind registry.
//!
//! Edge storage operations live in `edges.rs`; extraction, inference and whole-graph operations
//! in their own modules, all as `impl` blocks on [`MultimodeGraph`].

use mm_types::{
    Attrs, EdgeRecord, GraphError, GraphSnapshot, GraphStats, KindSignature, Node, NodeId,
    NodeRecord,
};
use std::collections::{BTreeMap, BTreeSet};

/// Outgoing adjacency: source -> target -> kind -> edge attributes.
pub(crate) type Adjacency<N> = BTreeMap<N, BTreeMap<N, BTreeMap<String, Attrs>>>;

/// Directed multi-relational graph with typed nodes.
///
/// Edges are identified by (source, target, kind); at most one edge exists per triple.
/// Subgraphs and inferred graphs are independent values with no shared state.
#[derive(Debug, Clone)]
pub struct MultimodeGraph<N> {
    /// node_id -> type + attributes.
    pub(crate) nodes: BTreeMap<N, Node>,
    /// node_type -> node_ids. Always mirrors `nodes`.
    pub(crate) type_index: BTreeMap<String, BTreeSet<N>>,
    pub(crate) succ: Adjacency<N>,
    pub(crate) kinds: BTreeSet<KindSignature>,
    pub(crate) edge_count: usize,
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRef<'a, N> {
    pub source: &'a N,
    pub target: &'a N,
    pub kind: &'a str,
    pub attrs: &'a Attrs,
}

impl<N: NodeId> EdgeRef<'_, N> {
    pub fn to_record(&self) -> EdgeRecord<N> {
        EdgeRecord {
            source: self.source.clone(),
            target: self.target.clone(),
            kind: self.kind.to_string(),
            attrs: self.attrs.clone(),
        }
    }
}

impl<N: NodeId> Default for MultimodeGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> MultimodeGraph<N> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            type_index: BTreeMap::new(),
            succ: BTreeMap::new(),
            kinds: BTreeSet::new(),
            edge_count: 0,
        }
    }

    // =========================================================================
    // Node store
    // =========================================================================

    /// Insert a node, or update the attributes of an existing one.
    ///
    /// Re-adding an id under a different type is a [`GraphError::TypeConflict`];
    /// use [`retype_node`](Self::retype_node) to change a node's type.
    pub fn add_node(&mut self, id: N, node_type: &str, attrs: Attrs) -> Result<(), GraphError> {
        match self.nodes.get_mut(&id) {
            Some(node) if node.node_type != node_type => Err(GraphError::type_conflict(
                &id,
                &node.node_type,
                node_type,
            )),
            Some(node) => {
                node.attrs.extend(attrs);
                Ok(())
            }
            None => {
                self.insert_node(id, Node::new(node_type, attrs));
                Ok(())
            }
        }
    }

    /// Add several nodes of one type sharing the same attributes.
    /// All-or-nothing: if any id already holds another type, nothing is inserted.
    pub fn add_nodes_from<I>(
        &mut self,
        ids: I,
        node_type: &str,
        attrs: Attrs,
    ) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = N>,
    {
        let ids: Vec<N> = ids.into_iter().collect();
        let conflict = ids.iter().find_map(|id| {
            self.nodes
                .get(id)
                .filter(|n| n.node_type != node_type)
                .map(|n| (id, n))
        });
        if let Some((id, existing)) = conflict {
            return Err(GraphError::type_conflict(id, &existing.node_type, node_type));
        }
        for id in ids {
            self.add_node(id, node_type, attrs.clone())?;
        }
        Ok(())
    }

    /// Explicitly move a node to another type; returns the previous type.
    pub fn retype_node(&mut self, id: &N, node_type: &str) -> Result<String, GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", id)))?;
        if node.node_type == node_type {
            return Ok(node.node_type.clone());
        }
        let previous = std::mem::replace(&mut node.node_type, node_type.to_string());
        self.unindex(id, &previous);
        self.type_index
            .entry(node_type.to_string())
            .or_default()
            .insert(id.clone());
        tracing::debug!(node = ?id, from = %previous, to = %node_type, "node retyped");
        Ok(previous)
    }

    /// Type labels that currently have at least one node.
    pub fn node_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.type_index.keys().map(String::as_str)
    }

    /// Node ids of one type; empty for an unknown type.
    pub fn node_set<'a>(&'a self, node_type: &str) -> impl Iterator<Item = &'a N> + 'a {
        self.type_index.get(node_type).into_iter().flatten()
    }

    pub fn node(&self, id: &N) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_type(&self, id: &N) -> Option<&str> {
        self.nodes.get(id).map(|n| n.node_type.as_str())
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&N, &Node)> + '_ {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create the node with `node_type` if absent. Returns the node's actual type,
    /// which for an existing node may differ from `node_type`.
    pub(crate) fn ensure_node(&mut self, id: &N, node_type: &str) -> String {
        if let Some(node) = self.nodes.get(id) {
            return node.node_type.clone();
        }
        self.insert_node(id.clone(), Node::new(node_type, Attrs::new()));
        node_type.to_string()
    }

    /// Copy a node in from another graph: inserted if absent, attributes merged if present.
    /// An existing node keeps its type.
    pub(crate) fn absorb_node(&mut self, id: &N, node: &Node) {
        match self.nodes.get_mut(id) {
            Some(existing) => existing.attrs.extend(node.attrs.clone()),
            None => self.insert_node(id.clone(), node.clone()),
        }
    }

    fn insert_node(&mut self, id: N, node: Node) {
        self.type_index
            .entry(node.node_type.clone())
            .or_default()
            .insert(id.clone());
        self.nodes.insert(id, node);
    }

    fn unindex(&mut self, id: &N, node_type: &str) {
        if let Some(ids) = self.type_index.get_mut(node_type) {
            ids.remove(id);
            if ids.is_empty() {
                self.type_index.remove(node_type);
            }
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// All edges in (source, target, kind) order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, N>> + '_ {
        self.succ.iter().flat_map(|(source, targets)| {
            targets.iter().flat_map(move |(target, kinds)| {
                kinds.iter().map(move |(kind, attrs)| EdgeRef {
                    source,
                    target,
                    kind,
                    attrs,
                })
            })
        })
    }

    /// Distinct targets reachable from `id` over one edge of any kind.
    pub fn successors<'a>(&'a self, id: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.succ.get(id).into_iter().flat_map(|targets| targets.keys())
    }

    pub fn edge_attrs(&self, u: &N, v: &N, kind: &str) -> Option<&Attrs> {
        self.succ.get(u)?.get(v)?.get(kind)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn edge_count_of_kind(&self, kind: &str) -> usize {
        self.edges().filter(|e| e.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edge_count == 0
    }

    /// (source type, target type, kind) signatures seen so far.
    pub fn kind_registry(&self) -> &BTreeSet<KindSignature> {
        &self.kinds
    }

    // =========================================================================
    // Statistics and export
    // =========================================================================

    pub fn stats(&self) -> GraphStats {
        let nodes_by_type = self
            .type_index
            .iter()
            .map(|(t, ids)| (t.clone(), ids.len()))
            .collect();
        let mut edges_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for edge in self.edges() {
            *edges_by_kind.entry(edge.kind.to_string()).or_insert(0) += 1;
        }
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count,
            nodes_by_type,
            edges_by_kind,
        }
    }

    /// Create a snapshot for serialization.
    pub fn snapshot(&self) -> GraphSnapshot<N> {
        GraphSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|(id, node)| NodeRecord {
                    id: id.clone(),
                    node_type: node.node_type.clone(),
                    attrs: node.attrs.clone(),
                })
                .collect(),
            edges: self.edges().map(|e| e.to_record()).collect(),
            kinds: self.kinds.iter().cloned().collect(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
