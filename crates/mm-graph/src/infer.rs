//! Relational inference: composition of two relations by a sparse join on the shared node.

use crate::MultimodeGraph;
use mm_types::{AttrValue, Attrs, NodeId, WEIGHT};

impl<N: NodeId> MultimodeGraph<N> {
    /// Compose `second ∘ first`: for every edge (f, t) in `first` and every edge (t, t2) in
    /// `second`, emit (f, t2, `kind`).
    ///
    /// Only existing adjacency is walked, so the cost is the sum over shared intermediate
    /// nodes of out-degree in `first` times out-degree in `second`. Derivations of the same
    /// triple through different intermediates collapse into one edge without attributes.
    /// Endpoint types and attributes come from the graph each endpoint was taken from.
    pub fn infer(first: &Self, second: &Self, kind: &str) -> Self {
        let out = Self::compose(first, second, kind, |_| {});
        tracing::debug!(kind = %kind, edges = out.edge_count(), "relation inferred");
        out
    }

    /// Like [`infer`](Self::infer), but each output edge's weight counts the distinct
    /// intermediate nodes that derive it.
    pub fn infer_counted(first: &Self, second: &Self, kind: &str) -> Self {
        let out = Self::compose(first, second, kind, |attrs| {
            let count = attrs.get(WEIGHT).and_then(AttrValue::as_f64).unwrap_or(0.0);
            attrs.insert(WEIGHT.to_string(), AttrValue::Float(count + 1.0));
        });
        tracing::debug!(kind = %kind, edges = out.edge_count(), "relation inferred with counts");
        out
    }

    /// Two-hop join. `on_path` runs once per (from, via, to) path on the output edge's attributes.
    fn compose<F>(first: &Self, second: &Self, kind: &str, mut on_path: F) -> Self
    where
        F: FnMut(&mut Attrs),
    {
        let mut out = Self::new();
        if first.edge_count == 0 || second.edge_count == 0 {
            return out;
        }

        for (from, vias) in &first.succ {
            let Some(from_node) = first.nodes.get(from) else {
                continue;
            };
            for via in vias.keys() {
                let Some(tos) = second.succ.get(via) else {
                    continue;
                };
                for to in tos.keys() {
                    let Some(to_node) = second.nodes.get(to) else {
                        continue;
                    };
                    out.absorb_node(from, from_node);
                    out.absorb_node(to, to_node);
                    let attrs = out.put_edge(from.clone(), to.clone(), kind, Attrs::new());
                    on_path(attrs);
                }
            }
        }
        out
    }
}
