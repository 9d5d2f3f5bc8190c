//! Relational edge store: insert, increment, bulk insert, remove and decay.

use crate::MultimodeGraph;
use mm_types::{AttrValue, Attrs, KindSignature, NodeId, WEIGHT};

impl<N: NodeId> MultimodeGraph<N> {
    /// Insert the (u, v, kind) edge, or update its attributes if it exists.
    ///
    /// Missing endpoints are created with `u_type` / `v_type`; existing endpoints keep their
    /// type. The kind signature is recorded with the endpoints' actual types.
    pub fn add_edge(&mut self, u: N, v: N, u_type: &str, v_type: &str, kind: &str, attrs: Attrs) {
        self.ensure_node(&u, u_type);
        self.ensure_node(&v, v_type);
        self.put_edge(u, v, kind, attrs);
    }

    /// Increment the weight of the (u, v, kind) edge, creating it with weight 1 if absent.
    /// An existing edge without a numeric weight counts as weight 0. Returns the new weight.
    pub fn add_or_increment_edge(
        &mut self,
        u: N,
        v: N,
        u_type: &str,
        v_type: &str,
        kind: &str,
        attrs: Attrs,
    ) -> f64 {
        if let Some(existing) = self.edge_attrs_mut(&u, &v, kind) {
            let next = existing
                .get(WEIGHT)
                .and_then(AttrValue::as_f64)
                .unwrap_or(0.0)
                + 1.0;
            existing.insert(WEIGHT.to_string(), AttrValue::Float(next));
            return next;
        }
        let mut attrs = attrs;
        attrs.insert(WEIGHT.to_string(), AttrValue::Float(1.0));
        self.add_edge(u, v, u_type, v_type, kind, attrs);
        1.0
    }

    /// Add every (u, v) pair as a `kind` edge with the same endpoint types and attributes.
    pub fn add_edges_from<I>(
        &mut self,
        pairs: I,
        u_type: &str,
        v_type: &str,
        kind: &str,
        attrs: &Attrs,
    ) where
        I: IntoIterator<Item = (N, N)>,
    {
        for (u, v) in pairs {
            self.add_edge(u, v, u_type, v_type, kind, attrs.clone());
        }
    }

    /// Like [`add_edges_from`](Self::add_edges_from), setting the weight from each triple.
    pub fn add_weighted_edges_from<I>(
        &mut self,
        triples: I,
        u_type: &str,
        v_type: &str,
        kind: &str,
        attrs: &Attrs,
    ) where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        for (u, v, w) in triples {
            let mut edge_attrs = attrs.clone();
            edge_attrs.insert(WEIGHT.to_string(), AttrValue::Float(w));
            self.add_edge(u, v, u_type, v_type, kind, edge_attrs);
        }
    }

    pub fn has_edge(&self, u: &N, v: &N, kind: &str) -> bool {
        self.edge_attrs(u, v, kind).is_some()
    }

    /// Remove exactly the (u, v, kind) edge. Returns whether it existed; endpoints stay.
    pub fn remove_edge(&mut self, u: &N, v: &N, kind: &str) -> bool {
        let Some(targets) = self.succ.get_mut(u) else {
            return false;
        };
        let Some(kinds) = targets.get_mut(v) else {
            return false;
        };
        if kinds.remove(kind).is_none() {
            return false;
        }
        if kinds.is_empty() {
            targets.remove(v);
        }
        if targets.is_empty() {
            self.succ.remove(u);
        }
        self.edge_count -= 1;
        true
    }

    /// Multiply `attr` on every edge carrying it by `1 - rate`.
    /// Edges without the attribute, or with a non-numeric value, are untouched.
    /// Returns how many edges were discounted.
    pub fn discount_edges(&mut self, attr: &str, rate: f64) -> usize {
        let factor = 1.0 - rate;
        let mut touched = 0;
        for attrs in self
            .succ
            .values_mut()
            .flat_map(|targets| targets.values_mut())
            .flat_map(|kinds| kinds.values_mut())
        {
            if attrs.get_mut(attr).is_some_and(|value| value.scale(factor)) {
                touched += 1;
            }
        }
        tracing::debug!(attr = %attr, rate = rate, edges = touched, "edges discounted");
        touched
    }

    pub(crate) fn edge_attrs_mut(&mut self, u: &N, v: &N, kind: &str) -> Option<&mut Attrs> {
        self.succ.get_mut(u)?.get_mut(v)?.get_mut(kind)
    }

    /// Insert or update an edge whose endpoints already exist; returns its attribute map.
    pub(crate) fn put_edge(&mut self, u: N, v: N, kind: &str, attrs: Attrs) -> &mut Attrs {
        let signature = KindSignature::new(
            self.node_type(&u).unwrap_or_default(),
            self.node_type(&v).unwrap_or_default(),
            kind,
        );
        self.kinds.insert(signature);

        let kinds = self.succ.entry(u).or_default().entry(v).or_default();
        if !kinds.contains_key(kind) {
            self.edge_count += 1;
        }
        let slot = kinds.entry(kind.to_string()).or_default();
        slot.extend(attrs);
        slot
    }
}
