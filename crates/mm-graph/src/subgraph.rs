//! Subgraph extraction by endpoint type and edge kind.

use crate::MultimodeGraph;
use mm_types::NodeId;

impl<N: NodeId> MultimodeGraph<N> {
    /// Build an independent graph from every edge whose source has `source_type`, whose target
    /// has `target_type` (defaults to `source_type`) and whose kind equals `kind` when given.
    ///
    /// Included edges keep their own kind and attributes; included endpoints keep their type
    /// and attributes.
    pub fn subgraph(
        &self,
        source_type: &str,
        target_type: Option<&str>,
        kind: Option<&str>,
    ) -> Self {
        let target_type = target_type.unwrap_or(source_type);
        let mut sub = Self::new();

        for source in self.node_set(source_type) {
            let Some(targets) = self.succ.get(source) else {
                continue;
            };
            for (target, kinds) in targets {
                if self.node_type(target) != Some(target_type) {
                    continue;
                }
                for (edge_kind, attrs) in kinds {
                    if kind.is_some_and(|k| k != edge_kind) {
                        continue;
                    }
                    self.copy_endpoint(&mut sub, source);
                    self.copy_endpoint(&mut sub, target);
                    sub.put_edge(source.clone(), target.clone(), edge_kind, attrs.clone());
                }
            }
        }

        tracing::debug!(
            source_type = %source_type,
            target_type = %target_type,
            kind = ?kind,
            edges = sub.edge_count(),
            "subgraph extracted"
        );
        sub
    }

    fn copy_endpoint(&self, into: &mut Self, id: &N) {
        if let Some(node) = self.nodes.get(id) {
            into.absorb_node(id, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::MultimodeGraph;
    use mm_types::{weighted, AttrValue, Attrs, WEIGHT};

    fn mixed() -> MultimodeGraph<u32> {
        let mut g = MultimodeGraph::new();
        let mut ann = Attrs::new();
        ann.insert("name".to_string(), AttrValue::from("ann"));
        g.add_node(1, "person", ann).unwrap();
        g.add_edge(1, 2, "person", "person", "friend", weighted(1.0));
        g.add_edge(1, 2, "person", "person", "coworker", Attrs::new());
        g.add_edge(2, 3, "person", "person", "enemy", Attrs::new());
        g.add_edge(1, 100, "person", "place", "visits", Attrs::new());
        g.add_edge(100, 1, "place", "person", "hosts", Attrs::new());
        g
    }

    #[test]
    fn kind_filter_keeps_only_that_kind() {
        let g = mixed();
        let friends = g.subgraph("person", None, Some("friend"));

        assert_eq!(friends.edge_count(), 1);
        assert!(friends.has_edge(&1, &2, "friend"));
        assert_eq!(
            friends.edge_attrs(&1, &2, "friend").unwrap()[WEIGHT],
            AttrValue::Float(1.0)
        );
        assert!(!friends.contains_node(&3));
    }

    #[test]
    fn no_kind_filter_preserves_each_edge_kind() {
        let g = mixed();
        let people = g.subgraph("person", None, None);

        assert_eq!(people.edge_count(), 3);
        assert!(people.has_edge(&1, &2, "friend"));
        assert!(people.has_edge(&1, &2, "coworker"));
        assert!(people.has_edge(&2, &3, "enemy"));
        assert!(!people.contains_node(&100));
    }

    #[test]
    fn two_mode_extraction_is_directional() {
        let g = mixed();
        let visits = g.subgraph("person", Some("place"), None);

        assert_eq!(visits.edge_count(), 1);
        assert!(visits.has_edge(&1, &100, "visits"));
        assert_eq!(visits.node_type(&100), Some("place"));
        assert_eq!(
            visits.node(&1).unwrap().attrs["name"].as_str(),
            Some("ann")
        );
    }

    #[test]
    fn result_is_independent_of_source() {
        let mut g = mixed();
        let mut sub = g.subgraph("person", None, Some("friend"));
        sub.remove_edge(&1, &2, "friend");
        g.discount_edges(WEIGHT, 0.5);

        assert!(g.has_edge(&1, &2, "friend"));
        assert_eq!(sub.edge_count(), 0);
        assert_eq!(g.subgraph("robot", None, None).edge_count(), 0);
    }
}
