//! Frenemy model. Two rules, applied once per tick:
//!
//! - a friend of a friend is my friend;
//! - the enemy of my friend is my enemy.
//!
//! Every operation takes the graph explicitly; the simulation owns only its settings and RNG.

use crate::{ConfigError, SimConfig};
use mm_graph::{weighted, Attrs, GraphError, MultimodeGraph, WEIGHT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("graph: {0}")]
    Graph(#[from] GraphError),
}

/// Friend and enemy edge counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounts {
    pub tick: usize,
    pub friends: usize,
    pub enemies: usize,
}

pub struct Simulation {
    config: SimConfig,
    rng: StdRng,
    tick: usize,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            tick: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Add the agents `0..agents` as nodes with no edges.
    pub fn init(&self, graph: &mut MultimodeGraph<u32>) -> Result<(), SimError> {
        graph.add_nodes_from(0..self.config.agents, &self.config.node_type, Attrs::new())?;
        Ok(())
    }

    fn random_agent(&mut self) -> u32 {
        self.rng.gen_range(0..self.config.agents)
    }

    /// Make a random agent befriend another (possibly itself) with weight 1.
    pub fn random_edge(&mut self, graph: &mut MultimodeGraph<u32>) -> (u32, u32) {
        let (u, v) = (self.random_agent(), self.random_agent());
        let t = &self.config.node_type;
        graph.add_edge(u, v, t, t, &self.config.friend_kind, weighted(1.0));
        (u, v)
    }

    /// Infer friend-of-a-friend over the friend relation and fold it back in, keeping
    /// direction. Returns the number of inferred edges.
    pub fn friend_of_a_friend(&self, graph: &mut MultimodeGraph<u32>) -> Result<usize, SimError> {
        let friends = self.relation(graph, &self.config.friend_kind);
        let inferred = MultimodeGraph::infer(&friends, &friends, &self.config.friend_kind);
        graph.merge_preserving_direction(&inferred)?;
        Ok(inferred.edge_count())
    }

    /// Turn the (u, v) friend edge into an enemy edge of weight 1. No-op without a friend edge.
    pub fn flip_edge(&self, graph: &mut MultimodeGraph<u32>, u: u32, v: u32) -> bool {
        if !graph.remove_edge(&u, &v, &self.config.friend_kind) {
            return false;
        }
        let t = &self.config.node_type;
        graph.add_edge(u, v, t, t, &self.config.enemy_kind, weighted(1.0));
        true
    }

    /// Pick a random pair and flip their friendship, if any.
    pub fn random_enemy(&mut self, graph: &mut MultimodeGraph<u32>) -> bool {
        let (u, v) = (self.random_agent(), self.random_agent());
        self.flip_edge(graph, u, v)
    }

    /// Flip every friendship (f, t2) where f befriends some t who is an enemy of t2.
    /// Skipped when either relation is empty. Returns (friend edges, enemy edges) afterwards.
    pub fn enemy_of_a_friend(&self, graph: &mut MultimodeGraph<u32>) -> (usize, usize) {
        let friends = self.relation(graph, &self.config.friend_kind);
        let enemies = self.relation(graph, &self.config.enemy_kind);

        if friends.edge_count() > 0 && enemies.edge_count() > 0 {
            let hostile = MultimodeGraph::infer(&friends, &enemies, &self.config.enemy_kind);
            let mut flipped = 0;
            for edge in hostile.edges() {
                if self.flip_edge(graph, *edge.source, *edge.target) {
                    flipped += 1;
                }
            }
            tracing::debug!(candidates = hostile.edge_count(), flipped, "enemy of a friend");
        }

        (
            graph.edge_count_of_kind(&self.config.friend_kind),
            graph.edge_count_of_kind(&self.config.enemy_kind),
        )
    }

    /// One tick: decay, random friendship, friend-of-a-friend, random enemy, enemy-of-a-friend.
    pub fn step(&mut self, graph: &mut MultimodeGraph<u32>) -> Result<TickCounts, SimError> {
        graph.discount_edges(WEIGHT, self.config.decay_rate);
        self.random_edge(graph);
        self.friend_of_a_friend(graph)?;
        self.random_enemy(graph);
        let (friends, enemies) = self.enemy_of_a_friend(graph);

        let counts = TickCounts {
            tick: self.tick,
            friends,
            enemies,
        };
        self.tick += 1;
        tracing::debug!(tick = counts.tick, friends, enemies, "tick complete");
        Ok(counts)
    }

    /// Run `ticks` steps, collecting the counts of each in order.
    pub fn run(
        &mut self,
        graph: &mut MultimodeGraph<u32>,
        ticks: usize,
    ) -> Result<Vec<TickCounts>, SimError> {
        (0..ticks).map(|_| self.step(graph)).collect()
    }

    fn relation(&self, graph: &MultimodeGraph<u32>, kind: &str) -> MultimodeGraph<u32> {
        graph.subgraph(&self.config.node_type, None, Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(agents: u32, seed: u64) -> Simulation {
        Simulation::new(SimConfig {
            agents,
            seed: Some(seed),
            ..SimConfig::default()
        })
        .unwrap()
    }

    fn populated(sim: &Simulation) -> MultimodeGraph<u32> {
        let mut g = MultimodeGraph::new();
        sim.init(&mut g).unwrap();
        g
    }

    #[test]
    fn init_adds_typed_agents() {
        let sim = seeded(5, 1);
        let g = populated(&sim);
        assert_eq!(g.node_set("person").count(), 5);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn flip_requires_existing_friendship() {
        let sim = seeded(3, 1);
        let mut g = populated(&sim);
        assert!(!sim.flip_edge(&mut g, 0, 1));
        assert_eq!(g.edge_count(), 0);

        g.add_edge(0, 1, "person", "person", "friend", weighted(0.4));
        assert!(sim.flip_edge(&mut g, 0, 1));
        assert!(!g.has_edge(&0, &1, "friend"));
        assert_eq!(g.edge_attrs(&0, &1, "enemy").unwrap()[WEIGHT].as_f64(), Some(1.0));
    }

    #[test]
    fn friend_of_a_friend_closes_chains() {
        let sim = seeded(3, 1);
        let mut g = populated(&sim);
        g.add_edges_from([(0, 1), (1, 2)], "person", "person", "friend", &weighted(1.0));

        assert_eq!(sim.friend_of_a_friend(&mut g).unwrap(), 1);
        assert!(g.has_edge(&0, &2, "friend"));
        assert_eq!(g.edge_count_of_kind("friend"), 3);
    }

    #[test]
    fn enemy_of_a_friend_flips_derived_pairs() {
        let sim = seeded(4, 1);
        let mut g = populated(&sim);
        g.add_edges_from([(0, 1), (0, 2)], "person", "person", "friend", &weighted(1.0));
        g.add_edge(1, 2, "person", "person", "enemy", weighted(1.0));

        assert_eq!(sim.enemy_of_a_friend(&mut g), (1, 2));
        assert!(g.has_edge(&0, &2, "enemy"));
        assert!(g.has_edge(&0, &1, "friend"));
    }

    #[test]
    fn enemy_of_a_friend_skips_without_enemies() {
        let sim = seeded(3, 1);
        let mut g = populated(&sim);
        g.add_edge(0, 1, "person", "person", "friend", Attrs::new());
        assert_eq!(sim.enemy_of_a_friend(&mut g), (1, 0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = seeded(10, 7);
        let mut b = seeded(10, 7);
        let mut ga = populated(&a);
        let mut gb = populated(&b);

        let ra = a.run(&mut ga, 25).unwrap();
        let rb = b.run(&mut gb, 25).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(ra.len(), 25);
        assert_eq!(ra.last().map(|c| c.tick), Some(24));
    }

    #[test]
    fn counts_match_graph_after_each_tick() {
        let mut sim = seeded(8, 3);
        let mut g = populated(&sim);
        for _ in 0..10 {
            let counts = sim.step(&mut g).unwrap();
            assert_eq!(counts.friends, g.edge_count_of_kind("friend"));
            assert_eq!(counts.enemies, g.edge_count_of_kind("enemy"));
            assert_eq!(g.edge_count(), counts.friends + counts.enemies);
        }
    }

    #[test]
    fn zero_agents_is_rejected() {
        let err = Simulation::new(SimConfig {
            agents: 0,
            ..SimConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, SimError::Config(ConfigError::Invalid(_))));
    }
}
