// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Minimum Spanning Forest

//! Kruskal's algorithm over the current graph.
//!
//! Edges are taken in `(weight, label, label)` order so equal-weight choices
//! are reproducible. A disconnected graph yields one tree per component.

use std::collections::HashMap;

use crate::graph::{Edge, Graph};
use crate::types::{Cost, VertexId};

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<VertexId, VertexId>,
    rank: HashMap<VertexId, u32>,
}

impl UnionFind {
    pub fn new(ids: impl IntoIterator<Item = VertexId>) -> Self {
        let parent: HashMap<VertexId, VertexId> = ids.into_iter().map(|v| (v, v)).collect();
        let rank = parent.keys().map(|&v| (v, 0)).collect();
        Self { parent, rank }
    }

    pub fn find(&mut self, v: VertexId) -> VertexId {
        let mut root = v;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        // Compress: point every node on the walk straight at the root.
        let mut cursor = v;
        while cursor != root {
            let next = self.parent.insert(cursor, root).unwrap_or(root);
            cursor = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: VertexId, b: VertexId) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let rank_a = self.rank.get(&ra).copied().unwrap_or(0);
        let rank_b = self.rank.get(&rb).copied().unwrap_or(0);
        match rank_a.cmp(&rank_b) {
            std::cmp::Ordering::Less => {
                self.parent.insert(ra, rb);
            }
            std::cmp::Ordering::Greater => {
                self.parent.insert(rb, ra);
            }
            std::cmp::Ordering::Equal => {
                self.parent.insert(rb, ra);
                self.rank.insert(ra, rank_a + 1);
            }
        }
        true
    }
}

/// Minimum spanning forest edges, weights included.
pub fn compute_mst_edges(graph: &Graph) -> Vec<Edge> {
    let mut sets = UnionFind::new(graph.vertex_ids());
    graph
        .edges()
        .into_iter()
        .filter(|e| sets.union(e.u, e.v))
        .collect()
}

/// Minimum spanning forest as vertex pairs.
pub fn compute_mst(graph: &Graph) -> Vec<(VertexId, VertexId)> {
    compute_mst_edges(graph).into_iter().map(|e| (e.u, e.v)).collect()
}

pub fn forest_weight(edges: &[Edge]) -> Cost {
    edges.iter().map(|e| e.weight as Cost).sum()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::generate_topology;
    use crate::types::Role;

    /// Cheapest acyclic edge subset that leaves as many components as the
    /// graph itself, by exhaustive search.
    fn brute_force_forest_weight(graph: &Graph) -> Cost {
        let edges = graph.edges();
        let target = graph.vertex_count() - graph.connected_components().len();
        let mut best = Cost::MAX;
        for mask in 0u32..(1 << edges.len()) {
            if mask.count_ones() as usize != target {
                continue;
            }
            let mut sets = UnionFind::new(graph.vertex_ids());
            let chosen: Vec<&Edge> = (0..edges.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| &edges[i])
                .collect();
            if chosen.iter().all(|e| sets.union(e.u, e.v)) {
                best = best.min(chosen.iter().map(|e| e.weight as Cost).sum());
            }
        }
        best
    }

    #[test]
    fn kruskal_matches_brute_force_on_small_graphs() {
        for seed in 0..30 {
            let n = 3 + (seed as usize % 6);
            let m = (n + 4).min(n * (n - 1) / 2).min(14);
            let (g, _) = generate_topology(n, m, seed).expect("test: generate");
            let mst = compute_mst_edges(&g);
            assert_eq!(mst.len(), g.vertex_count() - 1);
            assert_eq!(forest_weight(&mst), brute_force_forest_weight(&g), "seed {seed}");
        }
    }

    #[test]
    fn disconnected_graph_gives_forest() {
        let mut g = Graph::new();
        let ids: Vec<VertexId> = (0..6)
            .map(|i| g.insert_vertex(crate::topology::vertex_label(i), Role::Client).expect("test: vertex"))
            .collect();
        g.insert_edge(ids[0], ids[1], 4).expect("test: edge");
        g.insert_edge(ids[1], ids[2], 2).expect("test: edge");
        g.insert_edge(ids[0], ids[2], 1).expect("test: edge");
        g.insert_edge(ids[3], ids[4], 7).expect("test: edge");
        // ids[5] is isolated

        let mst = compute_mst_edges(&g);
        assert_eq!(mst.len(), 6 - 3);
        assert_eq!(forest_weight(&mst), 1 + 2 + 7);
        assert_eq!(forest_weight(&mst), brute_force_forest_weight(&g));
    }

    #[test]
    fn equal_weights_resolve_by_label() {
        let mut g = Graph::new();
        let a = g.insert_vertex("A", Role::Client).expect("test: vertex");
        let b = g.insert_vertex("B", Role::Client).expect("test: vertex");
        let c = g.insert_vertex("C", Role::Client).expect("test: vertex");
        g.insert_edge(b, c, 1).expect("test: edge");
        g.insert_edge(a, c, 1).expect("test: edge");
        g.insert_edge(a, b, 1).expect("test: edge");
        assert_eq!(compute_mst(&g), vec![(a, b), (a, c)]);
    }

    #[test]
    fn union_find_joins_and_compresses() {
        let ids: Vec<VertexId> = (0..5).map(VertexId).collect();
        let mut uf = UnionFind::new(ids.clone());
        assert!(uf.union(ids[0], ids[1]));
        assert!(uf.union(ids[2], ids[3]));
        assert!(uf.union(ids[1], ids[3]));
        assert!(!uf.union(ids[0], ids[2]));
        assert_eq!(uf.find(ids[3]), uf.find(ids[0]));
        assert_ne!(uf.find(ids[4]), uf.find(ids[0]));
    }

    #[test]
    fn empty_graph_has_empty_forest() {
        assert!(compute_mst(&Graph::new()).is_empty());
    }
}
