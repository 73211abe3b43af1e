// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Route Frequency Ledger

//! Distinct routes and how often each was used.
//!
//! Backed by an [`AvlTree`] keyed by [`Route`]. The payload is an equal
//! `Route` whose frequency is bumped in place on repeats; the key keeps its
//! initial count.

use serde::Serialize;

use crate::avl::{AvlTree, Insertion};
use crate::graph::Graph;
use crate::route::Route;
use crate::types::VertexId;

#[derive(Debug, Clone, Default)]
pub struct RouteLedger {
    tree: AvlTree<Route, Route>,
    total_recorded: u64,
}

/// Serializable row for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub route: String,
    pub path: Vec<VertexId>,
    pub frequency: u64,
}

impl From<&Route> for LedgerEntry {
    fn from(route: &Route) -> Self {
        Self {
            route: route.label(),
            path: route.path().to_vec(),
            frequency: route.frequency(),
        }
    }
}

impl RouteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one use of `path`. Returns the frequency after recording, or 0
    /// for an empty path (nothing is stored).
    pub fn record(&mut self, graph: &Graph, path: &[VertexId]) -> u64 {
        let Some(route) = Route::from_path(graph, path) else {
            return 0;
        };
        self.total_recorded += 1;
        let key = route.clone();
        match self.tree.insert_with(key, route, Route::increment) {
            Insertion::Inserted => 1,
            Insertion::Merged => self.frequency(graph, path),
        }
    }

    /// Current frequency of `path`, 0 if never recorded.
    pub fn frequency(&self, graph: &Graph, path: &[VertexId]) -> u64 {
        Route::from_path(graph, path)
            .and_then(|key| self.tree.get(&key).map(Route::frequency))
            .unwrap_or(0)
    }

    /// `(key, payload)` pairs sorted by route label. Copies, not views.
    pub fn ordered_entries(&self) -> Vec<(Route, Route)> {
        self.tree
            .in_order()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Routes by frequency, most used first; equal counts keep label order.
    pub fn ranked(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self.tree.in_order().into_iter().map(|(_, v)| v.clone()).collect();
        routes.sort_by(|a, b| b.frequency().cmp(&a.frequency()));
        routes
    }

    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.tree.in_order().into_iter().map(|(_, v)| LedgerEntry::from(v)).collect()
    }

    /// Number of distinct routes.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of `record` calls that stored something.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn graph(n: usize) -> (Graph, Vec<VertexId>) {
        let mut g = Graph::new();
        let ids = (0..n)
            .map(|i| g.insert_vertex(crate::topology::vertex_label(i), Role::Client).expect("test: vertex"))
            .collect();
        (g, ids)
    }

    #[test]
    fn repeat_increments_without_new_entry() {
        let (g, v) = graph(3);
        let mut ledger = RouteLedger::new();
        assert_eq!(ledger.record(&g, &v), 1);
        assert_eq!(ledger.record(&g, &v), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_recorded(), 2);

        let entries = ledger.ordered_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.frequency(), 2);
    }

    #[test]
    fn distinct_paths_get_distinct_entries() {
        let (g, v) = graph(3);
        let mut ledger = RouteLedger::new();
        ledger.record(&g, &[v[0], v[1]]);
        ledger.record(&g, &[v[0], v[2]]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.frequency(&g, &[v[0], v[1]]), 1);
        assert_eq!(ledger.frequency(&g, &[v[1], v[0]]), 0);
    }

    #[test]
    fn traversal_is_strictly_increasing_by_label() {
        let (g, v) = graph(30);
        let mut ledger = RouteLedger::new();
        for i in (0..30).rev() {
            ledger.record(&g, &[v[i], v[(i * 7) % 30]]);
            ledger.record(&g, &[v[(i * 3) % 30], v[i]]);
        }
        assert!(ledger.is_balanced());
        let keys: Vec<Vec<String>> = ledger
            .ordered_entries()
            .into_iter()
            .map(|(k, _)| k.labels().to_vec())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "not strictly increasing: {keys:?}");
    }

    #[test]
    fn ranked_sorts_by_frequency() {
        let (g, v) = graph(4);
        let mut ledger = RouteLedger::new();
        ledger.record(&g, &[v[0], v[1]]);
        for _ in 0..3 {
            ledger.record(&g, &[v[2], v[3]]);
        }
        ledger.record(&g, &[v[1], v[2]]);
        let ranked = ledger.ranked();
        assert_eq!(ranked[0].path(), &[v[2], v[3]]);
        assert_eq!(ranked[0].frequency(), 3);
        // A→B before B→C at equal frequency
        assert_eq!(ranked[1].path(), &[v[0], v[1]]);
    }

    #[test]
    fn empty_path_is_ignored() {
        let (g, _) = graph(1);
        let mut ledger = RouteLedger::new();
        assert_eq!(ledger.record(&g, &[]), 0);
        assert!(ledger.is_empty());
    }
}
