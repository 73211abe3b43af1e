// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Graph Store

//! Undirected weighted graph with role-tagged vertices.
//!
//! Vertices live in an arena addressed by [`VertexId`]. Removed vertices leave
//! a tombstone so handles stay stable. Adjacency is kept in ordered maps, so
//! every enumeration is deterministic.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::topology::RoleMap;
use crate::types::{Role, VertexId, Weight};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("edge endpoints must differ (got {0} twice)")]
    SelfLoop(VertexId),
    #[error("edge between {0} and {1} already exists")]
    DuplicateEdge(VertexId, VertexId),
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("edge weight must be at least 1")]
    ZeroWeight,
    #[error("label {0:?} is already taken by {1}")]
    DuplicateLabel(String, VertexId),
}

// ─── Vertex / Edge ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    pub role: Role,
}

/// Undirected edge, stored with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: Weight,
}

impl Edge {
    fn new(a: VertexId, b: VertexId, weight: Weight) -> Self {
        let (u, v) = if a <= b { (a, b) } else { (b, a) };
        Self { u, v, weight }
    }

    /// The endpoint opposite `from`, if `from` is an endpoint.
    pub fn opposite(&self, from: VertexId) -> Option<VertexId> {
        if from == self.u {
            Some(self.v)
        } else if from == self.v {
            Some(self.u)
        } else {
            None
        }
    }

    pub fn touches(&self, id: VertexId) -> bool {
        self.u == id || self.v == id
    }
}

// ─── Graph ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Option<Vertex>>,
    adjacency: Vec<BTreeMap<VertexId, Weight>>,
    by_label: HashMap<String, VertexId>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Labels are unique among live vertices.
    pub fn insert_vertex(&mut self, label: impl Into<String>, role: Role) -> Result<VertexId, GraphError> {
        let label = label.into();
        if let Some(&taken) = self.by_label.get(&label) {
            return Err(GraphError::DuplicateLabel(label, taken));
        }
        let id = VertexId(self.vertices.len() as u32);
        self.by_label.insert(label.clone(), id);
        self.vertices.push(Some(Vertex { id, label, role }));
        self.adjacency.push(BTreeMap::new());
        Ok(id)
    }

    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> Result<Edge, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        self.require(u)?;
        self.require(v)?;
        if weight == 0 {
            return Err(GraphError::ZeroWeight);
        }
        if self.adjacency[u.index()].contains_key(&v) {
            return Err(GraphError::DuplicateEdge(u, v));
        }
        self.adjacency[u.index()].insert(v, weight);
        self.adjacency[v.index()].insert(u, weight);
        self.edge_count += 1;
        Ok(Edge::new(u, v, weight))
    }

    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Option<Edge> {
        if !self.contains(u) || !self.contains(v) {
            return None;
        }
        let weight = self.adjacency[u.index()].remove(&v)?;
        self.adjacency[v.index()].remove(&u);
        self.edge_count -= 1;
        Some(Edge::new(u, v, weight))
    }

    /// Remove a vertex and every edge touching it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let vertex = self.vertices.get_mut(id.index())?.take()?;
        let neighbors = std::mem::take(&mut self.adjacency[id.index()]);
        for n in neighbors.keys() {
            self.adjacency[n.index()].remove(&id);
        }
        self.edge_count -= neighbors.len();
        self.by_label.remove(&vertex.label);
        Some(vertex)
    }

    pub fn get_edge(&self, u: VertexId, v: VertexId) -> Option<Edge> {
        if !self.contains(u) {
            return None;
        }
        self.adjacency[u.index()]
            .get(&v)
            .map(|&w| Edge::new(u, v, w))
    }

    pub fn contains(&self, id: VertexId) -> bool {
        matches!(self.vertices.get(id.index()), Some(Some(_)))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index()).and_then(Option::as_ref)
    }

    pub fn vertex_by_label(&self, label: &str) -> Option<&Vertex> {
        self.by_label.get(label).and_then(|&id| self.vertex(id))
    }

    /// Label of a live vertex, or an empty string for a dead handle.
    pub fn label(&self, id: VertexId) -> &str {
        self.vertex(id).map(|v| v.label.as_str()).unwrap_or("")
    }

    /// Live vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter().flatten()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().map(|v| v.id)
    }

    /// All edges, sorted by weight, then by endpoint labels.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .vertices()
            .flat_map(|vx| {
                self.adjacency[vx.id.index()]
                    .iter()
                    .filter(move |(n, _)| vx.id < **n)
                    .map(move |(&n, &w)| Edge::new(vx.id, n, w))
            })
            .collect();
        edges.sort_by(|a, b| {
            a.weight
                .cmp(&b.weight)
                .then_with(|| self.label_key(a).cmp(&self.label_key(b)))
        });
        edges
    }

    /// Endpoint labels of an edge, smaller first.
    pub(crate) fn label_key(&self, edge: &Edge) -> (&str, &str) {
        let a = self.label(edge.u);
        let b = self.label(edge.v);
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Neighbors with the connecting weight, in id order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.adjacency
            .get(id.index())
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(&n, &w)| (n, w)))
    }

    pub fn incident_edges(&self, id: VertexId) -> Vec<Edge> {
        self.neighbors(id).map(|(n, w)| Edge::new(id, n, w)).collect()
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.adjacency.get(id.index()).map_or(0, BTreeMap::len)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Connected components as sorted id lists, ordered by smallest member.
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut seen = vec![false; self.vertices.len()];
        let mut components = Vec::new();
        for start in self.vertex_ids() {
            if seen[start.index()] {
                continue;
            }
            seen[start.index()] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for (n, _) in self.neighbors(current) {
                    if !seen[n.index()] {
                        seen[n.index()] = true;
                        component.push(n);
                        queue.push_back(n);
                    }
                }
            }
            component.sort();
            components.push(component);
        }
        components
    }

    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    /// Snapshot of each live vertex's role.
    pub fn role_map(&self) -> RoleMap {
        RoleMap::from_vertices(self.vertices())
    }

    fn require(&self, id: VertexId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(id))
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
