// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Topology Generator

//! Seeded random network generation.
//!
//! A random spanning tree guarantees connectivity; extra edges are then
//! sprinkled between random non-adjacent pairs. Roles are shuffled across
//! the vertices in a fixed storage/recharge/client ratio.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::config::TopologyConfig;
use crate::graph::{Graph, GraphError, Vertex};
use crate::types::{Role, VertexId};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("at least one node is required (got {0})")]
    TooFewNodes(usize),
    #[error("{requested} edges requested but {n_nodes} nodes allow at most {max}")]
    TooManyEdges { requested: usize, n_nodes: usize, max: usize },
    #[error("role ratio exceeds 100% (storage {storage_pct}%, recharge {recharge_pct}%)")]
    InvalidRoleRatio { storage_pct: u32, recharge_pct: u32 },
    #[error("max edge weight must be at least 1")]
    InvalidWeightRange,
    #[error(transparent)]
    Graph(#[from] GraphError),
}

// ─── RoleMap ─────────────────────────────────────────────────────────────────

/// Read-only view of which role each vertex carries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleMap {
    roles: HashMap<VertexId, Role>,
}

impl RoleMap {
    pub fn from_vertices<'a>(vertices: impl IntoIterator<Item = &'a Vertex>) -> Self {
        Self {
            roles: vertices.into_iter().map(|v| (v.id, v.role)).collect(),
        }
    }

    pub fn role(&self, id: VertexId) -> Option<Role> {
        self.roles.get(&id).copied()
    }

    pub fn is(&self, id: VertexId, role: Role) -> bool {
        self.role(id) == Some(role)
    }

    /// Vertices carrying `role`, in id order.
    pub fn vertices_with(&self, role: Role) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self
            .roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    pub fn count(&self, role: Role) -> usize {
        self.roles.values().filter(|r| **r == role).count()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

// ─── Labels ──────────────────────────────────────────────────────────────────

/// Bijective base-26 label: 0 → A, 25 → Z, 26 → AA, 27 → AB, ...
pub fn vertex_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Role list in the configured ratio, before shuffling.
pub fn role_distribution(config: &TopologyConfig) -> Vec<Role> {
    let n = config.n_nodes;
    let share = |pct: u32| n * pct.min(100) as usize / 100;
    let n_storage = share(config.storage_pct);
    let n_recharge = share(config.recharge_pct).min(n - n_storage);
    let n_client = n - n_storage - n_recharge;

    let mut roles = Vec::with_capacity(n);
    roles.extend(std::iter::repeat(Role::Storage).take(n_storage));
    roles.extend(std::iter::repeat(Role::Recharge).take(n_recharge));
    roles.extend(std::iter::repeat(Role::Client).take(n_client));
    roles
}

// ─── TopologyGenerator ───────────────────────────────────────────────────────

pub struct TopologyGenerator {
    config: TopologyConfig,
    rng: ChaCha8Rng,
}

impl TopologyGenerator {
    pub fn new(config: TopologyConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn generate(mut self) -> Result<(Graph, RoleMap), GenerationError> {
        self.check()?;
        let n = self.config.n_nodes;
        let target_edges = self.config.effective_edges();

        let mut roles = role_distribution(&self.config);
        roles.shuffle(&mut self.rng);

        let mut graph = Graph::new();
        let vertices: Vec<VertexId> = roles
            .iter()
            .enumerate()
            .map(|(i, &role)| graph.insert_vertex(vertex_label(i), role))
            .collect::<Result<_, GraphError>>()?;

        // Random spanning tree: attach each remaining vertex to a connected one.
        let mut connected = vec![vertices[0]];
        let mut remaining: Vec<VertexId> = vertices[1..].to_vec();
        while !remaining.is_empty() {
            let u = connected[self.rng.gen_range(0..connected.len())];
            let v = remaining.swap_remove(self.rng.gen_range(0..remaining.len()));
            let weight = self.random_weight();
            graph.insert_edge(u, v, weight)?;
            connected.push(v);
        }

        let mut added = n - 1;
        while added < target_edges {
            let u = vertices[self.rng.gen_range(0..n)];
            let v = vertices[self.rng.gen_range(0..n)];
            if u == v || graph.get_edge(u, v).is_some() {
                continue;
            }
            let weight = self.random_weight();
            graph.insert_edge(u, v, weight)?;
            added += 1;
        }

        let role_map = graph.role_map();
        info!(
            nodes = n,
            edges = graph.edge_count(),
            storage = role_map.count(Role::Storage),
            recharge = role_map.count(Role::Recharge),
            client = role_map.count(Role::Client),
            "Topology generated"
        );
        Ok((graph, role_map))
    }

    fn check(&self) -> Result<(), GenerationError> {
        let c = &self.config;
        if c.n_nodes < 1 {
            return Err(GenerationError::TooFewNodes(c.n_nodes));
        }
        if c.effective_edges() > c.max_edges() {
            return Err(GenerationError::TooManyEdges {
                requested: c.m_edges,
                n_nodes: c.n_nodes,
                max: c.max_edges(),
            });
        }
        if !c.role_ratio_is_valid() {
            return Err(GenerationError::InvalidRoleRatio {
                storage_pct: c.storage_pct,
                recharge_pct: c.recharge_pct,
            });
        }
        if c.max_edge_weight == 0 {
            return Err(GenerationError::InvalidWeightRange);
        }
        Ok(())
    }

    fn random_weight(&mut self) -> u32 {
        self.rng.gen_range(1..=self.config.max_edge_weight)
    }
}

/// Generate a connected network with the default role ratio and weights.
pub fn generate_topology(
    n_nodes: usize,
    m_edges: usize,
    seed: u64,
) -> Result<(Graph, RoleMap), GenerationError> {
    TopologyGenerator::new(TopologyConfig::new(n_nodes, m_edges), seed).generate()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
