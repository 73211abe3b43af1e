// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Autonomy-Constrained Routing

//! Route planning for a range-limited vehicle.
//!
//! Planning strategy:
//! 1. Dijkstra from the current position to the destination
//! 2. Walk the shortest path edge by edge, tracking distance since the last
//!    recharge
//! 3. When the next edge would exceed the autonomy limit, detour to the
//!    nearest recharge vertex and restart from there
//! 4. Once at the destination, re-sum the assembled path for the final cost
//!
//! Distance ties are broken by vertex label so plans are reproducible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Graph;
use crate::topology::RoleMap;
use crate::types::{Cost, Role, VertexId};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route from {from} to {to}")]
    NoRouteFound { from: VertexId, to: VertexId },
    #[error("autonomy exceeded at {at} and no recharge vertex is reachable")]
    NoReachableRecharge { at: VertexId },
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
}

// ─── RoutePlan ───────────────────────────────────────────────────────────────

/// Result of route planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Full vertex sequence, origin first, destination last.
    pub path: Vec<VertexId>,
    /// Sum of edge weights along `path`.
    pub cost: Cost,
    /// Number of recharge detours inserted.
    pub recharge_stops: usize,
}

// ─── Shortest paths ──────────────────────────────────────────────────────────

/// Single-source shortest path tree.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: VertexId,
    dist: HashMap<VertexId, Cost>,
    prev: HashMap<VertexId, VertexId>,
}

impl ShortestPaths {
    pub fn distance(&self, to: VertexId) -> Option<Cost> {
        self.dist.get(&to).copied()
    }

    pub fn is_reachable(&self, to: VertexId) -> bool {
        self.dist.contains_key(&to)
    }

    /// Vertex sequence from the source to `to`, both inclusive.
    pub fn path_to(&self, to: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(to) {
            return None;
        }
        let mut path = vec![to];
        let mut cursor = to;
        while cursor != self.source {
            cursor = *self.prev.get(&cursor)?;
            path.push(cursor);
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra from `source`. Equal distances are settled in label order.
pub fn shortest_paths(graph: &Graph, source: VertexId) -> ShortestPaths {
    let mut dist: HashMap<VertexId, Cost> = HashMap::new();
    let mut prev: HashMap<VertexId, VertexId> = HashMap::new();
    let mut settled: HashSet<VertexId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    if graph.contains(source) {
        dist.insert(source, 0);
        heap.push(Reverse((0, graph.label(source), source)));
    }

    while let Some(Reverse((d, _, current))) = heap.pop() {
        if !settled.insert(current) {
            continue;
        }
        for (next, weight) in graph.neighbors(current) {
            if settled.contains(&next) {
                continue;
            }
            let candidate = d + weight as Cost;
            let better = dist.get(&next).map_or(true, |&known| candidate < known);
            if better {
                dist.insert(next, candidate);
                prev.insert(next, current);
                heap.push(Reverse((candidate, graph.label(next), next)));
            }
        }
    }

    ShortestPaths { source, dist, prev }
}

/// Sum of edge weights along `path`, or `None` if two consecutive vertices
/// are not adjacent.
pub fn path_cost(graph: &Graph, path: &[VertexId]) -> Option<Cost> {
    path.windows(2)
        .map(|pair| graph.get_edge(pair[0], pair[1]).map(|e| e.weight as Cost))
        .sum()
}

/// Distances travelled between consecutive recharge points along `path`.
///
/// The path start and end bound the first and last segment. Every segment of
/// a valid plan is within the autonomy limit.
pub fn recharge_segments(graph: &Graph, roles: &RoleMap, path: &[VertexId]) -> Option<Vec<Cost>> {
    let mut segments = Vec::new();
    let mut running: Cost = 0;
    for (i, pair) in path.windows(2).enumerate() {
        running += graph.get_edge(pair[0], pair[1])?.weight as Cost;
        let is_last = i + 2 == path.len();
        if roles.is(pair[1], Role::Recharge) || is_last {
            segments.push(running);
            running = 0;
        }
    }
    Some(segments)
}

// ─── Planner ─────────────────────────────────────────────────────────────────

/// Plan a route from `origin` to `destination` that never travels more than
/// `autonomy_limit` between recharge points.
pub fn plan_route(
    graph: &Graph,
    roles: &RoleMap,
    origin: VertexId,
    destination: VertexId,
    autonomy_limit: Cost,
) -> Result<RoutePlan, RouteError> {
    for id in [origin, destination] {
        if !graph.contains(id) {
            return Err(RouteError::UnknownVertex(id));
        }
    }

    let mut path = vec![origin];
    let mut current = origin;
    let mut since_recharge: Cost = 0;
    let mut recharge_stops = 0;
    // A restart from the same vertex with a fresh budget repeats itself.
    let mut restarts: HashSet<VertexId> = HashSet::from([origin]);

    'plan: while current != destination {
        let leg = shortest_paths(graph, current)
            .path_to(destination)
            .ok_or(RouteError::NoRouteFound { from: current, to: destination })?;

        for pair in leg.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let weight = graph
                .get_edge(from, to)
                .map(|e| e.weight as Cost)
                .ok_or(RouteError::NoRouteFound { from, to })?;

            if since_recharge + weight > autonomy_limit {
                let (stop, detour) = nearest_recharge(graph, roles, from, autonomy_limit - since_recharge)?;
                if !restarts.insert(stop) {
                    return Err(RouteError::NoReachableRecharge { at: from });
                }
                debug!(
                    at = graph.label(from),
                    recharge = graph.label(stop),
                    since_recharge,
                    "Recharge detour"
                );
                path.extend_from_slice(&detour[1..]);
                current = stop;
                since_recharge = 0;
                recharge_stops += 1;
                continue 'plan;
            }

            path.push(to);
            current = to;
            since_recharge += weight;
            if roles.is(to, Role::Recharge) {
                since_recharge = 0;
            }
        }
    }

    let cost = path_cost(graph, &path).ok_or(RouteError::NoRouteFound {
        from: origin,
        to: destination,
    })?;
    Ok(RoutePlan { path, cost, recharge_stops })
}

/// Closest recharge vertex other than `from`, reachable within `budget`.
///
/// Returns the vertex and the path leading to it. Ties go to the smaller
/// label.
fn nearest_recharge(
    graph: &Graph,
    roles: &RoleMap,
    from: VertexId,
    budget: Cost,
) -> Result<(VertexId, Vec<VertexId>), RouteError> {
    let tree = shortest_paths(graph, from);
    let best = roles
        .vertices_with(Role::Recharge)
        .into_iter()
        .filter(|&r| r != from)
        .filter_map(|r| tree.distance(r).map(|d| (d, graph.label(r), r)))
        .min();

    match best {
        Some((distance, _, stop)) if distance <= budget => {
            let detour = tree
                .path_to(stop)
                .ok_or(RouteError::NoReachableRecharge { at: from })?;
            Ok((stop, detour))
        }
        _ => Err(RouteError::NoReachableRecharge { at: from }),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
