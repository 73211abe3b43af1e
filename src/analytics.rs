// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Analytics

//! Read-only aggregates over the order history: per-role visit rankings and
//! the run summary consumed by reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::order::Order;
use crate::topology::RoleMap;
use crate::types::{Cost, OrderStatus, Role, VertexId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitCount {
    pub vertex: VertexId,
    pub label: String,
    pub visits: u64,
}

/// How often each `role` vertex appears across all order paths, most
/// visited first. Equal counts are ordered by label.
pub fn visit_ranking(graph: &Graph, roles: &RoleMap, orders: &[Order], role: Role) -> Vec<VisitCount> {
    let mut visits: HashMap<VertexId, u64> = HashMap::new();
    for order in orders {
        for &v in &order.path {
            if roles.is(v, role) {
                *visits.entry(v).or_default() += 1;
            }
        }
    }

    let mut ranking: Vec<VisitCount> = visits
        .into_iter()
        .map(|(vertex, visits)| VisitCount {
            vertex,
            label: graph.label(vertex).to_string(),
            visits,
        })
        .collect();
    ranking.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.label.cmp(&b.label)));
    ranking
}

// ─── SimulationSummary ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_orders: usize,
    pub total_clients: usize,
    pub storage_nodes: usize,
    pub recharge_nodes: usize,
    pub client_nodes: usize,
    pub total_distance: Cost,
    /// Mean number of vertices per order path.
    pub avg_route_length: f64,
    pub avg_order_cost: f64,
    pub max_order_cost: Cost,
    pub min_order_cost: Cost,
    pub pending: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl SimulationSummary {
    pub fn compute(roles: &RoleMap, orders: &[Order], total_clients: usize) -> Self {
        let total_orders = orders.len();
        let total_distance: Cost = orders.iter().map(|o| o.cost).sum();
        let mean = |sum: f64| if total_orders > 0 { sum / total_orders as f64 } else { 0.0 };
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        Self {
            total_orders,
            total_clients,
            storage_nodes: roles.count(Role::Storage),
            recharge_nodes: roles.count(Role::Recharge),
            client_nodes: roles.count(Role::Client),
            total_distance,
            avg_route_length: mean(orders.iter().map(|o| o.path.len()).sum::<usize>() as f64),
            avg_order_cost: mean(total_distance as f64),
            max_order_cost: orders.iter().map(|o| o.cost).max().unwrap_or(0),
            min_order_cost: orders.iter().map(|o| o.cost).min().unwrap_or(0),
            pending: count(OrderStatus::Pending),
            delivered: count(OrderStatus::Delivered),
            cancelled: count(OrderStatus::Cancelled),
        }
    }
}
