// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Simulation Core

//! Explicitly owned simulation context.
//!
//! Composes topology, planner, registry and ledger. Single-threaded; a host
//! serving concurrent requests must serialize mutating calls.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analytics::{self, SimulationSummary, VisitCount};
use crate::client::Client;
use crate::config::{ConfigError, SimulationConfig};
use crate::graph::{Edge, Graph};
use crate::ledger::RouteLedger;
use crate::order::Order;
use crate::registry::{NewOrder, Registry, RegistryError};
use crate::routing::{self, RouteError, RoutePlan};
use crate::spanning;
use crate::topology::{GenerationError, RoleMap, TopologyGenerator};
use crate::types::{ClientId, OrderId, Role, VertexId};

/// Stream selectors mixed into the seed so order picks and ids don't
/// replay the topology generator's sequence.
const ORDER_STREAM: u64 = 0x6f72_6465_7273;
const ID_STREAM: u64 = 0x6964_7321;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Tally of a batch of generated orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub created: Vec<OrderId>,
    pub no_route: usize,
    pub no_reachable_recharge: usize,
}

impl RunOutcome {
    pub fn attempted(&self) -> usize {
        self.created.len() + self.no_route + self.no_reachable_recharge
    }
}

// ─── Simulation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    graph: Graph,
    roles: RoleMap,
    registry: Registry,
    ledger: RouteLedger,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Generate a fresh network from `config` and start with empty books.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let (graph, _) = TopologyGenerator::new(config.topology.clone(), config.seed).generate()?;
        Ok(Self::with_graph(config, graph))
    }

    /// Run over a caller-built network. Roles come from the vertices.
    pub fn with_graph(config: SimulationConfig, graph: Graph) -> Self {
        let roles = graph.role_map();
        let seed = config.seed;
        Self {
            config,
            graph,
            roles,
            registry: Registry::new(seed ^ ID_STREAM),
            ledger: RouteLedger::new(),
            rng: ChaCha8Rng::seed_from_u64(seed ^ ORDER_STREAM),
        }
    }

    // ─── Orders ──────────────────────────────────────────────────────────

    /// Create an order from a random storage vertex to a random client
    /// vertex. Planning failures are returned as-is, never retried.
    pub fn generate_order(&mut self) -> Result<Order, SimulationError> {
        let origins = self.roles.vertices_with(Role::Storage);
        let destinations = self.roles.vertices_with(Role::Client);
        let (Some(&origin), Some(&destination)) = (
            origins.choose(&mut self.rng),
            destinations.choose(&mut self.rng),
        ) else {
            return Err(SimulationError::InvalidRequest(
                "network has no storage or no client vertices".into(),
            ));
        };
        let priority = self.config.default_priority;
        self.place_order(origin, destination, priority)
    }

    /// Create an order for an explicit origin/destination pair.
    pub fn create_order(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        priority: u8,
    ) -> Result<Order, SimulationError> {
        if origin == destination {
            return Err(SimulationError::InvalidRequest(format!(
                "origin and destination are both {}",
                self.graph.label(origin)
            )));
        }
        for id in [origin, destination] {
            if !self.graph.contains(id) {
                return Err(SimulationError::UnknownVertex(id));
            }
        }
        self.place_order(origin, destination, priority)
    }

    /// Generate `n_orders` orders, skipping and counting planning failures.
    pub fn run(&mut self, n_orders: usize) -> Result<RunOutcome, SimulationError> {
        let mut outcome = RunOutcome::default();
        for _ in 0..n_orders {
            match self.generate_order() {
                Ok(order) => outcome.created.push(order.id),
                Err(SimulationError::Route(RouteError::NoReachableRecharge { at })) => {
                    debug!(at = self.graph.label(at), "Order skipped: no reachable recharge");
                    outcome.no_reachable_recharge += 1;
                }
                Err(SimulationError::Route(RouteError::NoRouteFound { from, to })) => {
                    debug!(
                        from = self.graph.label(from),
                        to = self.graph.label(to),
                        "Order skipped: no route"
                    );
                    outcome.no_route += 1;
                }
                Err(other) => return Err(other),
            }
        }

        let failed = outcome.no_route + outcome.no_reachable_recharge;
        if failed > 0 {
            warn!(failed, attempted = outcome.attempted(), "Route planning failures during run");
        }
        info!(
            created = outcome.created.len(),
            distinct_routes = self.ledger.len(),
            "Run complete"
        );
        Ok(outcome)
    }

    pub fn cancel_order(&mut self, id: OrderId) -> Result<Order, SimulationError> {
        Ok(self.registry.cancel_order(id)?.clone())
    }

    pub fn complete_order(&mut self, id: OrderId) -> Result<Order, SimulationError> {
        Ok(self.registry.complete_order(id)?.clone())
    }

    pub fn get_order(&self, id: OrderId) -> Result<&Order, SimulationError> {
        Ok(self.registry.get_order(id)?)
    }

    pub fn list_orders(&self) -> &[Order] {
        self.registry.list_orders()
    }

    // ─── Clients ─────────────────────────────────────────────────────────

    pub fn get_or_create_client(&mut self, vertex: VertexId) -> Result<Client, SimulationError> {
        let label = self
            .graph
            .vertex(vertex)
            .map(|v| v.label.clone())
            .ok_or(SimulationError::UnknownVertex(vertex))?;
        Ok(self.registry.get_or_create_client(vertex, &label).clone())
    }

    pub fn get_client(&self, id: ClientId) -> Result<&Client, SimulationError> {
        Ok(self.registry.get_client(id)?)
    }

    pub fn list_clients(&self) -> Vec<&Client> {
        self.registry.list_clients()
    }

    // ─── Network queries ─────────────────────────────────────────────────

    /// Plan without placing an order.
    pub fn plan_route(&self, origin: VertexId, destination: VertexId) -> Result<RoutePlan, SimulationError> {
        Ok(routing::plan_route(
            &self.graph,
            &self.roles,
            origin,
            destination,
            self.config.autonomy_limit,
        )?)
    }

    pub fn compute_mst(&self) -> Vec<(VertexId, VertexId)> {
        spanning::compute_mst(&self.graph)
    }

    pub fn compute_mst_edges(&self) -> Vec<Edge> {
        spanning::compute_mst_edges(&self.graph)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    pub fn ledger(&self) -> &RouteLedger {
        &self.ledger
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // ─── Reports ─────────────────────────────────────────────────────────

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary::compute(
            &self.roles,
            self.registry.list_orders(),
            self.registry.list_clients().len(),
        )
    }

    pub fn visit_ranking(&self, role: Role) -> Vec<VisitCount> {
        analytics::visit_ranking(&self.graph, &self.roles, self.registry.list_orders(), role)
    }

    // ─── Internal ────────────────────────────────────────────────────────

    fn place_order(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        priority: u8,
    ) -> Result<Order, SimulationError> {
        let plan = self.plan_route(origin, destination)?;
        let frequency = self.ledger.record(&self.graph, &plan.path);

        let order = self.registry.create_order(NewOrder {
            origin,
            destination,
            destination_label: self.graph.label(destination),
            path: plan.path,
            cost: plan.cost,
            priority,
        });
        debug!(
            order = %order.id,
            from = self.graph.label(origin),
            to = self.graph.label(destination),
            cost = order.cost,
            recharge_stops = plan.recharge_stops,
            frequency,
            "Order created"
        );
        Ok(order.clone())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
